use bevy::prelude::*;

use crate::context::GuiContext;
use crate::highlight::RailSnapMode;
use crate::toolbar::buttons::{HotkeyAction, RailToolButton, UserAction};
use crate::toolbar::hotkeys::HotkeyTarget;
use crate::toolbar::state::RailToolbarState;

impl RailToolbarState {
    /// A toolbar button was pressed, by mouse or through a hotkey.
    pub fn on_click(&mut self, button: RailToolButton, from_hotkey: bool, cx: &mut GuiContext) {
        match button {
            RailToolButton::Remove => {
                self.click_remove(cx);
                return;
            }
            RailToolButton::Polyrail => {
                if !self.click_polyrail(cx) {
                    return;
                }
            }
            RailToolButton::Depot => {
                if self.push_tool(button, cx) {
                    self.depot.reset_rotation();
                    self.pickers.depot = true;
                    self.last_user_action = UserAction::Tool(button);
                }
            }
            RailToolButton::Waypoint => {
                self.last_user_action = UserAction::Tool(button);
                self.waypoint.count = cx.catalog.waypoint_count();
                if self.push_tool(button, cx) && self.waypoint.count > 1 {
                    self.pickers.waypoint = true;
                }
            }
            RailToolButton::Station => self.click_station(cx),
            RailToolButton::Signals => {
                self.last_user_action = UserAction::Tool(button);
                let started = self.push_tool(button, cx);
                if started != cx.mods.fn_mod {
                    self.open_signal_picker();
                }
            }
            _ => {
                self.push_tool(button, cx);
                self.last_user_action = UserAction::Tool(button);
            }
        }

        self.invert_remove = !from_hotkey && button.supports_removal() && cx.mods.remove_mod;
        self.remove_active = self.invert_remove;
        self.update_remove_widget_status(button, cx);
    }

    /// Open, close or switch the snapping of the polyline tool. Returns
    /// whether the tool was opened or closed.
    fn click_polyrail(&mut self, cx: &mut GuiContext) -> bool {
        let was_snap = cx.highlight.snap_mode == RailSnapMode::SnapToRail;
        let was_open = self.is_lowered(RailToolButton::Polyrail);
        // The snap hotkey opens in snapping mode and closes when already
        // snapping; the new-line hotkey is its mirror image. Ctrl-click
        // flips snapping, a plain click opens fresh or closes.
        let (do_snap, do_open) = match self.last_user_action {
            UserAction::Hotkey(HotkeyAction::Polyrail) => (true, !was_open || !was_snap),
            UserAction::Hotkey(HotkeyAction::NewPolyrail) => (false, !was_open || was_snap),
            _ if cx.mods.fn_mod => (!was_open || !was_snap, true),
            _ => (false, !was_open),
        };

        if was_open != do_open {
            self.push_tool(RailToolButton::Polyrail, cx);
        }
        if do_open {
            cx.highlight.snap_mode = if do_snap {
                RailSnapMode::SnapToRail
            } else {
                RailSnapMode::NoSnap
            };
        }
        self.last_user_action = UserAction::Tool(RailToolButton::Polyrail);
        was_open != do_open
    }

    fn click_station(&mut self, cx: &mut GuiContext) {
        let requested = match self.last_user_action {
            UserAction::Hotkey(HotkeyAction::StationSized) => Some(false),
            UserAction::Hotkey(HotkeyAction::StationDragDrop) => Some(true),
            _ => None,
        };
        let Some(dragdrop) = requested else {
            if self.push_tool(RailToolButton::Station, cx) {
                self.open_station_picker(cx);
                self.last_user_action = UserAction::Tool(RailToolButton::Station);
            }
            return;
        };

        // Close explicitly so the tool reopens in the other sizing mode.
        let was_open = self.is_lowered(RailToolButton::Station);
        if was_open {
            self.reset_object_to_place(cx);
        }
        if !was_open || dragdrop != cx.settings.station_dragdrop {
            cx.settings.station_dragdrop = dragdrop;
            if self.push_tool(RailToolButton::Station, cx) {
                self.open_station_picker(cx);
            }
        }
        self.last_user_action = UserAction::Tool(RailToolButton::Station);
    }

    /// The remove button is usable only while a removal-capable tool is
    /// pressed.
    pub fn update_remove_widget_status(&mut self, clicked: RailToolButton, cx: &mut GuiContext) {
        if clicked == RailToolButton::Remove {
            return;
        }
        self.remove_enabled = clicked.supports_removal() && self.is_lowered(clicked);
        if !self.remove_enabled {
            self.remove_active = false;
        }
        cx.highlight.red_selection = self.remove_active;
    }

    /// Toolbar hotkey. Returns whether it was handled.
    pub fn on_hotkey(&mut self, target: HotkeyTarget, cx: &mut GuiContext) -> bool {
        match target {
            HotkeyTarget::Button(RailToolButton::Remove) if !self.remove_enabled => false,
            HotkeyTarget::Button(button) => {
                self.on_click(button, true, cx);
                true
            }
            HotkeyTarget::Action(action @ (HotkeyAction::Polyrail | HotkeyAction::NewPolyrail)) => {
                self.last_user_action = UserAction::Hotkey(action);
                self.on_click(RailToolButton::Polyrail, true, cx);
                true
            }
            HotkeyTarget::Action(
                action @ (HotkeyAction::StationSized | HotkeyAction::StationDragDrop),
            ) => {
                self.last_user_action = UserAction::Hotkey(action);
                self.on_click(RailToolButton::Station, true, cx);
                true
            }
            HotkeyTarget::Action(HotkeyAction::BlueprintRotate) => {
                if self.last_user_action != UserAction::BlueprintPlace {
                    return false;
                }
                self.blueprint.rotate();
                true
            }
        }
    }

    /// Hotkey pressed while the toolbar may be closed: open it with the
    /// last used rail type first.
    pub fn global_hotkey(&mut self, target: HotkeyTarget, cx: &mut GuiContext) -> bool {
        if !self.open {
            let railtype = self.last_built_railtype;
            if !self.show(railtype, cx) {
                debug!("Global rail hotkey ignored, toolbar cannot open");
                return false;
            }
        }
        self.on_hotkey(target, cx)
    }
}
