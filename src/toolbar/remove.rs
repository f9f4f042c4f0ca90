//! The remove toggle and the modifier keys that drive it.

use crate::context::{GuiContext, ModifierState};
use crate::toolbar::buttons::RailToolButton;
use crate::toolbar::state::RailToolbarState;

impl RailToolbarState {
    pub fn toggle_remove(&mut self, cx: &mut GuiContext) {
        self.join.close_select_dialog();
        self.remove_active = !self.remove_active;
        cx.highlight.red_selection = self.remove_active;
    }

    /// The remove button was pressed.
    pub fn click_remove(&mut self, cx: &mut GuiContext) {
        if !self.remove_enabled {
            return;
        }
        self.toggle_remove(cx);
        cx.beep();

        if !self.is_lowered(RailToolButton::Station) {
            return;
        }
        if self.remove_active {
            // Removing is always a drag, starting from a single tile.
            if cx.settings.station_dragdrop {
                cx.highlight.sizing_limit = None;
            } else {
                cx.highlight.set_select_size(1, 1);
            }
        } else if cx.settings.station_dragdrop {
            cx.highlight.sizing_limit = Some(cx.settings.station_spread);
        } else {
            let (w, h) = self.station.footprint(cx.settings);
            cx.highlight.set_select_size(w, h);
        }
    }

    /// Holding the remove modifier flips the mode the tool was started in.
    /// Returns whether the remove state changed.
    pub fn remove_modifier_changed(&mut self, cx: &mut GuiContext) -> bool {
        let capable = self.lowered().is_some_and(RailToolButton::supports_removal);
        if !capable || !self.remove_enabled {
            return false;
        }
        let remove = self.invert_remove != cx.mods.remove_mod;
        if remove == self.remove_active {
            return false;
        }
        self.remove_active = remove;
        cx.highlight.red_selection = remove;
        true
    }

    /// Ctrl toggles remove for track, waypoint and station tools when the
    /// remove button is usable.
    pub fn ctrl_changed(&mut self, cx: &mut GuiContext) -> bool {
        if !self.remove_enabled {
            return false;
        }
        if !self
            .lowered()
            .is_some_and(RailToolButton::toggles_remove_with_ctrl)
        {
            return false;
        }
        self.toggle_remove(cx);
        true
    }

    /// Ctrl held over the polyline tool levels the land under new segments.
    /// Returns whether the toolbar reacts to the change.
    pub fn fn_modifier_changed(&mut self, cx: &mut GuiContext) -> bool {
        if !cx.settings.enable_polyrail_terraform || !self.is_lowered(RailToolButton::Polyrail) {
            return false;
        }
        self.refresh_poly_terraform(cx);
        true
    }

    /// Sync the terraform highlight with the held modifiers and lowered tool.
    pub fn refresh_poly_terraform(&self, cx: &mut GuiContext) {
        cx.highlight.poly_terraform = cx.settings.enable_polyrail_terraform
            && cx.mods.fn_mod
            && self.is_lowered(RailToolButton::Polyrail);
    }

    /// React to modifier keys going up or down.
    pub fn on_modifiers_changed(&mut self, previous: ModifierState, cx: &mut GuiContext) -> bool {
        let mut handled = false;
        if previous.remove_mod != cx.mods.remove_mod {
            handled |= self.remove_modifier_changed(cx);
        }
        if previous.fn_mod != cx.mods.fn_mod {
            handled |= self.fn_modifier_changed(cx);
        }
        handled
    }
}
