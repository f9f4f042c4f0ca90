use bevy::prelude::*;

use crate::blueprint::BlueprintState;
use crate::context::GuiContext;
use crate::pickers::{DepotGuiState, SignalGuiState, StationGuiState, WaypointGuiState};
use crate::placement::StationJoinState;
use crate::rail::RailType;
use crate::toolbar::buttons::{RailToolButton, UserAction};

/// Which picker windows are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenPickers {
    pub signal: bool,
    pub station: bool,
    pub depot: bool,
    pub waypoint: bool,
}

impl OpenPickers {
    pub fn any(&self) -> bool {
        self.signal || self.station || self.depot || self.waypoint
    }
}

/// Everything the rail construction toolbar remembers between inputs.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct RailToolbarState {
    pub open: bool,
    pub railtype: RailType,
    /// Rail type of the last toolbar opened, used by the global hotkeys.
    pub last_built_railtype: RailType,
    pub(crate) lowered: Option<RailToolButton>,
    /// Build tools produce removal commands.
    pub remove_active: bool,
    /// The remove button can be pressed.
    pub remove_enabled: bool,
    /// Remove state the tool was started with; the remove modifier flips it.
    pub invert_remove: bool,
    pub last_user_action: UserAction,
    pub pickers: OpenPickers,
    pub signal: SignalGuiState,
    pub station: StationGuiState,
    pub depot: DepotGuiState,
    pub waypoint: WaypointGuiState,
    pub join: StationJoinState,
    pub blueprint: BlueprintState,
}

impl RailToolbarState {
    /// The tool currently pressed, if any. Remove is a toggle and never
    /// reported here.
    pub fn lowered(&self) -> Option<RailToolButton> {
        self.lowered
    }

    pub fn is_lowered(&self, button: RailToolButton) -> bool {
        self.lowered == Some(button)
    }

    /// Press `button`, or raise it if it is already pressed.
    ///
    /// Pressing a new tool first aborts whatever was active. Returns whether
    /// the tool ended up active.
    pub fn push_tool(&mut self, button: RailToolButton, cx: &mut GuiContext) -> bool {
        if self.is_lowered(button) {
            self.reset_object_to_place(cx);
            return false;
        }
        if self.lowered.is_some() || cx.highlight.is_placing() {
            self.on_place_object_abort(cx);
        }
        self.lowered = Some(button);
        cx.highlight.set_object_to_place(button.highlight_mode());
        self.refresh_poly_terraform(cx);
        true
    }

    /// Stop placing: back to the plain cursor with every tool raised.
    pub fn reset_object_to_place(&mut self, cx: &mut GuiContext) {
        self.on_place_object_abort(cx);
        cx.highlight.reset();
    }

    pub fn on_place_object_abort(&mut self, cx: &mut GuiContext) {
        self.lowered = None;
        self.remove_enabled = false;
        self.remove_active = false;
        cx.highlight.red_selection = false;
        cx.highlight.poly_terraform = false;

        if self.pickers.signal {
            self.close_signal_picker();
        }
        if self.pickers.station {
            self.close_station_picker(cx);
        }
        self.pickers.depot = false;
        self.pickers.waypoint = false;
        self.join.abort();
        self.blueprint.reset();
        cx.highlight.coverage_radius = None;
    }

    /// Open the toolbar for `railtype`. Refused for rail types the company
    /// cannot build.
    pub fn show(&mut self, railtype: RailType, cx: &mut GuiContext) -> bool {
        if !cx.railtypes.is_available(railtype) {
            warn!("Rail type {} is not available", railtype.0);
            return false;
        }
        if self.open && self.railtype != railtype {
            self.reset_object_to_place(cx);
        }
        self.open = true;
        self.railtype = railtype;
        self.last_built_railtype = railtype;
        self.remove_active = false;
        self.remove_enabled = false;
        info!("Rail toolbar opened for rail type {}", railtype.0);
        true
    }

    pub fn close(&mut self, cx: &mut GuiContext) {
        if !self.open {
            return;
        }
        self.reset_object_to_place(cx);
        self.open = false;
        debug!("Rail toolbar closed");
    }
}
