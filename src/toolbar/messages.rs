//! Messages between the toolbar and the host: input coming in, dialog
//! requests going out.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::context::ModifierState;
use crate::highlight::PlaceDrag;
use crate::pickers::{DepotDirection, SignalPickerButton, StationPickerButton};
use crate::placement::StationChoice;
use crate::rail::{RailType, StationId};
use crate::toolbar::buttons::RailToolButton;
use crate::toolbar::hotkeys::HotkeyTarget;

/// Message: a toolbar button was clicked with the mouse
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarClick {
    pub button: RailToolButton,
}

/// Message: a toolbar hotkey was pressed
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarHotkey {
    pub target: HotkeyTarget,
    /// Also handled while the toolbar is closed.
    pub global: bool,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowRailToolbar {
    pub railtype: RailType,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseRailToolbar;

/// Message: the player clicked a map tile while a tool was active
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceObject {
    pub tile: TilePos,
}

/// Message: the viewport finished a drag started by the toolbar
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceMouseUp {
    pub drag: PlaceDrag,
}

/// Message: the cursor moved over a tile while the tunnel tool is active
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacePresize {
    pub tile: TilePos,
}

/// Message: placement was cancelled, e.g. by right click or escape
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceAbort;

/// Message: the host should let the player pick a bridge for the span
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowBridgePicker {
    pub start: TilePos,
    pub end: TilePos,
    pub railtype: RailType,
}

/// Message: the player chose a bridge type
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeChosen {
    pub start: TilePos,
    pub end: TilePos,
    pub bridge_type: u8,
}

/// Message: the host should ask which station the new part joins
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SelectStationRequest {
    pub candidates: Vec<StationId>,
    pub waypoint: bool,
}

/// Message: answer to a [`SelectStationRequest`]
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationChosen {
    pub choice: StationChoice,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalPickerClick {
    pub button: SignalPickerButton,
}

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct StationPickerClick {
    pub button: StationPickerButton,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepotPickerClick {
    pub direction: DepotDirection,
}

/// Message: the rotate hotkey of the open station or depot picker
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerRotate;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaypointPickerClick {
    pub waypoint_type: u16,
}

/// Message: modifier keys changed; `previous` is the state before
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifiersChanged {
    pub previous: ModifierState,
    pub current: ModifierState,
}
