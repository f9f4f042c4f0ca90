use crate::highlight::{HighlightMode, LineDir};

/// Buttons of the rail construction toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RailToolButton {
    BuildNs,
    BuildX,
    BuildEw,
    BuildY,
    Autorail,
    Polyrail,
    Demolish,
    Depot,
    Waypoint,
    Station,
    Signals,
    Bridge,
    Tunnel,
    Blueprint,
    Remove,
    Convert,
}

impl RailToolButton {
    /// Every button in toolbar order.
    pub const ALL: [RailToolButton; 16] = [
        RailToolButton::BuildNs,
        RailToolButton::BuildX,
        RailToolButton::BuildEw,
        RailToolButton::BuildY,
        RailToolButton::Autorail,
        RailToolButton::Polyrail,
        RailToolButton::Demolish,
        RailToolButton::Depot,
        RailToolButton::Waypoint,
        RailToolButton::Station,
        RailToolButton::Signals,
        RailToolButton::Bridge,
        RailToolButton::Tunnel,
        RailToolButton::Blueprint,
        RailToolButton::Remove,
        RailToolButton::Convert,
    ];

    /// Tools the remove toggle applies to.
    pub fn supports_removal(self) -> bool {
        matches!(
            self,
            RailToolButton::BuildNs
                | RailToolButton::BuildX
                | RailToolButton::BuildEw
                | RailToolButton::BuildY
                | RailToolButton::Autorail
                | RailToolButton::Polyrail
                | RailToolButton::Waypoint
                | RailToolButton::Station
                | RailToolButton::Signals
        )
    }

    /// Tools whose remove state follows the ctrl key in legacy mode.
    pub fn toggles_remove_with_ctrl(self) -> bool {
        matches!(
            self,
            RailToolButton::BuildNs
                | RailToolButton::BuildX
                | RailToolButton::BuildEw
                | RailToolButton::BuildY
                | RailToolButton::Autorail
                | RailToolButton::Polyrail
                | RailToolButton::Waypoint
                | RailToolButton::Station
        )
    }

    /// Cursor highlight while the tool is active.
    pub fn highlight_mode(self) -> HighlightMode {
        match self {
            RailToolButton::BuildNs => HighlightMode::Line(LineDir::Vertical),
            RailToolButton::BuildX => HighlightMode::Line(LineDir::X),
            RailToolButton::BuildEw => HighlightMode::Line(LineDir::Horizontal),
            RailToolButton::BuildY => HighlightMode::Line(LineDir::Y),
            RailToolButton::Autorail => HighlightMode::Rail,
            RailToolButton::Polyrail => HighlightMode::Poly,
            RailToolButton::Demolish | RailToolButton::Convert => HighlightMode::DiagonalRect,
            RailToolButton::Tunnel => HighlightMode::Special,
            RailToolButton::Depot
            | RailToolButton::Waypoint
            | RailToolButton::Station
            | RailToolButton::Signals
            | RailToolButton::Bridge
            | RailToolButton::Blueprint
            | RailToolButton::Remove => HighlightMode::Rect,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RailToolButton::BuildNs => "NS",
            RailToolButton::BuildX => "X",
            RailToolButton::BuildEw => "EW",
            RailToolButton::BuildY => "Y",
            RailToolButton::Autorail => "Auto",
            RailToolButton::Polyrail => "Poly",
            RailToolButton::Demolish => "Demolish",
            RailToolButton::Depot => "Depot",
            RailToolButton::Waypoint => "Waypoint",
            RailToolButton::Station => "Station",
            RailToolButton::Signals => "Signals",
            RailToolButton::Bridge => "Bridge",
            RailToolButton::Tunnel => "Tunnel",
            RailToolButton::Blueprint => "Blueprint",
            RailToolButton::Remove => "Remove",
            RailToolButton::Convert => "Convert",
        }
    }
}

/// Hotkeys that are not plain button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Polyrail snapping to existing track.
    Polyrail,
    /// Polyrail starting a fresh line.
    NewPolyrail,
    BlueprintRotate,
    StationSized,
    StationDragDrop,
}

/// What the player did last; several tools behave differently depending on
/// how they were reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserAction {
    #[default]
    None,
    Tool(RailToolButton),
    Hotkey(HotkeyAction),
    /// Pasting a copied blueprint.
    BlueprintPlace,
}
