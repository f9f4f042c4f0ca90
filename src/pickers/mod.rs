//! Picker windows attached to the toolbar: their selections and click
//! handling.

pub mod depot;
pub mod signal;
pub mod station;
pub mod waypoint;

pub use depot::{DepotDirection, DepotGuiState};
pub use signal::{SignalGuiState, SignalPickerButton};
pub use station::{StationGuiState, StationPickerButton};
pub use waypoint::WaypointGuiState;
