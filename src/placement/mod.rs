//! Turning finished clicks and drags into engine commands, and reacting to
//! their outcomes.

pub mod autodir;
pub mod bridge;
pub mod depot;
pub mod join;
pub mod signals;
pub mod station;
pub mod terraform;
pub mod waypoint;

pub use join::{PendingJoin, StationChoice, StationJoinState};
