use std::any::Any;
use std::ops::BitOr;

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;
use thiserror::Error;

use crate::command::container::CommandContainer;
use crate::map::MapView;

/// Flags for a dry run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandFlags(u8);

impl CommandFlags {
    pub const NONE: CommandFlags = CommandFlags(0);
    /// Automatic action, e.g. part of a larger placement.
    pub const AUTO: CommandFlags = CommandFlags(1 << 0);
    /// Refuse to build on water.
    pub const NO_WATER: CommandFlags = CommandFlags(1 << 1);

    pub fn contains(self, other: CommandFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CommandFlags {
    type Output = CommandFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        CommandFlags(self.0 | rhs.0)
    }
}

/// Failure reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Everything the command would build is already there.
    #[error("already built")]
    AlreadyBuilt,
    #[error("not enough money, {needed} needed")]
    InsufficientFunds { needed: i64 },
    #[error("{0}")]
    Rejected(String),
}

/// Result of executing or dry-running a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandCost {
    pub result: Result<i64, CommandError>,
    /// Last tile a track or tunnel command reached, when known.
    pub end_tile: Option<TilePos>,
}

impl CommandCost {
    pub fn ok(cost: i64) -> Self {
        Self {
            result: Ok(cost),
            end_tile: None,
        }
    }

    pub fn err(error: CommandError) -> Self {
        Self {
            result: Err(error),
            end_tile: None,
        }
    }

    pub fn with_end_tile(mut self, end_tile: TilePos) -> Self {
        self.end_tile = Some(end_tile);
        self
    }

    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn failed(&self) -> bool {
        self.result.is_err()
    }

    pub fn is_already_built(&self) -> bool {
        matches!(self.result, Err(CommandError::AlreadyBuilt))
    }

    /// Dry run found nothing to do but told where the track ends.
    pub fn only_moves_snap(&self) -> bool {
        self.is_already_built() && self.end_tile.is_some()
    }
}

/// The host's command engine.
///
/// The toolbar never executes directly: it posts
/// [`CommandRequest`](crate::command::CommandRequest)s and reacts to
/// [`CommandOutcome`](crate::command::CommandOutcome)s, which the host may
/// deliver frames later. Only dry runs are synchronous.
pub trait CommandEngine: MapView + Any + Send + Sync {
    fn estimate(&self, command: &CommandContainer, flags: CommandFlags) -> CommandCost;

    /// Run the command for real. Called by the host when it answers a
    /// request, never by toolbar logic.
    fn execute(&mut self, command: &CommandContainer) -> CommandCost;
}

/// Engine supplied by the host application.
#[derive(Resource)]
pub struct HostEngine(pub Box<dyn CommandEngine>);

impl HostEngine {
    pub fn new(engine: impl CommandEngine) -> Self {
        Self(Box::new(engine))
    }
}
