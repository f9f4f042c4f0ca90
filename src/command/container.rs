use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::opcode::{CommandId, ErrorMessage};
use crate::map::Track;

/// A command record handed to the engine, with everything needed to react
/// to its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandContainer {
    pub tile: TilePos,
    pub p1: u32,
    pub p2: u32,
    pub cmd: CommandId,
    pub error: Option<ErrorMessage>,
    pub callback: CommandCallback,
    pub text: String,
}

impl CommandContainer {
    pub fn new(tile: TilePos, p1: u32, p2: u32, cmd: CommandId) -> Self {
        Self {
            tile,
            p1,
            p2,
            cmd,
            error: None,
            callback: CommandCallback::None,
            text: String::new(),
        }
    }

    pub fn with_error(mut self, error: ErrorMessage) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_callback(mut self, callback: CommandCallback) -> Self {
        self.callback = callback;
        self
    }
}

/// What to do once the engine reports the command's outcome.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CommandCallback {
    #[default]
    None,
    /// Construction sound on success.
    PlaySound,
    /// Explosion sound on success.
    Demolish,
    /// Construction sound, then remember the placed segment for snapping.
    RailTrack {
        start: TilePos,
        track: Track,
        store_snap: bool,
    },
    RailDepot,
    Station,
    Tunnel,
    Bridge {
        start: TilePos,
        end: TilePos,
    },
    /// Sound on success, red error square on failure.
    Terraform,
    /// Terraform feedback, then place the rail the levelling was for.
    TerraformThenRail(Box<RailContinuation>),
}

/// Rail placement deferred until the land under it has been levelled.
#[derive(Debug, Clone, PartialEq)]
pub struct RailContinuation {
    pub rail: CommandContainer,
    pub start: TilePos,
    pub track: Track,
    pub estimate: bool,
}
