use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::container::CommandContainer;
use crate::command::engine::CommandCost;

/// Message: command for the engine to execute
#[derive(Message, Debug, Clone, PartialEq)]
pub struct CommandRequest {
    pub command: CommandContainer,
}

/// Message: the engine finished a previously requested command
#[derive(Message, Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub command: CommandContainer,
    pub cost: CommandCost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    ConstructionRail,
    ConstructionOther,
    ConstructionBridge,
    Explosion,
    Click,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySound {
    pub effect: SoundEffect,
    /// Positional sounds play at a tile, UI sounds have none.
    pub tile: Option<TilePos>,
}
