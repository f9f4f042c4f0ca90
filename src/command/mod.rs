use bevy::prelude::*;

pub use container::*;
pub use engine::*;
pub use messages::*;
pub use opcode::*;

pub mod container;
pub mod engine;
pub mod messages;
pub mod opcode;
pub mod params;

/// Registers the messages exchanged with the host engine.
pub struct CommandPlugin;

impl Plugin for CommandPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CommandRequest>()
            .add_message::<CommandOutcome>()
            .add_message::<PlaySound>();
    }
}
