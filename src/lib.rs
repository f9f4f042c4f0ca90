//! Rail Toolbar - the player-facing rail construction interface
//!
//! Turns toolbar clicks, hotkeys and viewport drags into bit-packed command
//! records for a host engine and keeps the placement highlight a renderer
//! draws. The host engine, the map and the renderer stay outside this crate,
//! behind the [`command::CommandEngine`] and [`map::MapView`] traits.

use bevy::app::PluginGroup;
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;
use bevy::prelude::*;

use crate::command::CommandPlugin;
use crate::input::InputPlugin;
use crate::lifecycle::LifecyclePlugin;
use crate::sandbox::ScriptedHostPlugin;
use crate::toolbar::RailToolbarPlugin;
use crate::ui::RailToolbarUiPlugin;
use crate::ui::logging::TerminalLogPlugin;

pub mod blueprint;
pub mod command;
pub mod constants;
pub mod context;
pub mod highlight;
pub mod input;
pub mod lifecycle;
pub mod map;
pub mod pickers;
pub mod placement;
pub mod rail;
pub mod sandbox;
pub mod settings;
pub mod toolbar;
pub mod ui;

/// Plugin group for toolbar logic (headless-compatible)
/// Needs a host that inserts [`command::HostEngine`] and answers
/// [`command::CommandRequest`]s.
pub struct RailToolbarPlugins;

impl PluginGroup for RailToolbarPlugins {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(CommandPlugin)
            .add(RailToolbarPlugin)
            .add(LifecyclePlugin)
            .add(TerminalLogPlugin::default())
    }
}

/// Plugin group for player input and the on-screen toolbar (requires a window)
pub struct InputPlugins;

impl PluginGroup for InputPlugins {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(InputPlugin)
            .add(RailToolbarUiPlugin)
    }
}

/// Windowed sandbox: the toolbar against the scripted engine.
pub fn app() -> App {
    let mut app = App::new();

    app.add_plugins((DefaultPlugins, FpsOverlayPlugin::default()))
        .add_plugins(RailToolbarPlugins)
        .add_plugins(ScriptedHostPlugin::default())
        .add_plugins(InputPlugins)
        .add_systems(Startup, setup_camera);

    app
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

#[cfg(test)]
pub mod test_utils;
