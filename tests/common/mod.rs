use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use rail_toolbar::RailToolbarPlugins;
use rail_toolbar::command::HostEngine;
use rail_toolbar::rail::RailType;
use rail_toolbar::sandbox::{ScriptedEngine, ScriptedHostPlugin};
use rail_toolbar::toolbar::ShowRailToolbar;

/// Headless app with an open rail toolbar on a 64x64 scripted map.
pub fn open_toolbar_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(RailToolbarPlugins)
        .add_plugins(ScriptedHostPlugin::default());
    app.world_mut().write_message(ShowRailToolbar {
        railtype: RailType::RAIL,
    });
    app.update();
    app
}

pub fn engine(app: &mut App) -> &mut ScriptedEngine {
    app.world_mut()
        .resource_mut::<HostEngine>()
        .into_inner()
        .as_scripted_mut()
        .expect("scripted host")
}

/// Send every message, then run one frame.
pub fn send_and_update<M: Message>(app: &mut App, messages: impl IntoIterator<Item = M>) {
    for message in messages {
        app.world_mut().write_message(message);
    }
    app.update();
}

/// Messages of type `T` from the last two frames.
pub fn read_messages<T: Message + Clone>(app: &mut App) -> Vec<T> {
    let mut state: SystemState<MessageReader<T>> = SystemState::new(app.world_mut());
    let mut reader = state.get_mut(app.world_mut());
    reader.read().cloned().collect()
}
