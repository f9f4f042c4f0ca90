//! Testing utilities for the rail toolbar
//!
//! [`TestGui`] owns everything a [`GuiContext`] borrows, so toolbar logic can
//! be driven directly without building an app. App-level tests use
//! [`toolbar_test_app`] and read the produced messages back with
//! [`drain_messages`].

use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::{CommandContainer, HostEngine};
use crate::context::{GameYear, GuiContext, ModifierState, PendingEffects};
use crate::highlight::TileHighlight;
use crate::rail::{RailType, RailTypes, StationCatalog};
use crate::sandbox::ScriptedEngine;
use crate::settings::RailGuiSettings;
use crate::toolbar::RailToolbarState;

pub const TEST_MAP_SIZE: u32 = 64;

pub fn tile(x: u32, y: u32) -> TilePos {
    TilePos { x, y }
}

/// An open rail toolbar with default settings on an empty 64x64 map.
pub struct TestGui {
    pub toolbar: RailToolbarState,
    pub settings: RailGuiSettings,
    pub highlight: TileHighlight,
    pub catalog: StationCatalog,
    pub railtypes: RailTypes,
    pub engine: ScriptedEngine,
    pub mods: ModifierState,
    pub year: i32,
    pub effects: PendingEffects,
}

impl TestGui {
    pub fn new() -> Self {
        let toolbar = RailToolbarState {
            open: true,
            railtype: RailType::RAIL,
            last_built_railtype: RailType::RAIL,
            ..default()
        };
        Self {
            toolbar,
            settings: RailGuiSettings::default(),
            highlight: TileHighlight::default(),
            catalog: StationCatalog::default(),
            railtypes: RailTypes::default(),
            engine: ScriptedEngine::new(TEST_MAP_SIZE, TEST_MAP_SIZE),
            mods: ModifierState::default(),
            year: GameYear::default().0,
            effects: PendingEffects::default(),
        }
    }

    /// Run toolbar logic against the fixture.
    pub fn run<R>(
        &mut self,
        f: impl FnOnce(&mut RailToolbarState, &mut GuiContext) -> R,
    ) -> R {
        let mut cx = GuiContext {
            settings: &mut self.settings,
            engine: &self.engine,
            highlight: &mut self.highlight,
            catalog: &self.catalog,
            railtypes: &self.railtypes,
            mods: self.mods,
            year: self.year,
            effects: &mut self.effects,
        };
        f(&mut self.toolbar, &mut cx)
    }

    /// Commands posted since the last call.
    pub fn take_commands(&mut self) -> Vec<CommandContainer> {
        std::mem::take(&mut self.effects.commands)
    }
}

impl Default for TestGui {
    fn default() -> Self {
        Self::new()
    }
}

/// Headless app with the toolbar plugins and the scripted host engine.
pub fn toolbar_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(crate::RailToolbarPlugins)
        .add_plugins(crate::sandbox::ScriptedHostPlugin::default());
    app
}

/// The scripted engine installed by [`toolbar_test_app`].
pub fn scripted_engine(app: &mut App) -> &mut ScriptedEngine {
    let engine = app.world_mut().resource_mut::<HostEngine>().into_inner();
    engine
        .as_scripted_mut()
        .expect("test app runs the scripted engine")
}

/// Messages of type `T` still buffered from the last two updates.
pub fn drain_messages<T: Message + Clone>(app: &mut App) -> Vec<T> {
    let mut state: SystemState<MessageReader<T>> = SystemState::new(app.world_mut());
    let mut reader = state.get_mut(app.world_mut());
    reader.read().cloned().collect()
}
