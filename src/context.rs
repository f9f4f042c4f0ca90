//! Shared environment for toolbar logic.
//!
//! Toolbar operations are plain methods that take a [`GuiContext`]. Systems
//! assemble the context from resources, and the effects the operations
//! produce are queued in [`PendingEffects`] until `flush_effects` turns them
//! into messages.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::{CommandContainer, CommandEngine, PlaySound, SoundEffect};
use crate::highlight::TileHighlight;
use crate::rail::{RailTypes, StationCatalog};
use crate::settings::RailGuiSettings;
use crate::toolbar::messages::{SelectStationRequest, ShowBridgePicker};

/// Modifier keys as seen by the toolbar.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierState {
    /// Ctrl: alternate behaviour of the current tool.
    pub fn_mod: bool,
    /// Shift: show the cost instead of building.
    pub estimate_mod: bool,
    /// Alt: remove instead of build.
    pub remove_mod: bool,
}

/// Current in-game year, used for the default signal variant.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameYear(pub i32);

impl Default for GameYear {
    fn default() -> Self {
        GameYear(1950)
    }
}

/// Company the local player controls; `None` while spectating.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCompany(pub Option<u8>);

impl Default for LocalCompany {
    fn default() -> Self {
        LocalCompany(Some(0))
    }
}

/// Outputs produced by toolbar logic during one system run.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct PendingEffects {
    pub commands: Vec<CommandContainer>,
    pub sounds: Vec<PlaySound>,
    pub log: Vec<String>,
    pub bridge_pickers: Vec<ShowBridgePicker>,
    pub station_selects: Vec<SelectStationRequest>,
}

impl PendingEffects {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
            && self.sounds.is_empty()
            && self.log.is_empty()
            && self.bridge_pickers.is_empty()
            && self.station_selects.is_empty()
    }
}

pub struct GuiContext<'a> {
    pub settings: &'a mut RailGuiSettings,
    pub engine: &'a dyn CommandEngine,
    pub highlight: &'a mut TileHighlight,
    pub catalog: &'a StationCatalog,
    pub railtypes: &'a RailTypes,
    pub mods: ModifierState,
    pub year: i32,
    pub effects: &'a mut PendingEffects,
}

impl GuiContext<'_> {
    pub fn map_width(&self) -> u32 {
        self.engine.map_size().0
    }

    pub fn post(&mut self, command: CommandContainer) {
        debug!(
            "Posting {:?} at ({}, {}) p1={:#x} p2={:#x}",
            command.cmd, command.tile.x, command.tile.y, command.p1, command.p2
        );
        self.effects.commands.push(command);
    }

    /// Construction feedback, honouring the confirm sound setting.
    pub fn construction_sound(&mut self, effect: SoundEffect, tile: TilePos) {
        if self.settings.confirm_sound {
            self.effects.sounds.push(PlaySound {
                effect,
                tile: Some(tile),
            });
        }
    }

    /// UI click feedback, honouring the click beep setting.
    pub fn beep(&mut self) {
        if self.settings.click_beep {
            self.effects.sounds.push(PlaySound {
                effect: SoundEffect::Click,
                tile: None,
            });
        }
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.effects.log.push(message.into());
    }
}
