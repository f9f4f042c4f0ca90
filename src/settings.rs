//! Player and game settings the rail toolbar consults.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    MAX_SIGNAL_DENSITY, MAX_STATION_SIZE, MAX_STATION_SPREAD, MIN_SIGNAL_DENSITY,
};
use crate::rail::{SignalCycle, SignalGuiMode};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How the toolbar picks its rail type when it is first opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultRailType {
    #[default]
    First,
    Last,
    MostUsed,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailGuiSettings {
    /// Play a construction sound when a command succeeds.
    pub confirm_sound: bool,
    pub click_beep: bool,
    /// Building track over signals removes them.
    pub auto_remove_signals: bool,
    /// Keep the tool active after placing stations, depots and tunnels.
    pub persistent_building_tools: bool,
    /// Open the landscaping toolbar alongside the rail toolbar.
    pub link_terraform_toolbar: bool,
    pub station_dragdrop: bool,
    pub station_numtracks: u8,
    pub station_platlength: u8,
    pub station_show_coverage: bool,
    /// Largest extent a station may span.
    pub station_spread: u8,
    pub distant_join_stations: bool,
    pub catchment_radius: u8,
    pub drag_signals_density: u8,
    pub drag_signals_fixed_distance: bool,
    pub cycle_signal_types: SignalCycle,
    pub signal_gui_mode: SignalGuiMode,
    pub semaphore_build_before: i32,
    pub default_rail_type: DefaultRailType,
    /// Ctrl inverts this: placing a depot keeps the tool when they differ.
    pub keep_depot_tools: bool,
    /// Allow ctrl to level land under polyline diagonals.
    pub enable_polyrail_terraform: bool,
    /// Ctrl-click an existing station to pick it as the join target.
    pub improved_station_join: bool,
}

impl Default for RailGuiSettings {
    fn default() -> Self {
        Self {
            confirm_sound: true,
            click_beep: true,
            auto_remove_signals: false,
            persistent_building_tools: false,
            link_terraform_toolbar: false,
            station_dragdrop: false,
            station_numtracks: 1,
            station_platlength: 5,
            station_show_coverage: false,
            station_spread: 12,
            distant_join_stations: true,
            catchment_radius: 4,
            drag_signals_density: 4,
            drag_signals_fixed_distance: false,
            cycle_signal_types: SignalCycle::PathOnly,
            signal_gui_mode: SignalGuiMode::PathOnly,
            semaphore_build_before: 1950,
            default_rail_type: DefaultRailType::First,
            keep_depot_tools: false,
            enable_polyrail_terraform: false,
            improved_station_join: false,
        }
    }
}

impl RailGuiSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: RailGuiSettings = toml::from_str(text)?;
        Ok(settings.clamped())
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        info!("Loaded rail toolbar settings from {}", path.display());
        Ok(settings)
    }

    /// Force every numeric setting into its legal range.
    pub fn clamped(mut self) -> Self {
        self.station_numtracks = self.station_numtracks.clamp(1, MAX_STATION_SIZE);
        self.station_platlength = self.station_platlength.clamp(1, MAX_STATION_SIZE);
        self.station_spread = self.station_spread.clamp(1, MAX_STATION_SPREAD);
        self.drag_signals_density = self
            .drag_signals_density
            .clamp(MIN_SIGNAL_DENSITY, MAX_SIGNAL_DENSITY);
        self.catchment_radius = self.catchment_radius.min(10);
        self
    }
}
