use bevy_ecs_tilemap::prelude::TilePos;

use crate::map::direction::{Axis, DiagDirection, Track, TrackBits};
use crate::map::tile::TileArea;
use crate::rail::{RailType, SignalType, SignalVariant, StationClassId, StationId};

/// Kind of a plain railway tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailTileKind {
    Normal,
    Signals,
    Depot,
}

/// Which way a signal shows, relative to the track's own direction
/// (`Trackdir::from_track`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalFacing {
    #[default]
    Along,
    Against,
    Both,
}

impl SignalFacing {
    /// Facing of a freshly built signal. Path signals are one-way.
    pub fn new_signal(signal_type: SignalType) -> Self {
        if signal_type.is_path_signal() {
            SignalFacing::Along
        } else {
            SignalFacing::Both
        }
    }

    /// Facing after building over an existing signal of the same kind.
    pub fn cycle(self, signal_type: SignalType) -> Self {
        match self {
            SignalFacing::Both => SignalFacing::Along,
            SignalFacing::Along => SignalFacing::Against,
            SignalFacing::Against if signal_type.is_path_signal() => SignalFacing::Along,
            SignalFacing::Against => SignalFacing::Both,
        }
    }

    /// How many builds over a fresh signal reach this facing.
    pub fn cycles_from_new(self, signal_type: SignalType) -> usize {
        let mut facing = Self::new_signal(signal_type);
        for presses in 0..3 {
            if facing == self {
                return presses;
            }
            facing = facing.cycle(signal_type);
        }
        0
    }

    pub fn reverse(self) -> Self {
        match self {
            SignalFacing::Along => SignalFacing::Against,
            SignalFacing::Against => SignalFacing::Along,
            SignalFacing::Both => SignalFacing::Both,
        }
    }
}

/// A signal standing on one track of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalInfo {
    pub track: Track,
    pub signal_type: SignalType,
    pub variant: SignalVariant,
    pub facing: SignalFacing,
}

/// Rail station or waypoint tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationTileInfo {
    pub station: StationId,
    pub axis: Axis,
    pub class: StationClassId,
    pub station_type: u16,
    pub is_waypoint: bool,
}

/// Read-only view of the map owned by the host game.
pub trait MapView {
    /// Width and height in tiles.
    fn map_size(&self) -> (u32, u32);

    /// Height of the tile's north corner; corners past the map edge report 0.
    fn corner_height(&self, tile: TilePos) -> u8;

    fn rail_tile_kind(&self, tile: TilePos) -> Option<RailTileKind>;

    /// Track pieces on a plain rail tile, empty for anything else.
    fn track_bits(&self, tile: TilePos) -> TrackBits;

    fn rail_type_at(&self, tile: TilePos) -> Option<RailType>;

    fn depot_direction(&self, tile: TilePos) -> Option<DiagDirection>;

    fn signals_on(&self, tile: TilePos) -> Vec<SignalInfo>;

    fn station_tile(&self, tile: TilePos) -> Option<StationTileInfo>;

    /// Far end when `tile` is a bridge head.
    fn bridge_other_end(&self, tile: TilePos) -> Option<TilePos>;

    /// Axis a new waypoint would take on this tile, if one can go there.
    fn axis_for_new_waypoint(&self, tile: TilePos) -> Option<Axis>;

    /// Stations (or waypoints) the area could join, within `distance` tiles.
    fn stations_near(&self, area: TileArea, distance: u32, waypoints: bool) -> Vec<StationId>;

    /// Track bits of a rail station tile that carries rails.
    fn station_rail_tracks(&self, tile: TilePos) -> Option<TrackBits> {
        self.station_tile(tile)
            .map(|info| Track::from_axis(info.axis).bit())
    }

    fn station_at(&self, tile: TilePos) -> Option<StationId> {
        self.station_tile(tile).map(|info| info.station)
    }

    /// Number of tiles laid with each rail type.
    fn rail_type_census(&self) -> Vec<(RailType, u32)> {
        let (width, height) = self.map_size();
        let mut counts: Vec<(RailType, u32)> = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let Some(railtype) = self.rail_type_at(TilePos { x, y }) else {
                    continue;
                };
                match counts.iter_mut().find(|(rt, _)| *rt == railtype) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((railtype, 1)),
                }
            }
        }
        counts
    }
}
