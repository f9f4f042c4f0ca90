//! In-memory engine for the sandbox binary and the tests.
//!
//! [`ScriptedEngine`] keeps a small rail map in hash maps and answers every
//! command with success unless a scripted response says otherwise. Executed
//! commands update the map closely enough for the toolbar to see its own
//! work: track, depots, signals and cleared areas.

use std::any::Any;
use std::collections::HashMap;

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::params::get_bits;
use crate::command::{
    CommandContainer, CommandCost, CommandEngine, CommandFlags, CommandId, CommandOutcome,
    CommandRequest, HostEngine,
};
use crate::map::{
    Axis, DiagDirection, MapView, RailTileKind, SignalFacing, SignalInfo, StationTileInfo,
    TileArea, Track, TrackBits, tile_from_index,
};
use crate::rail::{RailType, SignalType, SignalVariant, StationId};

/// Fixed price of every successful command, so estimates show something.
const COMMAND_COST: i64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct RailTile {
    pub railtype: RailType,
    pub kind: RailTileKind,
    pub tracks: TrackBits,
    pub signals: Vec<SignalInfo>,
    pub depot: Option<DiagDirection>,
}

/// A canned answer for commands of one kind, optionally only at one tile.
#[derive(Debug, Clone, PartialEq)]
struct ScriptedResponse {
    cmd: CommandId,
    tile: Option<TilePos>,
    cost: CommandCost,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    pub size: (u32, u32),
    /// North-corner heights; missing corners are at sea level.
    pub heights: HashMap<TilePos, u8>,
    pub rails: HashMap<TilePos, RailTile>,
    pub station_tiles: HashMap<TilePos, StationTileInfo>,
    /// Bridge heads mapped to their far end.
    pub bridges: HashMap<TilePos, TilePos>,
    pub waypoint_axes: HashMap<TilePos, Axis>,
    /// Answer to every join query.
    pub nearby_stations: Vec<StationId>,
    scripted: Vec<ScriptedResponse>,
    /// Every command executed so far, in order.
    pub executed: Vec<CommandContainer>,
}

impl ScriptedEngine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..default()
        }
    }

    pub fn lay_rail(&mut self, tile: TilePos, tracks: TrackBits) {
        self.lay_rail_with(tile, tracks, RailType::RAIL);
    }

    pub fn lay_rail_with(&mut self, tile: TilePos, tracks: TrackBits, railtype: RailType) {
        let rail = self.rails.entry(tile).or_insert(RailTile {
            railtype,
            kind: RailTileKind::Normal,
            tracks: TrackBits::NONE,
            signals: Vec::new(),
            depot: None,
        });
        rail.tracks |= tracks;
    }

    /// A path signal on the tile's first track.
    pub fn put_signals(&mut self, tile: TilePos) {
        let Some(rail) = self.rails.get_mut(&tile) else {
            return;
        };
        let Some(track) = rail.tracks.first_track() else {
            return;
        };
        rail.kind = RailTileKind::Signals;
        rail.signals = vec![SignalInfo {
            track,
            signal_type: SignalType::PbsOneway,
            variant: SignalVariant::Electric,
            facing: SignalFacing::Along,
        }];
    }

    pub fn put_depot(&mut self, tile: TilePos, dir: DiagDirection) {
        self.rails.insert(
            tile,
            RailTile {
                railtype: RailType::RAIL,
                kind: RailTileKind::Depot,
                tracks: TrackBits::NONE,
                signals: Vec::new(),
                depot: Some(dir),
            },
        );
    }

    pub fn set_corner_height(&mut self, tile: TilePos, height: u8) {
        self.heights.insert(tile, height);
    }

    /// Answer `cmd` at `tile` with `cost`, both when estimating and
    /// executing. Later scripts win over earlier ones.
    pub fn script(&mut self, cmd: CommandId, tile: TilePos, cost: CommandCost) {
        self.scripted.push(ScriptedResponse {
            cmd,
            tile: Some(tile),
            cost,
        });
    }

    /// Answer `cmd` anywhere with `cost`.
    pub fn script_all(&mut self, cmd: CommandId, cost: CommandCost) {
        self.scripted.push(ScriptedResponse {
            cmd,
            tile: None,
            cost,
        });
    }

    fn scripted_cost(&self, command: &CommandContainer) -> Option<CommandCost> {
        self.scripted
            .iter()
            .rev()
            .find(|entry| {
                entry.cmd == command.cmd && entry.tile.is_none_or(|tile| tile == command.tile)
            })
            .map(|entry| entry.cost.clone())
    }

    fn default_cost(&self, command: &CommandContainer) -> CommandCost {
        let cost = CommandCost::ok(COMMAND_COST);
        match command.cmd {
            CommandId::BuildRailroadTrack | CommandId::RemoveRailroadTrack => {
                cost.with_end_tile(tile_from_index(command.p1, self.size.0))
            }
            CommandId::BuildSingleRail | CommandId::RemoveSingleRail => {
                cost.with_end_tile(command.tile)
            }
            _ => cost,
        }
    }

    fn apply(&mut self, command: &CommandContainer) {
        let width = self.size.0;
        match command.cmd {
            CommandId::BuildSingleRail => {
                if let Some(track) = Track::from_index(get_bits(command.p2, 0, 3)) {
                    self.lay_rail_with(command.tile, track.bit(), RailType(command.p1 as u8));
                }
            }
            CommandId::RemoveSingleRail => {
                if let Some(track) = Track::from_index(get_bits(command.p2, 0, 3)) {
                    self.remove_tracks(command.tile, track.bit());
                }
            }
            CommandId::BuildRailroadTrack | CommandId::RemoveRailroadTrack => {
                let Some(track) = Track::from_index(get_bits(command.p2, 6, 3)) else {
                    return;
                };
                let end = tile_from_index(command.p1, width);
                let railtype = RailType(get_bits(command.p2, 0, 6) as u8);
                for tile in line_tiles(command.tile, end, track) {
                    if command.cmd == CommandId::BuildRailroadTrack {
                        self.lay_rail_with(tile, track.bit(), railtype);
                    } else {
                        self.remove_tracks(tile, track.bit());
                    }
                }
            }
            CommandId::BuildTrainDepot => {
                if let Some(dir) = DiagDirection::from_index(command.p2) {
                    self.put_depot(command.tile, dir);
                    if let Some(rail) = self.rails.get_mut(&command.tile) {
                        rail.railtype = RailType(command.p1 as u8);
                    }
                }
            }
            CommandId::BuildSignals => {
                let Some(track) = Track::from_index(get_bits(command.p1, 0, 3)) else {
                    return;
                };
                let variant = if get_bits(command.p1, 4, 1) == 1 {
                    SignalVariant::Semaphore
                } else {
                    SignalVariant::Electric
                };
                let signal_type = SignalType::ALL
                    .get(get_bits(command.p1, 5, 3) as usize)
                    .copied()
                    .unwrap_or_default();
                let convert = get_bits(command.p1, 8, 1) == 1;
                if let Some(rail) = self.rails.get_mut(&command.tile) {
                    rail.kind = RailTileKind::Signals;
                    let existing = rail.signals.iter_mut().find(|signal| signal.track == track);
                    match existing {
                        // Building over the same signal turns it around.
                        Some(signal)
                            if !convert
                                && signal.signal_type == signal_type
                                && signal.variant == variant =>
                        {
                            signal.facing = signal.facing.cycle(signal_type);
                        }
                        Some(signal) => {
                            signal.signal_type = signal_type;
                            signal.variant = variant;
                        }
                        None => rail.signals.push(SignalInfo {
                            track,
                            signal_type,
                            variant,
                            facing: SignalFacing::new_signal(signal_type),
                        }),
                    }
                }
            }
            CommandId::RemoveSignals => {
                if let Some(rail) = self.rails.get_mut(&command.tile) {
                    rail.signals.retain(|signal| signal.track as u32 != command.p1);
                    if rail.signals.is_empty() && rail.kind == RailTileKind::Signals {
                        rail.kind = RailTileKind::Normal;
                    }
                }
            }
            CommandId::ClearArea => {
                let area = TileArea::from_corners(tile_from_index(command.p1, width), command.tile);
                for tile in area.tiles() {
                    self.rails.remove(&tile);
                    self.station_tiles.remove(&tile);
                }
            }
            _ => {}
        }
    }

    fn remove_tracks(&mut self, tile: TilePos, tracks: TrackBits) {
        let Some(rail) = self.rails.get_mut(&tile) else {
            return;
        };
        rail.tracks = rail.tracks & !tracks;
        rail.signals.retain(|signal| !tracks.contains(signal.track));
        if rail.tracks.is_empty() && rail.kind != RailTileKind::Depot {
            self.rails.remove(&tile);
        }
    }
}

/// Tiles a straight track command covers. Diagonal pieces alternate
/// between neighbouring tiles, so only their end tiles are marked.
fn line_tiles(start: TilePos, end: TilePos, track: Track) -> Vec<TilePos> {
    match track {
        Track::X if start.y == end.y => (start.x.min(end.x)..=start.x.max(end.x))
            .map(|x| TilePos { x, y: start.y })
            .collect(),
        Track::Y if start.x == end.x => (start.y.min(end.y)..=start.y.max(end.y))
            .map(|y| TilePos { x: start.x, y })
            .collect(),
        _ if start == end => vec![start],
        _ => vec![start, end],
    }
}

impl MapView for ScriptedEngine {
    fn map_size(&self) -> (u32, u32) {
        self.size
    }

    fn corner_height(&self, tile: TilePos) -> u8 {
        self.heights.get(&tile).copied().unwrap_or(0)
    }

    fn rail_tile_kind(&self, tile: TilePos) -> Option<RailTileKind> {
        self.rails.get(&tile).map(|rail| rail.kind)
    }

    fn track_bits(&self, tile: TilePos) -> TrackBits {
        match self.rails.get(&tile) {
            Some(rail) if rail.kind != RailTileKind::Depot => rail.tracks,
            _ => TrackBits::NONE,
        }
    }

    fn rail_type_at(&self, tile: TilePos) -> Option<RailType> {
        self.rails.get(&tile).map(|rail| rail.railtype)
    }

    fn depot_direction(&self, tile: TilePos) -> Option<DiagDirection> {
        self.rails.get(&tile).and_then(|rail| rail.depot)
    }

    fn signals_on(&self, tile: TilePos) -> Vec<SignalInfo> {
        self.rails
            .get(&tile)
            .map(|rail| rail.signals.clone())
            .unwrap_or_default()
    }

    fn station_tile(&self, tile: TilePos) -> Option<StationTileInfo> {
        self.station_tiles.get(&tile).copied()
    }

    fn bridge_other_end(&self, tile: TilePos) -> Option<TilePos> {
        self.bridges.get(&tile).copied()
    }

    fn axis_for_new_waypoint(&self, tile: TilePos) -> Option<Axis> {
        self.waypoint_axes.get(&tile).copied()
    }

    fn stations_near(&self, _area: TileArea, _distance: u32, _waypoints: bool) -> Vec<StationId> {
        self.nearby_stations.clone()
    }

    fn rail_type_census(&self) -> Vec<(RailType, u32)> {
        let mut counts: Vec<(RailType, u32)> = Vec::new();
        for rail in self.rails.values() {
            match counts.iter_mut().find(|(rt, _)| *rt == rail.railtype) {
                Some((_, count)) => *count += 1,
                None => counts.push((rail.railtype, 1)),
            }
        }
        counts.sort();
        counts
    }
}

impl CommandEngine for ScriptedEngine {
    fn estimate(&self, command: &CommandContainer, _flags: CommandFlags) -> CommandCost {
        self.scripted_cost(command)
            .unwrap_or_else(|| self.default_cost(command))
    }

    fn execute(&mut self, command: &CommandContainer) -> CommandCost {
        let cost = self.estimate(command, CommandFlags::NONE);
        if cost.succeeded() {
            self.apply(command);
        }
        self.executed.push(command.clone());
        cost
    }
}

impl HostEngine {
    /// The engine as a [`ScriptedEngine`], when that is what the host runs.
    pub fn as_scripted_mut(&mut self) -> Option<&mut ScriptedEngine> {
        let engine: &mut dyn Any = self.0.as_mut();
        engine.downcast_mut()
    }
}

/// Answers command requests in the same frame using the [`HostEngine`].
pub fn execute_command_requests(
    mut engine: ResMut<HostEngine>,
    mut requests: MessageReader<CommandRequest>,
    mut outcomes: MessageWriter<CommandOutcome>,
) {
    for request in requests.read() {
        let cost = engine.0.execute(&request.command);
        debug!(
            "Executed {:?} at ({}, {}): {:?}",
            request.command.cmd, request.command.tile.x, request.command.tile.y, cost.result
        );
        outcomes.write(CommandOutcome {
            command: request.command.clone(),
            cost,
        });
    }
}

/// Installs a [`ScriptedEngine`] as host engine and answers requests with it.
pub struct ScriptedHostPlugin {
    pub width: u32,
    pub height: u32,
}

impl Default for ScriptedHostPlugin {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
        }
    }
}

impl Plugin for ScriptedHostPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HostEngine::new(ScriptedEngine::new(self.width, self.height)))
            .add_systems(
                Update,
                execute_command_requests.in_set(crate::toolbar::RailToolbarSet::Host),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandError, params};

    fn tile(x: u32, y: u32) -> TilePos {
        TilePos { x, y }
    }

    #[test]
    fn later_script_overrides_earlier() {
        let mut engine = ScriptedEngine::new(16, 16);
        engine.script_all(CommandId::BuildTunnel, CommandCost::ok(1));
        engine.script(
            CommandId::BuildTunnel,
            tile(2, 2),
            CommandCost::err(CommandError::Rejected("rock".into())),
        );
        let here = params::tunnel(tile(2, 2), RailType::RAIL);
        let there = params::tunnel(tile(3, 2), RailType::RAIL);
        assert!(engine.estimate(&here, CommandFlags::NONE).failed());
        assert_eq!(engine.estimate(&there, CommandFlags::NONE), CommandCost::ok(1));
    }

    #[test]
    fn executing_track_lays_rail() {
        let mut engine = ScriptedEngine::new(16, 16);
        let command =
            params::railroad_track(tile(2, 3), tile(5, 3), 16, RailType::ELECTRIC, Track::X, false, false);
        assert!(engine.execute(&command).succeeded());
        for x in 2..=5 {
            assert_eq!(engine.track_bits(tile(x, 3)), TrackBits::X);
        }
        assert_eq!(engine.rail_type_at(tile(3, 3)), Some(RailType::ELECTRIC));
        assert_eq!(engine.executed.len(), 1);
    }

    #[test]
    fn failed_command_leaves_map_alone() {
        let mut engine = ScriptedEngine::new(16, 16);
        engine.script_all(
            CommandId::BuildSingleRail,
            CommandCost::err(CommandError::InsufficientFunds { needed: 500 }),
        );
        let command = params::single_rail(tile(1, 1), RailType::RAIL, Track::Y, false, false);
        assert!(engine.execute(&command).failed());
        assert!(engine.rail_tile_kind(tile(1, 1)).is_none());
    }

    #[test]
    fn clearing_removes_rails_in_area() {
        let mut engine = ScriptedEngine::new(16, 16);
        engine.lay_rail(tile(1, 1), TrackBits::X);
        engine.lay_rail(tile(4, 4), TrackBits::Y);
        engine.execute(&params::clear_area(tile(0, 0), tile(2, 2), 16, false));
        assert!(engine.rail_tile_kind(tile(1, 1)).is_none());
        assert!(engine.rail_tile_kind(tile(4, 4)).is_some());
    }

    #[test]
    fn census_counts_tiles_per_type() {
        let mut engine = ScriptedEngine::new(16, 16);
        engine.lay_rail(tile(1, 1), TrackBits::X);
        engine.lay_rail_with(tile(2, 1), TrackBits::X, RailType::ELECTRIC);
        engine.lay_rail_with(tile(3, 1), TrackBits::X, RailType::ELECTRIC);
        assert_eq!(
            engine.rail_type_census(),
            vec![(RailType::RAIL, 1), (RailType::ELECTRIC, 2)]
        );
    }
}
