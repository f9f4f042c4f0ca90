//! Bit packing of command parameters.
//!
//! Each builder returns a ready [`CommandContainer`] with the engine's
//! parameter layout and the error headline for the command. Tiles carried in
//! `p1` are linear indices, so builders that take a second tile also take the
//! map width.

use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::container::CommandContainer;
use crate::command::opcode::{CommandId, ErrorMessage};
use crate::constants::TRANSPORT_RAIL;
use crate::map::{Axis, DiagDirection, TilePosExt, Track};
use crate::rail::{RailType, SignalType, SignalVariant, StationClassId, StationId};

/// Overwrite `len` bits of `target` starting at `start` with `value`.
pub fn set_bits(target: &mut u32, start: u8, len: u8, value: u32) {
    let mask = ((1u64 << len) - 1) as u32;
    *target = (*target & !(mask << start)) | ((value & mask) << start);
}

pub fn get_bits(source: u32, start: u8, len: u8) -> u32 {
    let mask = ((1u64 << len) - 1) as u32;
    (source >> start) & mask
}

pub fn single_rail(
    tile: TilePos,
    railtype: RailType,
    track: Track,
    auto_remove_signals: bool,
    remove: bool,
) -> CommandContainer {
    let mut p2 = 0;
    set_bits(&mut p2, 0, 3, track as u32);
    set_bits(&mut p2, 3, 1, auto_remove_signals as u32);
    if remove {
        CommandContainer::new(tile, railtype.0 as u32, p2, CommandId::RemoveSingleRail)
            .with_error(ErrorMessage::CantRemoveRailroadTrack)
    } else {
        CommandContainer::new(tile, railtype.0 as u32, p2, CommandId::BuildSingleRail)
            .with_error(ErrorMessage::CantBuildRailroadTrack)
    }
}

pub fn railroad_track(
    start: TilePos,
    end: TilePos,
    map_width: u32,
    railtype: RailType,
    track: Track,
    auto_remove_signals: bool,
    remove: bool,
) -> CommandContainer {
    let mut p2 = 0;
    set_bits(&mut p2, 0, 6, railtype.0 as u32);
    set_bits(&mut p2, 6, 3, track as u32);
    set_bits(&mut p2, 11, 1, auto_remove_signals as u32);
    let p1 = end.map_index(map_width);
    if remove {
        CommandContainer::new(start, p1, p2, CommandId::RemoveRailroadTrack)
            .with_error(ErrorMessage::CantRemoveRailroadTrack)
    } else {
        CommandContainer::new(start, p1, p2, CommandId::BuildRailroadTrack)
            .with_error(ErrorMessage::CantBuildRailroadTrack)
    }
}

pub fn train_depot(tile: TilePos, railtype: RailType, dir: DiagDirection) -> CommandContainer {
    CommandContainer::new(tile, railtype.0 as u32, dir as u32, CommandId::BuildTrainDepot)
        .with_error(ErrorMessage::CantBuildTrainDepot)
}

/// Shape and identity of a station or waypoint to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationParams {
    pub railtype: RailType,
    pub axis: Axis,
    /// Platforms for stations, width for waypoints.
    pub numtracks: u32,
    /// Platform length for stations, height for waypoints.
    pub platlength: u32,
    /// Ctrl held: allow building next to an existing station without joining.
    pub adjacent: bool,
    pub class: StationClassId,
    pub station_type: u16,
    pub station: StationId,
}

fn station_p1(params: &StationParams) -> u32 {
    let mut p1 = 0;
    set_bits(&mut p1, 0, 6, params.railtype.0 as u32);
    set_bits(&mut p1, 6, 1, params.axis as u32);
    set_bits(&mut p1, 8, 8, params.numtracks);
    set_bits(&mut p1, 16, 8, params.platlength);
    set_bits(&mut p1, 24, 1, params.adjacent as u32);
    p1
}

fn station_p2(class: StationClassId, station_type: u16, station: StationId) -> u32 {
    let mut p2 = 0;
    set_bits(&mut p2, 0, 8, class.0 as u32);
    set_bits(&mut p2, 8, 8, station_type as u32);
    set_bits(&mut p2, 16, 16, station.0 as u32);
    p2
}

pub fn rail_station(origin: TilePos, params: &StationParams) -> CommandContainer {
    CommandContainer::new(
        origin,
        station_p1(params),
        station_p2(params.class, params.station_type, params.station),
        CommandId::BuildRailStation,
    )
    .with_error(ErrorMessage::CantBuildRailroadStation)
}

/// Waypoints always belong to the waypoint class.
pub fn rail_waypoint(origin: TilePos, params: &StationParams) -> CommandContainer {
    CommandContainer::new(
        origin,
        station_p1(params),
        station_p2(StationClassId::WAYPOINT, params.station_type, params.station),
        CommandId::BuildRailWaypoint,
    )
    .with_error(ErrorMessage::CantBuildTrainWaypoint)
}

/// Command that can never succeed, posted to surface the engine's reason
/// why no waypoint fits on a tile.
pub fn failing_waypoint(tile: TilePos) -> CommandContainer {
    let mut p1 = 0;
    set_bits(&mut p1, 8, 8, 1);
    set_bits(&mut p1, 16, 8, 1);
    CommandContainer::new(
        tile,
        p1,
        station_p2(StationClassId::WAYPOINT, 0, StationId::INVALID),
        CommandId::BuildRailWaypoint,
    )
    .with_error(ErrorMessage::CantBuildTrainWaypoint)
}

pub fn remove_from_station(
    start: TilePos,
    end: TilePos,
    map_width: u32,
    keep_rail: bool,
) -> CommandContainer {
    CommandContainer::new(
        end,
        start.map_index(map_width),
        keep_rail as u32,
        CommandId::RemoveFromRailStation,
    )
    .with_error(ErrorMessage::CantRemovePartOfStation)
}

pub fn remove_from_waypoint(
    start: TilePos,
    end: TilePos,
    map_width: u32,
    keep_rail: bool,
) -> CommandContainer {
    CommandContainer::new(
        end,
        start.map_index(map_width),
        keep_rail as u32,
        CommandId::RemoveFromRailWaypoint,
    )
    .with_error(ErrorMessage::CantRemoveTrainWaypoint)
}

/// Range of types clicking an existing signal cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalCycleRange {
    pub first: SignalType,
    pub last: SignalType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalParams {
    pub track: Track,
    pub fn_mod: bool,
    pub variant: SignalVariant,
    pub signal_type: SignalType,
    pub convert: bool,
    pub cycle: SignalCycleRange,
}

pub fn build_signals(tile: TilePos, params: &SignalParams) -> CommandContainer {
    let mut p1 = 0;
    set_bits(&mut p1, 0, 3, params.track as u32);
    set_bits(&mut p1, 3, 1, params.fn_mod as u32);
    set_bits(&mut p1, 4, 1, params.variant as u32);
    set_bits(&mut p1, 5, 3, params.signal_type as u32);
    set_bits(&mut p1, 8, 1, params.convert as u32);
    set_bits(&mut p1, 9, 6, params.cycle.first as u32 | (params.cycle.last as u32) << 3);
    let error = if params.convert {
        ErrorMessage::CantConvertSignalsHere
    } else {
        ErrorMessage::CantBuildSignalsHere
    };
    CommandContainer::new(tile, p1, 0, CommandId::BuildSignals).with_error(error)
}

pub fn remove_signals(tile: TilePos, track: Track) -> CommandContainer {
    CommandContainer::new(tile, track as u32, 0, CommandId::RemoveSignals)
        .with_error(ErrorMessage::CantRemoveSignalsFromHere)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalTrackParams {
    pub track: Track,
    pub variant: SignalVariant,
    pub fn_mod: bool,
    pub signal_type: SignalType,
    pub fixed_distance: bool,
    pub density: u8,
}

pub fn signal_track(
    start: TilePos,
    end: TilePos,
    map_width: u32,
    params: &SignalTrackParams,
    remove: bool,
) -> CommandContainer {
    let mut p2 = params.track as u32;
    set_bits(&mut p2, 4, 1, params.variant as u32);
    set_bits(&mut p2, 6, 1, params.fn_mod as u32);
    set_bits(&mut p2, 7, 3, params.signal_type as u32);
    set_bits(&mut p2, 10, 1, !params.fixed_distance as u32);
    set_bits(&mut p2, 24, 8, params.density as u32);
    let p1 = end.map_index(map_width);
    if remove {
        CommandContainer::new(start, p1, p2, CommandId::RemoveSignalTrack)
            .with_error(ErrorMessage::CantRemoveSignalsFromHere)
    } else {
        CommandContainer::new(start, p1, p2, CommandId::BuildSignalTrack)
            .with_error(ErrorMessage::CantBuildSignalsHere)
    }
}

pub fn tunnel(tile: TilePos, railtype: RailType) -> CommandContainer {
    let p1 = railtype.0 as u32 | TRANSPORT_RAIL << 8;
    CommandContainer::new(tile, p1, 0, CommandId::BuildTunnel)
        .with_error(ErrorMessage::CantBuildTunnelHere)
}

pub fn bridge(
    start: TilePos,
    end: TilePos,
    map_width: u32,
    bridge_type: u8,
    railtype: RailType,
) -> CommandContainer {
    let p2 = bridge_type as u32 | (railtype.0 as u32) << 8 | TRANSPORT_RAIL << 15;
    CommandContainer::new(end, start.map_index(map_width), p2, CommandId::BuildBridge)
        .with_error(ErrorMessage::CantBuildBridgeHere)
}

pub fn convert_rail(
    start: TilePos,
    end: TilePos,
    map_width: u32,
    railtype: RailType,
    diagonal: bool,
) -> CommandContainer {
    let p2 = railtype.0 as u32 | (diagonal as u32) << 6;
    CommandContainer::new(end, start.map_index(map_width), p2, CommandId::ConvertRail)
        .with_error(ErrorMessage::CantConvertRailType)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelMode {
    Level = 0,
    Lower = 1,
    Raise = 2,
}

pub fn level_land(
    start: TilePos,
    end: TilePos,
    map_width: u32,
    mode: LevelMode,
    diagonal: bool,
) -> CommandContainer {
    let p2 = diagonal as u32 | (mode as u32) << 1;
    CommandContainer::new(end, start.map_index(map_width), p2, CommandId::LevelLand)
        .with_error(ErrorMessage::CantLevelLand)
}

pub fn clear_area(
    start: TilePos,
    end: TilePos,
    map_width: u32,
    diagonal: bool,
) -> CommandContainer {
    CommandContainer::new(
        end,
        start.map_index(map_width),
        diagonal as u32,
        CommandId::ClearArea,
    )
    .with_error(ErrorMessage::CantClearArea)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: u32 = 64;

    fn tile(x: u32, y: u32) -> TilePos {
        TilePos { x, y }
    }

    #[test]
    fn set_bits_replaces_only_the_field() {
        let mut value = 0xFFFF_FFFF;
        set_bits(&mut value, 4, 4, 0x3);
        assert_eq!(value, 0xFFFF_FF3F);
        set_bits(&mut value, 0, 32, 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn single_rail_layout() {
        let cmd = single_rail(tile(3, 4), RailType::ELECTRIC, Track::Lower, true, false);
        assert_eq!(cmd.cmd, CommandId::BuildSingleRail);
        assert_eq!(cmd.tile, tile(3, 4));
        assert_eq!(cmd.p1, 1);
        assert_eq!(cmd.p2, 3 | 1 << 3);

        let removal = single_rail(tile(3, 4), RailType::RAIL, Track::Y, false, true);
        assert_eq!(removal.cmd, CommandId::RemoveSingleRail);
        assert_eq!(removal.error, Some(ErrorMessage::CantRemoveRailroadTrack));
    }

    #[test]
    fn railroad_track_layout() {
        let cmd = railroad_track(
            tile(1, 1),
            tile(9, 1),
            WIDTH,
            RailType::MONORAIL,
            Track::Right,
            true,
            false,
        );
        assert_eq!(cmd.tile, tile(1, 1));
        assert_eq!(cmd.p1, WIDTH + 9);
        assert_eq!(cmd.p2, 2 | 5 << 6 | 1 << 11);
    }

    #[test]
    fn depot_layout() {
        let cmd = train_depot(tile(2, 2), RailType::ELECTRIC, DiagDirection::Sw);
        assert_eq!((cmd.p1, cmd.p2), (1, 2));
    }

    #[test]
    fn station_and_waypoint_layout() {
        let params = StationParams {
            railtype: RailType::ELECTRIC,
            axis: Axis::Y,
            numtracks: 3,
            platlength: 6,
            adjacent: true,
            class: StationClassId(5),
            station_type: 2,
            station: StationId::NEW,
        };
        let station = rail_station(tile(4, 4), &params);
        assert_eq!(station.p1, 1 | 1 << 6 | 3 << 8 | 6 << 16 | 1 << 24);
        assert_eq!(station.p2, 5 | 2 << 8 | 0xFFFE << 16);

        let waypoint = rail_waypoint(tile(4, 4), &params);
        assert_eq!(waypoint.p1, station.p1);
        assert_eq!(waypoint.p2, 1 | 2 << 8 | 0xFFFE << 16);
    }

    #[test]
    fn failing_waypoint_has_no_rail_type() {
        let cmd = failing_waypoint(tile(8, 8));
        assert_eq!(cmd.p1, 1 << 8 | 1 << 16);
        assert_eq!(cmd.p2, 1 | 0xFFFF << 16);
    }

    #[test]
    fn station_removal_keeps_rail_without_fn() {
        let cmd = remove_from_station(tile(1, 0), tile(2, 0), WIDTH, true);
        assert_eq!(cmd.tile, tile(2, 0));
        assert_eq!(cmd.p1, 1);
        assert_eq!(cmd.p2, 1);
    }

    #[test]
    fn signal_layout() {
        let params = SignalParams {
            track: Track::Left,
            fn_mod: true,
            variant: SignalVariant::Semaphore,
            signal_type: SignalType::Combo,
            convert: true,
            cycle: SignalCycleRange {
                first: SignalType::Normal,
                last: SignalType::LAST,
            },
        };
        let cmd = build_signals(tile(0, 0), &params);
        assert_eq!(cmd.p1, 4 | 1 << 3 | 1 << 4 | 3 << 5 | 1 << 8 | (5 << 3) << 9);
        assert_eq!(cmd.p2, 0);
        assert_eq!(cmd.error, Some(ErrorMessage::CantConvertSignalsHere));
    }

    #[test]
    fn signal_track_layout() {
        let params = SignalTrackParams {
            track: Track::X,
            variant: SignalVariant::Electric,
            fn_mod: false,
            signal_type: SignalType::Pbs,
            fixed_distance: false,
            density: 4,
        };
        let cmd = signal_track(tile(0, 3), tile(10, 3), WIDTH, &params, true);
        assert_eq!(cmd.cmd, CommandId::RemoveSignalTrack);
        assert_eq!(cmd.p1, 3 * WIDTH + 10);
        assert_eq!(cmd.p2, 4 << 7 | 1 << 10 | 4 << 24);
    }

    #[test]
    fn tunnel_bridge_and_convert_layouts() {
        assert_eq!(tunnel(tile(5, 5), RailType::MAGLEV).p1, 3);

        let bridge = bridge(tile(1, 2), tile(6, 2), WIDTH, 9, RailType::ELECTRIC);
        assert_eq!(bridge.tile, tile(6, 2));
        assert_eq!(bridge.p1, 2 * WIDTH + 1);
        assert_eq!(bridge.p2, 9 | 1 << 8);

        let convert = convert_rail(tile(0, 0), tile(3, 3), WIDTH, RailType::ELECTRIC, true);
        assert_eq!(convert.p2, 1 | 1 << 6);
    }

    #[test]
    fn level_and_clear_layouts() {
        let level = level_land(tile(2, 2), tile(4, 5), WIDTH, LevelMode::Raise, true);
        assert_eq!(level.tile, tile(4, 5));
        assert_eq!(level.p1, 2 * WIDTH + 2);
        assert_eq!(level.p2, 1 | 2 << 1);

        let clear = clear_area(tile(2, 2), tile(4, 5), WIDTH, false);
        assert_eq!((clear.cmd, clear.p2), (CommandId::ClearArea, 0));
    }
}
