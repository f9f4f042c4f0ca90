//! Copying rail infrastructure from one place and pasting it elsewhere.
//!
//! A blueprint stores pieces relative to the top corner of the copied
//! area. Pasting posts one ordinary build command per piece, so the engine
//! validates and charges for each of them separately.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::CommandContainer;
use crate::command::params::{self, SignalCycleRange, SignalParams, StationParams};
use crate::map::{
    Axis, DiagDirection, MapView, RailTileKind, SignalFacing, TileArea, TilePosExt, Track,
    Trackdir,
};
use crate::rail::{RailType, SignalType, SignalVariant, StationClassId, StationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintPiece {
    Track(Track),
    Signal {
        track: Track,
        signal_type: SignalType,
        variant: SignalVariant,
        facing: SignalFacing,
    },
    Depot(DiagDirection),
    Station {
        axis: Axis,
        class: StationClassId,
        station_type: u16,
        waypoint: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlueprintItem {
    pub dx: u32,
    pub dy: u32,
    pub piece: BlueprintPiece,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blueprint {
    pub width: u32,
    pub height: u32,
    pub items: Vec<BlueprintItem>,
}

impl Blueprint {
    /// Rail infrastructure inside the rectangle spanned by `start` and `end`.
    pub fn copy_area(map: &dyn MapView, start: TilePos, end: TilePos) -> Self {
        let area = TileArea::from_corners(start, end);
        let mut items = Vec::new();
        for tile in area.tiles() {
            let dx = tile.x - area.origin.x;
            let dy = tile.y - area.origin.y;
            let mut push = |piece| items.push(BlueprintItem { dx, dy, piece });

            if let Some(info) = map.station_tile(tile) {
                push(BlueprintPiece::Station {
                    axis: info.axis,
                    class: info.class,
                    station_type: info.station_type,
                    waypoint: info.is_waypoint,
                });
                continue;
            }
            match map.rail_tile_kind(tile) {
                Some(RailTileKind::Depot) => {
                    if let Some(dir) = map.depot_direction(tile) {
                        push(BlueprintPiece::Depot(dir));
                    }
                }
                Some(RailTileKind::Normal | RailTileKind::Signals) => {
                    for track in map.track_bits(tile).tracks() {
                        push(BlueprintPiece::Track(track));
                    }
                    for signal in map.signals_on(tile) {
                        push(BlueprintPiece::Signal {
                            track: signal.track,
                            signal_type: signal.signal_type,
                            variant: signal.variant,
                            facing: signal.facing,
                        });
                    }
                }
                None => {}
            }
        }
        debug!(
            "Copied {} blueprint pieces from a {}x{} area",
            items.len(),
            area.w,
            area.h
        );
        Self {
            width: area.w,
            height: area.h,
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The same blueprint turned a quarter clockwise.
    pub fn rotated(&self) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| BlueprintItem {
                dx: item.dy,
                dy: self.width - 1 - item.dx,
                piece: match item.piece {
                    BlueprintPiece::Track(track) => BlueprintPiece::Track(track.rotate_right()),
                    BlueprintPiece::Signal {
                        track,
                        signal_type,
                        variant,
                        facing,
                    } => BlueprintPiece::Signal {
                        track: track.rotate_right(),
                        signal_type,
                        variant,
                        facing: rotate_facing(track, facing),
                    },
                    BlueprintPiece::Depot(dir) => BlueprintPiece::Depot(dir.rotate_right()),
                    BlueprintPiece::Station {
                        axis,
                        class,
                        station_type,
                        waypoint,
                    } => BlueprintPiece::Station {
                        axis: axis.other(),
                        class,
                        station_type,
                        waypoint,
                    },
                },
            })
            .collect();
        Self {
            width: self.height,
            height: self.width,
            items,
        }
    }

    /// Build commands placing the blueprint with its top corner at
    /// `origin`. Track goes first so that signals and depots have something
    /// to attach to.
    pub fn commands(&self, origin: TilePos, railtype: RailType) -> Vec<CommandContainer> {
        let mut tracks = Vec::new();
        let mut structures = Vec::new();
        let mut signals = Vec::new();
        for item in &self.items {
            let tile = origin.add_xy(item.dx, item.dy);
            match item.piece {
                BlueprintPiece::Track(track) => {
                    tracks.push(params::single_rail(tile, railtype, track, false, false));
                }
                BlueprintPiece::Depot(dir) => {
                    structures.push(params::train_depot(tile, railtype, dir));
                }
                BlueprintPiece::Station {
                    axis,
                    class,
                    station_type,
                    waypoint,
                } => {
                    let station = StationParams {
                        railtype,
                        axis,
                        numtracks: 1,
                        platlength: 1,
                        adjacent: false,
                        class,
                        station_type,
                        station: StationId::INVALID,
                    };
                    structures.push(if waypoint {
                        params::rail_waypoint(tile, &station)
                    } else {
                        params::rail_station(tile, &station)
                    });
                }
                BlueprintPiece::Signal {
                    track,
                    signal_type,
                    variant,
                    facing,
                } => {
                    let command = params::build_signals(
                        tile,
                        &SignalParams {
                            track,
                            fn_mod: false,
                            variant,
                            signal_type,
                            convert: false,
                            cycle: SignalCycleRange {
                                first: SignalType::Normal,
                                last: SignalType::LAST,
                            },
                        },
                    );
                    // Each build over the new signal turns it once more.
                    let builds = 1 + facing.cycles_from_new(signal_type);
                    signals.extend(std::iter::repeat_n(command, builds));
                }
            }
        }
        tracks.extend(structures);
        tracks.extend(signals);
        tracks
    }
}

/// Facing is relative to the track's own direction, which does not always
/// survive a quarter turn.
fn rotate_facing(track: Track, facing: SignalFacing) -> SignalFacing {
    let turned = Trackdir::from_track(track).rotate_right();
    if turned == Trackdir::from_track(track.rotate_right()) {
        facing
    } else {
        facing.reverse()
    }
}

/// Blueprint copied with the blueprint tool, waiting to be pasted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlueprintState {
    pub active: Option<Blueprint>,
}

impl BlueprintState {
    pub fn rotate(&mut self) {
        if let Some(blueprint) = &self.active {
            self.active = Some(blueprint.rotated());
        }
    }

    pub fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandEngine, CommandId};
    use crate::map::{StationTileInfo, TrackBits};
    use crate::sandbox::ScriptedEngine;

    fn tile(x: u32, y: u32) -> TilePos {
        TilePos { x, y }
    }

    fn sample_engine() -> ScriptedEngine {
        let mut engine = ScriptedEngine::new(32, 32);
        engine.lay_rail(tile(10, 10), TrackBits::X);
        engine.lay_rail(tile(11, 10), TrackBits::X | TrackBits::UPPER);
        engine.put_signals(tile(11, 10));
        engine.put_depot(tile(12, 11), DiagDirection::Ne);
        engine.station_tiles.insert(
            tile(10, 11),
            StationTileInfo {
                station: StationId(3),
                axis: Axis::X,
                class: StationClassId::DEFAULT,
                station_type: 0,
                is_waypoint: false,
            },
        );
        engine
    }

    #[test]
    fn copy_is_relative_to_top_corner() {
        let engine = sample_engine();
        let blueprint = Blueprint::copy_area(&engine, tile(12, 11), tile(10, 10));
        assert_eq!((blueprint.width, blueprint.height), (3, 2));
        assert!(blueprint.items.contains(&BlueprintItem {
            dx: 1,
            dy: 0,
            piece: BlueprintPiece::Track(Track::Upper),
        }));
        assert!(blueprint.items.contains(&BlueprintItem {
            dx: 2,
            dy: 1,
            piece: BlueprintPiece::Depot(DiagDirection::Ne),
        }));
        assert!(blueprint.items.iter().any(|item| matches!(
            item.piece,
            BlueprintPiece::Signal {
                track: Track::X,
                ..
            }
        )));
    }

    #[test]
    fn rotation_turns_pieces_and_footprint() {
        let blueprint = Blueprint {
            width: 3,
            height: 2,
            items: vec![
                BlueprintItem {
                    dx: 0,
                    dy: 0,
                    piece: BlueprintPiece::Track(Track::X),
                },
                BlueprintItem {
                    dx: 2,
                    dy: 1,
                    piece: BlueprintPiece::Depot(DiagDirection::Ne),
                },
            ],
        };
        let rotated = blueprint.rotated();
        assert_eq!((rotated.width, rotated.height), (2, 3));
        assert_eq!(
            rotated.items[0],
            BlueprintItem {
                dx: 0,
                dy: 2,
                piece: BlueprintPiece::Track(Track::Y),
            }
        );
        assert_eq!(
            rotated.items[1],
            BlueprintItem {
                dx: 1,
                dy: 0,
                piece: BlueprintPiece::Depot(DiagDirection::Se),
            }
        );
        // Four quarter turns give the original back.
        assert_eq!(rotated.rotated().rotated().rotated(), blueprint);
    }

    #[test]
    fn paste_builds_track_before_signals() {
        let engine = sample_engine();
        let blueprint = Blueprint::copy_area(&engine, tile(10, 10), tile(12, 11));
        let commands = blueprint.commands(tile(20, 20), RailType::ELECTRIC);

        let first_signal = commands
            .iter()
            .position(|c| c.cmd == CommandId::BuildSignals)
            .expect("signal pasted");
        assert!(
            commands[..first_signal]
                .iter()
                .all(|c| c.cmd != CommandId::BuildSignals)
        );
        assert!(
            commands[first_signal..]
                .iter()
                .all(|c| c.cmd == CommandId::BuildSignals)
        );
        assert_eq!(commands[0].tile, tile(20, 20));
        assert!(commands.iter().any(|c| c.cmd == CommandId::BuildTrainDepot
            && c.tile == tile(22, 21)
            && c.p2 == DiagDirection::Ne as u32));
        assert!(commands.iter().any(|c| c.cmd == CommandId::BuildRailStation));
    }

    #[test]
    fn pasted_signals_keep_their_facing() {
        let mut engine = ScriptedEngine::new(32, 32);
        engine.lay_rail(tile(4, 4), TrackBits::X);
        engine.put_signals(tile(4, 4));
        if let Some(rail) = engine.rails.get_mut(&tile(4, 4)) {
            rail.signals[0].facing = SignalFacing::Against;
        }
        let blueprint = Blueprint::copy_area(&engine, tile(4, 4), tile(4, 4));

        let commands = blueprint.commands(tile(9, 9), RailType::RAIL);
        let builds = commands
            .iter()
            .filter(|c| c.cmd == CommandId::BuildSignals)
            .count();
        assert_eq!(builds, 2);

        for command in &commands {
            assert!(engine.execute(command).succeeded());
        }
        let pasted = engine.signals_on(tile(9, 9));
        assert_eq!(pasted.len(), 1);
        assert_eq!(pasted[0].facing, SignalFacing::Against);
    }

    #[test]
    fn rotation_keeps_signals_pointing_the_same_way_on_the_map() {
        let signal = |track, facing| Blueprint {
            width: 1,
            height: 1,
            items: vec![BlueprintItem {
                dx: 0,
                dy: 0,
                piece: BlueprintPiece::Signal {
                    track,
                    signal_type: SignalType::PbsOneway,
                    variant: SignalVariant::Electric,
                    facing,
                },
            }],
        };
        let facing_after_turn = |blueprint: Blueprint| match blueprint.rotated().items[0].piece {
            BlueprintPiece::Signal { facing, .. } => facing,
            other => panic!("unexpected piece {other:?}"),
        };
        assert_eq!(
            facing_after_turn(signal(Track::X, SignalFacing::Along)),
            SignalFacing::Along
        );
        assert_eq!(
            facing_after_turn(signal(Track::Y, SignalFacing::Along)),
            SignalFacing::Against
        );
        assert_eq!(
            facing_after_turn(signal(Track::Left, SignalFacing::Both)),
            SignalFacing::Both
        );
    }

    #[test]
    fn rotating_empty_state_is_harmless() {
        let mut state = BlueprintState::default();
        state.rotate();
        assert!(state.active.is_none());

        state.active = Some(Blueprint {
            width: 1,
            height: 1,
            items: vec![BlueprintItem {
                dx: 0,
                dy: 0,
                piece: BlueprintPiece::Signal {
                    track: Track::Left,
                    signal_type: SignalType::Pbs,
                    variant: SignalVariant::Electric,
                    facing: SignalFacing::Along,
                },
            }],
        });
        state.rotate();
        let item = state.active.as_ref().unwrap().items[0];
        assert!(matches!(
            item.piece,
            BlueprintPiece::Signal {
                track: Track::Upper,
                ..
            }
        ));
    }
}
