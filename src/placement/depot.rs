//! Depot placement, direction auto-detection and the rail pieces added in
//! front of a new depot.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::params;
use crate::command::{CommandCallback, CommandContainer, CommandCost, SoundEffect};
use crate::context::GuiContext;
use crate::map::{DiagDirection, DiagDirections, MapView, RailTileKind, TilePosExt, Track};
use crate::pickers::DepotDirection;
use crate::rail::RailType;
use crate::toolbar::RailToolbarState;

/// Extra track pieces on the tile in front of a depot, indexed by
/// `dir`, `dir + 4` and `dir + 8`.
const DEPOT_EXTRA_TRACK: [Track; 12] = [
    Track::Left,
    Track::Upper,
    Track::Upper,
    Track::Right,
    Track::X,
    Track::Y,
    Track::X,
    Track::Y,
    Track::Lower,
    Track::Left,
    Track::Right,
    Track::Lower,
];

/// Direction whose reachable tracks must already be present for the
/// matching piece in [`DEPOT_EXTRA_TRACK`] to be added.
const DEPOT_EXTRA_PROBE: [DiagDirection; 12] = [
    DiagDirection::Se,
    DiagDirection::Sw,
    DiagDirection::Se,
    DiagDirection::Sw,
    DiagDirection::Sw,
    DiagDirection::Nw,
    DiagDirection::Ne,
    DiagDirection::Se,
    DiagDirection::Nw,
    DiagDirection::Ne,
    DiagDirection::Nw,
    DiagDirection::Ne,
];

/// Neighbouring directions with rail a depot could face.
///
/// Track that actually leads into the tile wins over track merely passing
/// by; station tiles only count when their rails point at the tile.
pub fn find_rails_to_connect(map: &dyn MapView, tile: TilePos) -> DiagDirections {
    let mut directed = DiagDirections::NONE;
    let mut passing = DiagDirections::NONE;
    for dir in DiagDirection::ALL {
        let Some(neighbour) = tile.step(dir) else {
            continue;
        };
        let reaching = dir.reaches_tracks();
        if let Some(tracks) = map.station_rail_tracks(neighbour) {
            if tracks.intersects(reaching) {
                directed.insert(dir);
            }
            continue;
        }
        if !matches!(
            map.rail_tile_kind(neighbour),
            Some(RailTileKind::Normal | RailTileKind::Signals)
        ) {
            continue;
        }
        passing.insert(dir);
        if map.track_bits(neighbour).intersects(reaching) {
            directed.insert(dir);
        }
    }
    if directed.is_empty() { passing } else { directed }
}

/// Auto direction: the `rotation`-th connectable neighbour, or any of the
/// four when nothing is nearby.
pub fn autodetect_depot_direction(map: &dyn MapView, tile: TilePos, rotation: u8) -> DiagDirection {
    let candidates: Vec<DiagDirection> = find_rails_to_connect(map, tile).iter().collect();
    let candidates = if candidates.is_empty() {
        DiagDirection::ALL.to_vec()
    } else {
        candidates
    };
    candidates[rotation as usize % candidates.len()]
}

pub fn place_depot(toolbar: &mut RailToolbarState, tile: TilePos, cx: &mut GuiContext) {
    let dir = match toolbar.depot.direction {
        DepotDirection::Fixed(dir) => dir,
        DepotDirection::Auto => {
            autodetect_depot_direction(cx.engine, tile, toolbar.depot.auto_rotation)
        }
    };
    let command = params::train_depot(tile, toolbar.railtype, dir)
        .with_callback(CommandCallback::RailDepot);
    cx.post(command);
    if cx.mods.fn_mod == cx.settings.keep_depot_tools {
        toolbar.reset_object_to_place(cx);
    }
}

/// Completion of a depot build: feedback, then connect the depot to track
/// already running past its entrance.
pub fn on_depot_built(
    toolbar: &mut RailToolbarState,
    command: &CommandContainer,
    cost: &CommandCost,
    cx: &mut GuiContext,
) {
    if cost.failed() {
        return;
    }
    cx.construction_sound(SoundEffect::ConstructionRail, command.tile);
    if !cx.settings.persistent_building_tools {
        toolbar.reset_object_to_place(cx);
    }

    let Some(dir) = DiagDirection::from_index(command.p2) else {
        warn!("Depot command carried invalid direction {}", command.p2);
        return;
    };
    let Some(front) = command.tile.step(dir) else {
        return;
    };
    if cx.engine.rail_tile_kind(front).is_none() {
        return;
    }
    let railtype = RailType(command.p1 as u8);
    for index in [dir.index(), dir.index() + 4, dir.index() + 8] {
        place_extra_depot_rail(
            front,
            DEPOT_EXTRA_PROBE[index],
            DEPOT_EXTRA_TRACK[index],
            railtype,
            cx,
        );
    }
}

fn place_extra_depot_rail(
    tile: TilePos,
    probe: DiagDirection,
    track: Track,
    railtype: RailType,
    cx: &mut GuiContext,
) {
    match cx.engine.rail_tile_kind(tile) {
        Some(RailTileKind::Normal) => {}
        Some(RailTileKind::Signals) if cx.settings.auto_remove_signals => {}
        _ => return,
    }
    if !cx.engine.track_bits(tile).intersects(probe.reaches_tracks()) {
        return;
    }
    let auto_remove = cx.settings.auto_remove_signals;
    cx.post(params::single_rail(tile, railtype, track, auto_remove, false));
}
