use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::params::{self, StationParams};
use crate::command::CommandCallback;
use crate::context::GuiContext;
use crate::highlight::{DragProcess, PlaceMethod};
use crate::map::{Axis, TileArea};
use crate::placement::station::submit;
use crate::rail::{StationClassId, StationId};
use crate::toolbar::RailToolbarState;

/// Click with the waypoint tool.
pub fn place_waypoint(toolbar: &mut RailToolbarState, tile: TilePos, cx: &mut GuiContext) {
    if toolbar.remove_active {
        cx.highlight
            .start_sizing(tile, PlaceMethod::XAndY, false, DragProcess::RemoveStation);
        return;
    }
    let Some(axis) = cx.engine.axis_for_new_waypoint(tile) else {
        // Can never succeed; the engine's error tells the player why.
        cx.post(params::failing_waypoint(tile));
        return;
    };
    if cx.settings.improved_station_join && toolbar.pick_join_target(tile, true, cx) {
        return;
    }
    let method = match axis {
        Axis::X => PlaceMethod::XLimited,
        Axis::Y => PlaceMethod::YLimited,
    };
    cx.highlight
        .start_sizing(tile, method, false, DragProcess::BuildStation);
    cx.highlight.sizing_limit = Some(cx.settings.station_spread);
}

/// Finished waypoint drag, building or removing.
pub fn handle_waypoint_area(
    toolbar: &mut RailToolbarState,
    method: PlaceMethod,
    start: TilePos,
    end: TilePos,
    cx: &mut GuiContext,
) {
    if toolbar.remove_active {
        let command = params::remove_from_waypoint(start, end, cx.map_width(), !cx.mods.fn_mod)
            .with_callback(CommandCallback::PlaySound);
        cx.post(command);
        return;
    }

    let area = TileArea::from_corners(start, end);
    let axis = if method == PlaceMethod::XLimited {
        Axis::X
    } else {
        Axis::Y
    };
    let station = if cx.settings.improved_station_join {
        toolbar.improved_join_target(cx.mods.fn_mod)
    } else {
        StationId::INVALID
    };
    let command = params::rail_waypoint(
        area.origin,
        &StationParams {
            railtype: toolbar.railtype,
            axis,
            numtracks: area.w,
            platlength: area.h,
            adjacent: cx.mods.fn_mod,
            class: StationClassId::WAYPOINT,
            station_type: toolbar.waypoint.waypoint_type,
            station,
        },
    )
    .with_callback(CommandCallback::PlaySound);
    submit(toolbar, command, area, true, cx);
}
