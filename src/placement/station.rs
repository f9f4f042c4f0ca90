use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::params::{self, StationParams};
use crate::command::{CommandCallback, CommandContainer, CommandCost, SoundEffect};
use crate::context::GuiContext;
use crate::highlight::{DragProcess, PlaceMethod};
use crate::map::TileArea;
use crate::rail::{StationClassId, StationId};
use crate::toolbar::RailToolbarState;

/// Click with the station tool.
pub fn place_station(toolbar: &mut RailToolbarState, tile: TilePos, cx: &mut GuiContext) {
    if toolbar.remove_active {
        cx.highlight
            .start_sizing(tile, PlaceMethod::XAndYLimited, false, DragProcess::RemoveStation);
        cx.highlight.sizing_limit = None;
        return;
    }
    if cx.settings.station_dragdrop {
        cx.highlight
            .start_sizing(tile, PlaceMethod::XAndYLimited, false, DragProcess::BuildStation);
        cx.highlight.sizing_limit = Some(cx.settings.station_spread);
        return;
    }
    if cx.settings.improved_station_join && toolbar.pick_join_target(tile, false, cx) {
        return;
    }

    let (w, h) = toolbar.station.footprint(cx.settings);
    let command = station_command(
        toolbar,
        tile,
        cx.settings.station_numtracks as u32,
        cx.settings.station_platlength as u32,
        cx,
    );
    submit(toolbar, command, TileArea::new(tile, w, h), false, cx);
}

/// Drag-and-drop station covering the dragged rectangle.
pub fn handle_station_placement(
    toolbar: &mut RailToolbarState,
    start: TilePos,
    end: TilePos,
    cx: &mut GuiContext,
) {
    let area = TileArea::from_corners(start, end);
    let (numtracks, platlength) = match toolbar.station.orientation {
        crate::map::Axis::X => (area.h, area.w),
        crate::map::Axis::Y => (area.w, area.h),
    };
    let command = station_command(toolbar, area.origin, numtracks, platlength, cx);
    submit(toolbar, command, area, false, cx);
}

pub fn remove_station_part(start: TilePos, end: TilePos, cx: &mut GuiContext) {
    let keep_rail = !cx.mods.fn_mod;
    let command = params::remove_from_station(start, end, cx.map_width(), keep_rail)
        .with_callback(CommandCallback::PlaySound);
    cx.post(command);
}

fn station_command(
    toolbar: &RailToolbarState,
    origin: TilePos,
    numtracks: u32,
    platlength: u32,
    cx: &GuiContext,
) -> CommandContainer {
    let station = if cx.settings.improved_station_join {
        toolbar.improved_join_target(cx.mods.fn_mod)
    } else {
        StationId::INVALID
    };
    params::rail_station(
        origin,
        &StationParams {
            railtype: toolbar.railtype,
            axis: toolbar.station.orientation,
            numtracks,
            platlength,
            adjacent: cx.mods.fn_mod,
            class: toolbar.station.station_class,
            station_type: toolbar.station.station_type,
            station,
        },
    )
    .with_callback(CommandCallback::Station)
}

/// Post a station or waypoint command according to the join policy.
pub(crate) fn submit(
    toolbar: &mut RailToolbarState,
    command: CommandContainer,
    area: TileArea,
    waypoint: bool,
    cx: &mut GuiContext,
) {
    if cx.settings.improved_station_join {
        cx.post(command);
    } else {
        toolbar.show_select_station_if_needed(command, area, waypoint, cx);
    }
}

/// Completion of a station build.
pub fn on_station_built(
    toolbar: &mut RailToolbarState,
    command: &CommandContainer,
    cost: &CommandCost,
    cx: &mut GuiContext,
) {
    if cost.failed() {
        return;
    }
    cx.construction_sound(SoundEffect::ConstructionRail, command.tile);
    // Custom station types are usually placed several times in a row.
    if toolbar.station.station_class == StationClassId::DEFAULT
        && toolbar.station.station_type == 0
        && !cx.settings.persistent_building_tools
    {
        toolbar.reset_object_to_place(cx);
    }
}
