use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::params;
use crate::command::{CommandCallback, CommandContainer, CommandCost, CommandFlags, SoundEffect};
use crate::context::GuiContext;
use crate::highlight::{DragProcess, PlaceMethod};
use crate::map::{Axis, Track};
use crate::toolbar::RailToolbarState;
use crate::toolbar::messages::ShowBridgePicker;

/// Click with the bridge tool. Clicking a bridge head jumps straight to the
/// other end, anything else starts a straight drag.
pub fn place_bridge(toolbar: &mut RailToolbarState, tile: TilePos, cx: &mut GuiContext) {
    match cx.engine.bridge_other_end(tile) {
        Some(other) => handle_bridge_area(toolbar, other, tile, cx),
        None => cx
            .highlight
            .start_sizing(tile, PlaceMethod::XOrY, false, DragProcess::BuildBridge),
    }
}

/// Ask the host to let the player choose a bridge for the span.
pub fn handle_bridge_area(
    toolbar: &mut RailToolbarState,
    start: TilePos,
    end: TilePos,
    cx: &mut GuiContext,
) {
    if !cx.settings.persistent_building_tools {
        toolbar.reset_object_to_place(cx);
    }
    cx.effects.bridge_pickers.push(ShowBridgePicker {
        start,
        end,
        railtype: toolbar.railtype,
    });
}

/// The player picked a bridge type for a span.
pub fn build_chosen_bridge(
    toolbar: &RailToolbarState,
    start: TilePos,
    end: TilePos,
    bridge_type: u8,
    cx: &mut GuiContext,
) {
    let command = params::bridge(start, end, cx.map_width(), bridge_type, toolbar.railtype)
        .with_callback(CommandCallback::Bridge { start, end });
    cx.post(command);
}

pub fn on_bridge_built(start: TilePos, end: TilePos, cost: &CommandCost, cx: &mut GuiContext) {
    if cost.failed() {
        return;
    }
    cx.construction_sound(SoundEffect::ConstructionBridge, end);
    cx.highlight
        .store_rail_placement_endpoints(start, end, span_track(start, end), false);
}

pub fn place_tunnel(toolbar: &RailToolbarState, tile: TilePos, cx: &mut GuiContext) {
    cx.post(params::tunnel(tile, toolbar.railtype).with_callback(CommandCallback::Tunnel));
}

/// Show where a tunnel started at `tile` would come out.
pub fn presize_tunnel(toolbar: &RailToolbarState, tile: TilePos, cx: &mut GuiContext) {
    let dry_run = cx
        .engine
        .estimate(&params::tunnel(tile, toolbar.railtype), CommandFlags::AUTO);
    cx.highlight.presize = Some((tile, dry_run.end_tile.unwrap_or(tile)));
}

pub fn on_tunnel_built(
    toolbar: &mut RailToolbarState,
    command: &CommandContainer,
    cost: &CommandCost,
    cx: &mut GuiContext,
) {
    if cost.failed() {
        if let Some(end) = cost.end_tile {
            cx.highlight.red_error_square = Some(end);
        }
        return;
    }
    cx.construction_sound(SoundEffect::ConstructionRail, command.tile);
    if !cx.settings.persistent_building_tools {
        toolbar.reset_object_to_place(cx);
    }
    if let Some(end) = cost.end_tile {
        cx.highlight.store_rail_placement_endpoints(
            command.tile,
            end,
            span_track(command.tile, end),
            false,
        );
    }
}

fn span_track(start: TilePos, end: TilePos) -> Track {
    if start.x != end.x {
        Track::from_axis(Axis::X)
    } else {
        Track::from_axis(Axis::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandError, CommandId};
    use crate::test_utils::{TestGui, tile};

    #[test]
    fn clicking_bridge_head_requests_picker() {
        let mut gui = TestGui::new();
        gui.engine.bridges.insert(tile(3, 3), tile(3, 8));
        gui.run(|toolbar, cx| place_bridge(toolbar, tile(3, 3), cx));
        assert_eq!(
            gui.effects.bridge_pickers,
            vec![ShowBridgePicker {
                start: tile(3, 8),
                end: tile(3, 3),
                railtype: gui.toolbar.railtype,
            }]
        );
        assert!(gui.highlight.sizing.is_none());
    }

    #[test]
    fn clicking_open_ground_starts_straight_drag() {
        let mut gui = TestGui::new();
        gui.run(|toolbar, cx| place_bridge(toolbar, tile(3, 3), cx));
        let sizing = gui.highlight.sizing.expect("drag started");
        assert_eq!(sizing.method, PlaceMethod::XOrY);
        assert_eq!(sizing.process, DragProcess::BuildBridge);
    }

    #[test]
    fn chosen_bridge_is_posted_from_far_end() {
        let mut gui = TestGui::new();
        gui.run(|toolbar, cx| build_chosen_bridge(toolbar, tile(2, 4), tile(9, 4), 5, cx));
        let command = &gui.take_commands()[0];
        assert_eq!(command.cmd, CommandId::BuildBridge);
        assert_eq!(command.tile, tile(9, 4));
        assert_eq!(command.p2 & 0xFF, 5);
    }

    #[test]
    fn built_bridge_leaves_one_snap_point() {
        let mut gui = TestGui::new();
        gui.run(|_, cx| on_bridge_built(tile(2, 4), tile(9, 4), &CommandCost::ok(0), cx));
        assert_eq!(gui.highlight.snap_points.len(), 1);
        assert_eq!(gui.highlight.snap_points[0].tile, tile(9, 4));
        assert_eq!(gui.effects.sounds[0].effect, SoundEffect::ConstructionBridge);
    }

    #[test]
    fn failed_tunnel_marks_far_end() {
        let mut gui = TestGui::new();
        let command = params::tunnel(tile(5, 5), gui.toolbar.railtype);
        let failed = CommandCost::err(CommandError::Rejected("tunnel too long".into()))
            .with_end_tile(tile(5, 12));
        gui.run(|toolbar, cx| on_tunnel_built(toolbar, &command, &failed, cx));
        assert_eq!(gui.highlight.red_error_square, Some(tile(5, 12)));
        assert!(gui.effects.sounds.is_empty());
    }

    #[test]
    fn built_tunnel_stores_exit_and_resets_tool() {
        let mut gui = TestGui::new();
        gui.run(|toolbar, cx| {
            toolbar.on_click(crate::toolbar::RailToolButton::Tunnel, false, cx)
        });
        let command = params::tunnel(tile(5, 5), gui.toolbar.railtype);
        let built = CommandCost::ok(100).with_end_tile(tile(5, 12));
        gui.run(|toolbar, cx| on_tunnel_built(toolbar, &command, &built, cx));
        assert_eq!(gui.toolbar.lowered(), None);
        assert_eq!(gui.highlight.snap_points.len(), 1);
        assert_eq!(gui.highlight.snap_points[0].tile, tile(5, 12));
    }

    #[test]
    fn built_tunnel_without_known_exit_still_resets_tool() {
        let mut gui = TestGui::new();
        gui.run(|toolbar, cx| {
            toolbar.on_click(crate::toolbar::RailToolButton::Tunnel, false, cx)
        });
        let command = params::tunnel(tile(5, 5), gui.toolbar.railtype);
        gui.run(|toolbar, cx| on_tunnel_built(toolbar, &command, &CommandCost::ok(100), cx));
        assert_eq!(gui.toolbar.lowered(), None);
        assert!(gui.highlight.snap_points.is_empty());
        assert_eq!(gui.effects.sounds.len(), 1);
    }

    #[test]
    fn presize_shows_tunnel_extent() {
        let mut gui = TestGui::new();
        gui.engine.script(
            CommandId::BuildTunnel,
            tile(1, 1),
            CommandCost::ok(0).with_end_tile(tile(6, 1)),
        );
        gui.run(|toolbar, cx| presize_tunnel(toolbar, tile(1, 1), cx));
        assert_eq!(gui.highlight.presize, Some((tile(1, 1), tile(6, 1))));
    }
}
