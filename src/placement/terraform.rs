//! Levelling the land under polyline segments before laying rail.
//!
//! Each segment direction has two tile-corner ranges that must be level for
//! the rail to lie flat: the corners along each side of the track. The lower
//! corner of each range is raised, or the range levelled, and the rail is
//! placed once the last levelling command completes.

use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::params::{self, LevelMode};
use crate::command::{
    CommandCallback, CommandContainer, CommandCost, CommandFlags, RailContinuation, SoundEffect,
};
use crate::context::GuiContext;
use crate::map::{TilePosExt, Track, Trackdir};

/// Corner ranges to level for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerPlan {
    pub diagonal: bool,
    pub s1: TilePos,
    pub e1: TilePos,
    pub s2: TilePos,
    pub e2: TilePos,
}

/// Corner ranges for a segment from `start` to `end` drawn in `dir`.
pub fn corner_plan(start: TilePos, end: TilePos, dir: Trackdir) -> CornerPlan {
    let s = start;
    let e = end;
    // Whether the end lies on the same diagonal (eq) or anti-diagonal (ez)
    // as the start decides which half-tile the segment ends on.
    let eq = (e.x as i64 - e.y as i64 == s.x as i64 - s.y as i64) as u32;
    let ez = (e.x + e.y == s.x + s.y) as u32;
    let neq = 1 - eq;
    let nez = 1 - ez;

    let (diagonal, s1, e1, s2, e2) = match dir {
        Trackdir::XNe => (false, s.add_xy(1, 0), e, s.add_xy(1, 1), e.add_xy(0, 1)),
        Trackdir::XSw => (false, s, e.add_xy(1, 0), s.add_xy(0, 1), e.add_xy(1, 1)),
        Trackdir::YSe => (false, s, e.add_xy(0, 1), s.add_xy(1, 0), e.add_xy(1, 1)),
        Trackdir::YNw => (false, s.add_xy(0, 1), e, s.add_xy(1, 1), e.add_xy(1, 0)),
        Trackdir::LeftN => (true, s.add_xy(1, 0), e.add_xy(eq, 0), s.add_xy(1, 1), e.add_xy(0, neq)),
        Trackdir::RightN => (true, s.add_xy(0, 1), e.add_xy(0, eq), s.add_xy(1, 1), e.add_xy(neq, 0)),
        Trackdir::LeftS => (true, s.add_xy(1, 0), e.add_xy(1, neq), s, e.add_xy(eq, 1)),
        Trackdir::RightS => (true, s.add_xy(0, 1), e.add_xy(neq, 1), s, e.add_xy(1, eq)),
        Trackdir::UpperE => (true, s, e.add_xy(0, nez), s.add_xy(1, 0), e.add_xy(nez, 1)),
        Trackdir::LowerE => (true, s.add_xy(1, 1), e.add_xy(ez, 1), s.add_xy(1, 0), e.add_xy(0, ez)),
        Trackdir::UpperW => (true, s, e.add_xy(nez, 0), s.add_xy(0, 1), e.add_xy(1, nez)),
        Trackdir::LowerW => (true, s.add_xy(1, 1), e.add_xy(1, ez), s.add_xy(0, 1), e.add_xy(ez, 0)),
    };
    CornerPlan {
        diagonal,
        s1,
        e1,
        s2,
        e2,
    }
}

/// Level the land under a polyline segment, then place `rail`.
pub fn handle_autodir_terraform(
    start: TilePos,
    end: TilePos,
    track: Track,
    dir: Trackdir,
    rail: CommandContainer,
    cx: &mut GuiContext,
) {
    let plan = corner_plan(start, end, dir);
    let h1 = cx.engine.corner_height(plan.s1);
    let h2 = cx.engine.corner_height(plan.s2);
    // Raise the side that is lower, level the other.
    let mode1 = if h1 < h2 { LevelMode::Raise } else { LevelMode::Level };
    let mode2 = if h2 < h1 { LevelMode::Raise } else { LevelMode::Level };

    let width = cx.map_width();
    let level1 = params::level_land(plan.s1, plan.e1, width, mode1, plan.diagonal);
    let level2 = params::level_land(plan.s2, plan.e2, width, mode2, plan.diagonal);
    let flags = CommandFlags::AUTO | CommandFlags::NO_WATER;
    let level1_ok = cx.engine.estimate(&level1, flags).succeeded();
    let level2_ok = cx.engine.estimate(&level2, flags).succeeded();

    let continuation = RailContinuation {
        rail,
        start,
        track,
        estimate: cx.mods.estimate_mod,
    };
    let then_rail = CommandCallback::TerraformThenRail(Box::new(continuation.clone()));
    match (level1_ok, level2_ok) {
        (false, false) => continue_rail(&continuation, cx),
        (true, false) => cx.post(level1.with_callback(then_rail)),
        (true, true) => {
            cx.post(level1.with_callback(CommandCallback::Terraform));
            cx.post(level2.with_callback(then_rail));
        }
        (false, true) => cx.post(level2.with_callback(then_rail)),
    }
}

/// Place the rail a levelling step was for.
///
/// The rail goes down whether or not the levelling worked; if it did not,
/// the rail command reports the slope problem itself.
pub fn continue_rail(continuation: &RailContinuation, cx: &mut GuiContext) {
    let dry_run = cx.engine.estimate(
        &continuation.rail,
        CommandFlags::AUTO | CommandFlags::NO_WATER,
    );
    if !dry_run.only_moves_snap() {
        cx.post(
            continuation
                .rail
                .clone()
                .with_callback(CommandCallback::PlaySound),
        );
    }
    if !continuation.estimate
        && let Some(end) = dry_run.end_tile
    {
        cx.highlight.store_rail_placement_endpoints(
            continuation.start,
            end,
            continuation.track,
            true,
        );
    }
}

/// Feedback for a finished levelling command.
pub fn on_terraform_done(command: &CommandContainer, cost: &CommandCost, cx: &mut GuiContext) {
    if cost.succeeded() {
        cx.construction_sound(SoundEffect::ConstructionOther, command.tile);
    } else {
        cx.highlight.red_error_square = Some(command.tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandError, CommandId};
    use crate::test_utils::{TestGui, tile};

    #[test]
    fn straight_segments_use_tile_edges() {
        let plan = corner_plan(tile(5, 5), tile(2, 5), Trackdir::XNe);
        assert!(!plan.diagonal);
        assert_eq!((plan.s1, plan.e1), (tile(6, 5), tile(2, 5)));
        assert_eq!((plan.s2, plan.e2), (tile(6, 6), tile(2, 6)));

        let plan = corner_plan(tile(1, 1), tile(1, 4), Trackdir::YSe);
        assert_eq!((plan.s1, plan.e1), (tile(1, 1), tile(1, 5)));
        assert_eq!((plan.s2, plan.e2), (tile(2, 1), tile(2, 5)));
    }

    #[test]
    fn diagonal_end_depends_on_same_diagonal() {
        // End on the start's diagonal.
        let on = corner_plan(tile(5, 5), tile(3, 3), Trackdir::LeftN);
        assert!(on.diagonal);
        assert_eq!(on.s1, tile(6, 5));
        assert_eq!(on.e1, tile(4, 3));
        assert_eq!(on.e2, tile(3, 3));

        // One half-tile further along.
        let off = corner_plan(tile(5, 5), tile(3, 4), Trackdir::LeftN);
        assert_eq!(off.e1, tile(3, 4));
        assert_eq!(off.e2, tile(3, 5));
    }

    #[test]
    fn anti_diagonal_end_for_upper_and_lower() {
        let on = corner_plan(tile(4, 6), tile(6, 4), Trackdir::UpperE);
        assert_eq!(on.e1, tile(6, 4));
        assert_eq!(on.e2, tile(6, 5));
        let off = corner_plan(tile(4, 6), tile(6, 5), Trackdir::UpperE);
        assert_eq!(off.e1, tile(6, 6));
        assert_eq!(off.e2, tile(7, 6));
    }

    fn rail_for(gui: &TestGui) -> CommandContainer {
        params::railroad_track(
            tile(5, 5),
            tile(3, 3),
            gui.engine.size.0,
            crate::rail::RailType::RAIL,
            Track::Left,
            false,
            false,
        )
    }

    #[test]
    fn both_levels_failing_places_rail_now() {
        let mut gui = TestGui::new();
        gui.engine.script_all(
            CommandId::LevelLand,
            CommandCost::err(CommandError::Rejected("object in the way".into())),
        );
        let rail = rail_for(&gui);
        gui.run(|_, cx| {
            handle_autodir_terraform(tile(5, 5), tile(3, 3), Track::Left, Trackdir::LeftN, rail, cx)
        });
        let commands = gui.take_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].cmd, CommandId::BuildRailroadTrack);
        assert_eq!(gui.highlight.snap_points.len(), 2);
    }

    #[test]
    fn both_levels_succeeding_chain_rail_after_second() {
        let mut gui = TestGui::new();
        gui.engine.set_corner_height(tile(6, 5), 2);
        let rail = rail_for(&gui);
        gui.run(|_, cx| {
            handle_autodir_terraform(tile(5, 5), tile(3, 3), Track::Left, Trackdir::LeftN, rail, cx)
        });
        let commands = gui.take_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].cmd, CommandId::LevelLand);
        assert_eq!(commands[0].callback, CommandCallback::Terraform);
        // s1 is higher: level it; s2 is lower: raise it.
        assert_eq!(commands[0].p2, 1 | (LevelMode::Level as u32) << 1);
        assert_eq!(commands[1].p2, 1 | (LevelMode::Raise as u32) << 1);
        assert!(matches!(
            commands[1].callback,
            CommandCallback::TerraformThenRail(_)
        ));
    }

    #[test]
    fn only_second_level_succeeding_chains_rail() {
        let mut gui = TestGui::new();
        gui.engine.script(
            CommandId::LevelLand,
            tile(4, 3),
            CommandCost::err(CommandError::Rejected("house in the way".into())),
        );
        let rail = rail_for(&gui);
        gui.run(|_, cx| {
            handle_autodir_terraform(tile(5, 5), tile(3, 3), Track::Left, Trackdir::LeftN, rail, cx)
        });
        let commands = gui.take_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].tile, tile(3, 3));
        assert!(matches!(
            commands[0].callback,
            CommandCallback::TerraformThenRail(_)
        ));
    }

    #[test]
    fn continuation_skips_rail_that_is_already_there() {
        let mut gui = TestGui::new();
        let rail = rail_for(&gui);
        gui.engine.script(
            CommandId::BuildRailroadTrack,
            tile(5, 5),
            CommandCost::err(CommandError::AlreadyBuilt).with_end_tile(tile(3, 3)),
        );
        let continuation = RailContinuation {
            rail,
            start: tile(5, 5),
            track: Track::Left,
            estimate: false,
        };
        gui.run(|_, cx| continue_rail(&continuation, cx));
        assert!(gui.take_commands().is_empty());
        assert_eq!(gui.highlight.snap_points.len(), 2);
    }

    #[test]
    fn failed_levelling_marks_error_square() {
        let mut gui = TestGui::new();
        let level = params::level_land(tile(1, 1), tile(2, 2), 64, LevelMode::Raise, false);
        let failed = CommandCost::err(CommandError::Rejected("too steep".into()));
        gui.run(|_, cx| on_terraform_done(&level, &failed, cx));
        assert_eq!(gui.highlight.red_error_square, Some(tile(2, 2)));
    }
}
