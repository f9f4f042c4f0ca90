use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::params::{self, SignalCycleRange, SignalParams, SignalTrackParams};
use crate::command::CommandCallback;
use crate::context::GuiContext;
use crate::highlight::{DrawStyle, PlaceDrag};
use crate::map::{Track, TrackBits};
use crate::rail::{SignalCycle, SignalGuiMode, SignalType, SignalVariant};
use crate::toolbar::RailToolbarState;

/// Track under the cursor on a tile carrying `bits`.
///
/// `fract` is the cursor position inside the tile (0..16 per axis). Parallel
/// half-tile pairs are told apart by which side of the tile's diagonal the
/// cursor is on.
pub fn pick_signal_track(bits: TrackBits, fract: (u8, u8)) -> Option<Track> {
    let (fx, fy) = fract;
    let mut bits = bits;
    if bits.intersects(TrackBits::VERT) {
        bits = if fx <= fy {
            TrackBits::RIGHT
        } else {
            TrackBits::LEFT
        };
    }
    if bits.intersects(TrackBits::HORZ) {
        bits = if fx as u16 + fy as u16 <= 15 {
            TrackBits::UPPER
        } else {
            TrackBits::LOWER
        };
    }
    bits.first_track()
}

fn cycle_range(cx: &GuiContext) -> SignalCycleRange {
    let first = if cx.settings.cycle_signal_types == SignalCycle::All
        && cx.settings.signal_gui_mode == SignalGuiMode::All
    {
        SignalType::Normal
    } else {
        SignalType::Pbs
    };
    SignalCycleRange {
        first,
        last: SignalType::LAST,
    }
}

/// Build, convert or remove a single signal on one tile.
pub fn generic_place_signals(
    toolbar: &RailToolbarState,
    tile: TilePos,
    fract: (u8, u8),
    cx: &mut GuiContext,
) {
    let bits = cx.engine.track_bits(tile);
    let Some(track) = pick_signal_track(bits, fract) else {
        cx.log(format!("No track for signals at ({}, {})", tile.x, tile.y));
        return;
    };

    if toolbar.remove_active {
        let command =
            params::remove_signals(tile, track).with_callback(CommandCallback::PlaySound);
        cx.post(command);
        return;
    }

    let cycle = cycle_range(cx);
    let signal_params = if toolbar.pickers.signal {
        SignalParams {
            track,
            fn_mod: cx.mods.fn_mod,
            variant: toolbar.signal.variant,
            signal_type: toolbar.signal.signal_type,
            convert: toolbar.signal.convert,
            cycle,
        }
    } else {
        SignalParams {
            track,
            fn_mod: cx.mods.fn_mod,
            variant: SignalVariant::for_year(cx.year, cx.settings.semaphore_build_before),
            signal_type: SignalType::PbsOneway,
            convert: false,
            cycle,
        }
    };
    let command =
        params::build_signals(tile, &signal_params).with_callback(CommandCallback::PlaySound);
    cx.post(command);
}

/// Finished signal drag: one tile picks a track, longer drags fill a
/// signal track at the configured density.
pub fn handle_auto_signal_placement(
    toolbar: &RailToolbarState,
    drag: &PlaceDrag,
    cx: &mut GuiContext,
) {
    let track = match drag.style {
        DrawStyle::Rect => {
            generic_place_signals(toolbar, drag.end, drag.fract, cx);
            return;
        }
        DrawStyle::Rail(track) | DrawStyle::Line(track) => track,
    };

    let (variant, signal_type) = if toolbar.pickers.signal {
        (toolbar.signal.variant, toolbar.signal.signal_type)
    } else {
        (
            SignalVariant::for_year(cx.year, cx.settings.semaphore_build_before),
            SignalType::PbsOneway,
        )
    };
    let track_params = SignalTrackParams {
        track,
        variant,
        fn_mod: cx.mods.fn_mod,
        signal_type,
        fixed_distance: cx.settings.drag_signals_fixed_distance,
        density: cx.settings.drag_signals_density,
    };
    let command = params::signal_track(
        drag.start,
        drag.end,
        cx.map_width(),
        &track_params,
        toolbar.remove_active,
    )
    .with_callback(CommandCallback::PlaySound);
    cx.post(command);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandId, ErrorMessage};
    use crate::highlight::{DragProcess, PlaceMethod};
    use crate::test_utils::{TestGui, tile};

    #[test]
    fn vertical_pair_split_by_diagonal() {
        assert_eq!(pick_signal_track(TrackBits::VERT, (3, 9)), Some(Track::Right));
        assert_eq!(pick_signal_track(TrackBits::VERT, (9, 9)), Some(Track::Right));
        assert_eq!(pick_signal_track(TrackBits::VERT, (10, 9)), Some(Track::Left));
    }

    #[test]
    fn horizontal_pair_split_by_antidiagonal() {
        assert_eq!(pick_signal_track(TrackBits::HORZ, (7, 8)), Some(Track::Upper));
        assert_eq!(pick_signal_track(TrackBits::HORZ, (8, 8)), Some(Track::Lower));
    }

    #[test]
    fn single_track_is_taken_as_is() {
        assert_eq!(pick_signal_track(TrackBits::Y, (0, 15)), Some(Track::Y));
        assert_eq!(pick_signal_track(TrackBits::NONE, (0, 0)), None);
    }

    #[test]
    fn without_picker_uses_era_default() {
        let mut gui = TestGui::new();
        gui.year = 1920;
        gui.engine.lay_rail(tile(2, 2), TrackBits::X);
        gui.run(|toolbar, cx| generic_place_signals(toolbar, tile(2, 2), (8, 8), cx));
        let command = &gui.take_commands()[0];
        assert_eq!(command.cmd, CommandId::BuildSignals);
        assert_eq!(command.p1 & 0x7, Track::X as u32);
        assert_eq!(command.p1 >> 4 & 1, SignalVariant::Semaphore as u32);
        assert_eq!(command.p1 >> 5 & 0x7, SignalType::PbsOneway as u32);
        assert_eq!(command.p1 >> 9 & 0x7, SignalType::Pbs as u32);
    }

    #[test]
    fn all_signal_cycling_starts_at_normal() {
        let mut gui = TestGui::new();
        gui.settings.cycle_signal_types = SignalCycle::All;
        gui.settings.signal_gui_mode = SignalGuiMode::All;
        gui.toolbar.pickers.signal = true;
        gui.toolbar.signal.convert = true;
        gui.engine.lay_rail(tile(2, 2), TrackBits::Y);
        gui.run(|toolbar, cx| generic_place_signals(toolbar, tile(2, 2), (8, 8), cx));
        let command = &gui.take_commands()[0];
        assert_eq!(command.p1 >> 8 & 1, 1);
        assert_eq!(command.p1 >> 9 & 0x3F, (SignalType::LAST as u32) << 3);
        assert_eq!(command.error, Some(ErrorMessage::CantConvertSignalsHere));
    }

    #[test]
    fn drag_builds_signal_track_with_density() {
        let mut gui = TestGui::new();
        gui.settings.drag_signals_density = 6;
        gui.settings.drag_signals_fixed_distance = true;
        let drag = PlaceDrag {
            method: PlaceMethod::SignalDirs,
            process: DragProcess::BuildSignals,
            start: tile(1, 1),
            end: tile(1, 9),
            style: DrawStyle::Line(Track::Y),
            fract: (0, 0),
            poly_dir: None,
        };
        gui.run(|toolbar, cx| handle_auto_signal_placement(toolbar, &drag, cx));
        let command = &gui.take_commands()[0];
        assert_eq!(command.cmd, CommandId::BuildSignalTrack);
        assert_eq!(command.p2 & 0x7, Track::Y as u32);
        assert_eq!(command.p2 >> 10 & 1, 0);
        assert_eq!(command.p2 >> 24, 6);
    }

    #[test]
    fn remove_mode_removes_signals() {
        let mut gui = TestGui::new();
        gui.toolbar.remove_active = true;
        gui.engine.lay_rail(tile(2, 2), TrackBits::X);
        gui.run(|toolbar, cx| generic_place_signals(toolbar, tile(2, 2), (8, 8), cx));
        let command = &gui.take_commands()[0];
        assert_eq!(command.cmd, CommandId::RemoveSignals);
        assert_eq!(command.p1, Track::X as u32);
    }
}
