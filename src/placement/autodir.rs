use crate::command::params;
use crate::command::{CommandCallback, CommandFlags};
use crate::context::GuiContext;
use crate::highlight::{DrawStyle, PlaceDrag};
use crate::placement::terraform;
use crate::toolbar::{RailToolButton, RailToolbarState};

/// Finished rail drag from any of the track tools.
///
/// A one-tile rail highlight builds a single piece, longer drags a railroad
/// track. Polyline segments are dry-run first so that re-tracing already
/// built rail only moves the snap point instead of failing.
pub fn handle_autodir_placement(
    toolbar: &RailToolbarState,
    drag: &PlaceDrag,
    cx: &mut GuiContext,
) {
    let (track, command) = match drag.style {
        DrawStyle::Rail(track) => (
            track,
            params::single_rail(
                drag.end,
                toolbar.railtype,
                track,
                cx.settings.auto_remove_signals,
                toolbar.remove_active,
            ),
        ),
        DrawStyle::Line(track) => (
            track,
            params::railroad_track(
                drag.start,
                drag.end,
                cx.map_width(),
                toolbar.railtype,
                track,
                cx.settings.auto_remove_signals,
                toolbar.remove_active,
            ),
        ),
        DrawStyle::Rect => return,
    };

    let polyline = toolbar.is_lowered(RailToolButton::Polyrail);
    if cx.mods.estimate_mod || !polyline || toolbar.remove_active {
        cx.post(command.with_callback(CommandCallback::RailTrack {
            start: drag.start,
            track,
            store_snap: !cx.mods.estimate_mod,
        }));
        return;
    }

    if cx.highlight.poly_terraform
        && let Some(dir) = drag.poly_dir
    {
        terraform::handle_autodir_terraform(drag.start, drag.end, track, dir, command, cx);
        return;
    }

    let dry_run = cx.engine.estimate(&command, CommandFlags::AUTO | CommandFlags::NO_WATER);
    if dry_run.is_already_built()
        && let Some(end) = dry_run.end_tile
    {
        cx.highlight
            .store_rail_placement_endpoints(drag.start, end, track, true);
        return;
    }
    cx.post(command.with_callback(CommandCallback::RailTrack {
        start: drag.start,
        track,
        store_snap: true,
    }));
}
