//! Viewport callbacks while a toolbar tool is active.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::blueprint::Blueprint;
use crate::command::params;
use crate::command::CommandCallback;
use crate::context::GuiContext;
use crate::highlight::{DragProcess, HighlightMode, PlaceDrag, PlaceMethod};
use crate::placement::{autodir, bridge, depot, signals, station, waypoint};
use crate::toolbar::buttons::{RailToolButton, UserAction};
use crate::toolbar::state::RailToolbarState;

impl RailToolbarState {
    /// The player clicked `tile` with the active tool.
    pub fn on_place_object(&mut self, tile: TilePos, cx: &mut GuiContext) {
        let rail_drag = |method, cx: &mut GuiContext| {
            cx.highlight
                .start_sizing(tile, method, true, DragProcess::PlaceRail);
        };
        match self.last_user_action {
            UserAction::Tool(RailToolButton::BuildNs) => rail_drag(PlaceMethod::FixVertical, cx),
            UserAction::Tool(RailToolButton::BuildX) => rail_drag(PlaceMethod::FixY, cx),
            UserAction::Tool(RailToolButton::BuildEw) => rail_drag(PlaceMethod::FixHorizontal, cx),
            UserAction::Tool(RailToolButton::BuildY) => rail_drag(PlaceMethod::FixX, cx),
            UserAction::Tool(RailToolButton::Autorail | RailToolButton::Polyrail) => {
                rail_drag(PlaceMethod::RailDirs, cx)
            }
            UserAction::Tool(RailToolButton::Demolish) => {
                cx.highlight
                    .start_sizing(tile, PlaceMethod::XAndY, false, DragProcess::DemolishArea);
            }
            UserAction::Tool(RailToolButton::Depot) => depot::place_depot(self, tile, cx),
            UserAction::Tool(RailToolButton::Waypoint) => waypoint::place_waypoint(self, tile, cx),
            UserAction::Tool(RailToolButton::Station) => station::place_station(self, tile, cx),
            UserAction::Tool(RailToolButton::Signals) => {
                cx.highlight
                    .start_sizing(tile, PlaceMethod::SignalDirs, false, DragProcess::BuildSignals);
            }
            UserAction::Tool(RailToolButton::Bridge) => bridge::place_bridge(self, tile, cx),
            UserAction::Tool(RailToolButton::Tunnel) => bridge::place_tunnel(self, tile, cx),
            UserAction::Tool(RailToolButton::Blueprint) => {
                cx.highlight
                    .start_sizing(tile, PlaceMethod::XAndY, false, DragProcess::BlueprintArea);
            }
            UserAction::BlueprintPlace => {
                self.paste_blueprint(tile, cx);
                self.reset_object_to_place(cx);
            }
            UserAction::Tool(RailToolButton::Convert) => {
                cx.highlight
                    .start_sizing(tile, PlaceMethod::XAndY, false, DragProcess::ConvertRail);
            }
            other => warn!("Place click at ({}, {}) with no tool: {:?}", tile.x, tile.y, other),
        }
    }

    /// Dragging is suppressed while the signal tool converts signals.
    pub fn accepts_drag(&self) -> bool {
        !(self.pickers.signal && self.signal.convert && self.is_lowered(RailToolButton::Signals))
    }

    /// The viewport finished a drag started by [`Self::on_place_object`].
    pub fn on_place_mouse_up(&mut self, drag: &PlaceDrag, cx: &mut GuiContext) {
        match drag.process {
            DragProcess::BuildBridge => bridge::handle_bridge_area(self, drag.start, drag.end, cx),
            DragProcess::PlaceRail => autodir::handle_autodir_placement(self, drag, cx),
            DragProcess::BuildSignals => signals::handle_auto_signal_placement(self, drag, cx),
            DragProcess::DemolishArea => {
                let command =
                    params::clear_area(drag.start, drag.end, cx.map_width(), cx.mods.fn_mod)
                        .with_callback(CommandCallback::Demolish);
                cx.post(command);
            }
            DragProcess::ConvertRail => {
                let command = params::convert_rail(
                    drag.start,
                    drag.end,
                    cx.map_width(),
                    self.railtype,
                    cx.mods.fn_mod,
                )
                .with_callback(CommandCallback::PlaySound);
                cx.post(command);
            }
            DragProcess::BuildStation | DragProcess::RemoveStation => {
                if !self.is_lowered(RailToolButton::Station) {
                    waypoint::handle_waypoint_area(self, drag.method, drag.start, drag.end, cx);
                } else if self.remove_active {
                    station::remove_station_part(drag.start, drag.end, cx);
                } else {
                    station::handle_station_placement(self, drag.start, drag.end, cx);
                }
            }
            DragProcess::BlueprintArea => {
                // Switching to paste mode raises the blueprint button.
                self.on_place_object_abort(cx);
                cx.highlight.set_object_to_place(HighlightMode::BlueprintPlace);
                let blueprint = Blueprint::copy_area(cx.engine, drag.start, drag.end);
                if blueprint.is_empty() {
                    cx.log("Nothing to copy in the selected area");
                }
                self.blueprint.active = Some(blueprint);
                self.last_user_action = UserAction::BlueprintPlace;
            }
        }
    }

    /// Cursor moved while the tunnel tool is active.
    pub fn on_place_presize(&mut self, tile: TilePos, cx: &mut GuiContext) {
        bridge::presize_tunnel(self, tile, cx);
    }

    fn paste_blueprint(&mut self, tile: TilePos, cx: &mut GuiContext) {
        let Some(blueprint) = &self.blueprint.active else {
            return;
        };
        let commands = blueprint.commands(tile, self.railtype);
        info!(
            "Pasting blueprint with {} pieces at ({}, {})",
            commands.len(),
            tile.x,
            tile.y
        );
        for command in commands {
            cx.post(command.with_callback(CommandCallback::PlaySound));
        }
    }
}
