//! Reactions to finished engine commands.

use bevy::prelude::*;

use crate::command::{CommandCallback, CommandContainer, CommandCost, SoundEffect};
use crate::context::GuiContext;
use crate::placement::{bridge, depot, station, terraform};
use crate::toolbar::state::RailToolbarState;

impl RailToolbarState {
    /// The engine finished `command` with `cost`.
    pub fn on_command_outcome(
        &mut self,
        command: &CommandContainer,
        cost: &CommandCost,
        cx: &mut GuiContext,
    ) {
        if let Err(error) = &cost.result {
            let headline = command
                .error
                .map_or("command failed", |message| message.describe());
            cx.log(format!("{headline}: {error}"));
        }

        match &command.callback {
            CommandCallback::None => {}
            CommandCallback::PlaySound => {
                if cost.succeeded() {
                    cx.construction_sound(SoundEffect::ConstructionRail, command.tile);
                }
            }
            CommandCallback::Demolish => {
                if cost.succeeded() {
                    cx.construction_sound(SoundEffect::Explosion, command.tile);
                }
            }
            CommandCallback::RailTrack {
                start,
                track,
                store_snap,
            } => {
                if cost.failed() {
                    return;
                }
                cx.construction_sound(SoundEffect::ConstructionRail, command.tile);
                if *store_snap && let Some(end) = cost.end_tile {
                    cx.highlight
                        .store_rail_placement_endpoints(*start, end, *track, true);
                }
            }
            CommandCallback::RailDepot => depot::on_depot_built(self, command, cost, cx),
            CommandCallback::Station => station::on_station_built(self, command, cost, cx),
            CommandCallback::Tunnel => bridge::on_tunnel_built(self, command, cost, cx),
            CommandCallback::Bridge { start, end } => bridge::on_bridge_built(*start, *end, cost, cx),
            CommandCallback::Terraform => terraform::on_terraform_done(command, cost, cx),
            CommandCallback::TerraformThenRail(continuation) => {
                terraform::on_terraform_done(command, cost, cx);
                terraform::continue_rail(continuation, cx);
            }
        }
    }
}
