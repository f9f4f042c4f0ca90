//! Choosing which station a new station part joins.
//!
//! Two policies exist. The default one builds directly, or, with ctrl held
//! and distant joining enabled, asks the player to pick among nearby
//! stations before posting the command. The improved one lets the player
//! ctrl-click an existing station once to make it the join target for every
//! following placement.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::command::params::set_bits;
use crate::command::{CommandContainer, CommandFlags};
use crate::context::GuiContext;
use crate::map::TileArea;
use crate::rail::StationId;
use crate::toolbar::RailToolbarState;
use crate::toolbar::messages::SelectStationRequest;

/// A build command waiting for the player's join choice.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingJoin {
    pub command: CommandContainer,
    pub candidates: Vec<StationId>,
    pub waypoint: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationJoinState {
    /// Join target picked with ctrl-click.
    pub selected: Option<StationId>,
    pub pending: Option<PendingJoin>,
}

impl StationJoinState {
    pub fn close_select_dialog(&mut self) {
        self.pending = None;
    }

    pub fn abort(&mut self) {
        self.pending = None;
        self.selected = None;
    }
}

/// Answer to a select-station request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationChoice {
    Join(StationId),
    New,
}

impl RailToolbarState {
    /// Post `command` now, or hold it back and ask which station to join.
    pub(crate) fn show_select_station_if_needed(
        &mut self,
        command: CommandContainer,
        area: TileArea,
        waypoint: bool,
        cx: &mut GuiContext,
    ) {
        if !cx.settings.distant_join_stations || !cx.mods.fn_mod {
            cx.post(command);
            return;
        }
        // Let the engine report why it cannot build before asking anything.
        if cx.engine.estimate(&command, CommandFlags::NONE).failed() {
            cx.post(command);
            return;
        }
        let distance = cx.settings.station_spread.saturating_sub(1) as u32;
        let candidates = cx.engine.stations_near(area, distance, waypoint);
        if candidates.is_empty() {
            cx.post(command);
            return;
        }

        info!(
            "Asking which of {} stations to join at ({}, {})",
            candidates.len(),
            area.origin.x,
            area.origin.y
        );
        if !cx.settings.persistent_building_tools {
            self.reset_object_to_place(cx);
        }
        cx.effects.station_selects.push(SelectStationRequest {
            candidates: candidates.clone(),
            waypoint,
        });
        self.join.pending = Some(PendingJoin {
            command,
            candidates,
            waypoint,
        });
    }

    pub fn resolve_station_choice(&mut self, choice: StationChoice, cx: &mut GuiContext) {
        let Some(mut pending) = self.join.pending.take() else {
            debug!("Station choice {:?} arrived with nothing pending", choice);
            return;
        };
        let station = match choice {
            StationChoice::Join(id) if pending.candidates.contains(&id) => id,
            StationChoice::Join(id) => {
                warn!("Station {} was not offered for joining", id.0);
                return;
            }
            StationChoice::New => StationId::NEW,
        };
        set_bits(&mut pending.command.p2, 16, 16, station.0 as u32);
        cx.post(pending.command);
    }

    /// Ctrl-click on a station of the right kind picks it as join target.
    /// Returns true when the click was consumed.
    pub(crate) fn pick_join_target(
        &mut self,
        tile: TilePos,
        waypoint: bool,
        cx: &mut GuiContext,
    ) -> bool {
        if !cx.mods.fn_mod {
            return false;
        }
        let Some(info) = cx.engine.station_tile(tile) else {
            return false;
        };
        if info.is_waypoint != waypoint {
            return false;
        }
        self.join.selected = Some(info.station);
        cx.log(format!("Joining station #{}", info.station.0));
        cx.beep();
        true
    }

    /// Station id for a placement under the improved policy: the picked
    /// target, a separate new station when ctrl is held, otherwise
    /// automatic joining.
    pub(crate) fn improved_join_target(&self, fn_mod: bool) -> StationId {
        match self.join.selected {
            Some(station) => station,
            None if fn_mod => StationId::NEW,
            None => StationId::INVALID,
        }
    }
}
