use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::command::{CommandOutcome, CommandRequest, HostEngine, PlaySound};
use crate::context::{GameYear, GuiContext, LocalCompany, ModifierState, PendingEffects};
use crate::highlight::TileHighlight;
use crate::placement::bridge;
use crate::rail::{RailTypes, StationCatalog};
use crate::settings::RailGuiSettings;
use crate::toolbar::buttons::RailToolButton;
use crate::toolbar::messages::*;
use crate::toolbar::state::RailToolbarState;
use crate::ui::logging::TerminalLogEvent;

/// Everything toolbar logic needs, borrowed from the world at once.
#[derive(SystemParam)]
pub struct GuiParams<'w> {
    toolbar: ResMut<'w, RailToolbarState>,
    settings: ResMut<'w, RailGuiSettings>,
    engine: Res<'w, HostEngine>,
    highlight: ResMut<'w, TileHighlight>,
    catalog: Res<'w, StationCatalog>,
    railtypes: Res<'w, RailTypes>,
    mods: Res<'w, ModifierState>,
    year: Res<'w, GameYear>,
    effects: ResMut<'w, PendingEffects>,
}

impl GuiParams<'_> {
    pub fn split(&mut self) -> (&mut RailToolbarState, GuiContext<'_>) {
        let cx = GuiContext {
            settings: &mut *self.settings,
            engine: self.engine.0.as_ref(),
            highlight: &mut *self.highlight,
            catalog: &*self.catalog,
            railtypes: &*self.railtypes,
            mods: *self.mods,
            year: self.year.0,
            effects: &mut *self.effects,
        };
        (&mut *self.toolbar, cx)
    }

    fn is_open(&self) -> bool {
        self.toolbar.open
    }
}

pub fn handle_show_toolbar(
    mut reader: MessageReader<ShowRailToolbar>,
    company: Res<LocalCompany>,
    mut gui: GuiParams,
) {
    for msg in reader.read() {
        if company.0.is_none() {
            warn!("No local company, rail toolbar stays closed");
            continue;
        }
        let (toolbar, mut cx) = gui.split();
        toolbar.show(msg.railtype, &mut cx);
    }
}

pub fn handle_close_toolbar(mut reader: MessageReader<CloseRailToolbar>, mut gui: GuiParams) {
    for _ in reader.read() {
        let (toolbar, mut cx) = gui.split();
        toolbar.close(&mut cx);
    }
}

pub fn handle_toolbar_clicks(mut reader: MessageReader<ToolbarClick>, mut gui: GuiParams) {
    for msg in reader.read() {
        if !gui.is_open() {
            continue;
        }
        let (toolbar, mut cx) = gui.split();
        toolbar.on_click(msg.button, false, &mut cx);
    }
}

pub fn handle_toolbar_hotkeys(
    mut reader: MessageReader<ToolbarHotkey>,
    company: Res<LocalCompany>,
    mut gui: GuiParams,
) {
    for msg in reader.read() {
        let handled = if msg.global && company.0.is_some() {
            let (toolbar, mut cx) = gui.split();
            toolbar.global_hotkey(msg.target, &mut cx)
        } else if gui.is_open() {
            let (toolbar, mut cx) = gui.split();
            toolbar.on_hotkey(msg.target, &mut cx)
        } else {
            false
        };
        if !handled {
            debug!("Hotkey {:?} not handled", msg.target);
        }
    }
}

pub fn handle_modifier_changes(mut reader: MessageReader<ModifiersChanged>, mut gui: GuiParams) {
    for msg in reader.read() {
        if !gui.is_open() {
            continue;
        }
        let (toolbar, mut cx) = gui.split();
        // Several changes may be queued; judge each against its own state.
        cx.mods = msg.current;
        toolbar.on_modifiers_changed(msg.previous, &mut cx);
    }
}

pub fn handle_place_object(mut reader: MessageReader<PlaceObject>, mut gui: GuiParams) {
    for msg in reader.read() {
        let (toolbar, mut cx) = gui.split();
        toolbar.on_place_object(msg.tile, &mut cx);
    }
}

pub fn handle_place_mouse_up(mut reader: MessageReader<PlaceMouseUp>, mut gui: GuiParams) {
    for msg in reader.read() {
        let (toolbar, mut cx) = gui.split();
        toolbar.on_place_mouse_up(&msg.drag, &mut cx);
    }
}

pub fn handle_place_presize(mut reader: MessageReader<PlacePresize>, mut gui: GuiParams) {
    for msg in reader.read() {
        let (toolbar, mut cx) = gui.split();
        if toolbar.is_lowered(RailToolButton::Tunnel) {
            toolbar.on_place_presize(msg.tile, &mut cx);
        }
    }
}

pub fn handle_place_abort(mut reader: MessageReader<PlaceAbort>, mut gui: GuiParams) {
    for _ in reader.read() {
        let (toolbar, mut cx) = gui.split();
        toolbar.reset_object_to_place(&mut cx);
    }
}

pub fn handle_dialog_answers(
    mut bridges: MessageReader<BridgeChosen>,
    mut stations: MessageReader<StationChosen>,
    mut gui: GuiParams,
) {
    for msg in bridges.read() {
        let (toolbar, mut cx) = gui.split();
        bridge::build_chosen_bridge(toolbar, msg.start, msg.end, msg.bridge_type, &mut cx);
    }
    for msg in stations.read() {
        let (toolbar, mut cx) = gui.split();
        toolbar.resolve_station_choice(msg.choice, &mut cx);
    }
}

pub fn handle_picker_clicks(
    mut signals: MessageReader<SignalPickerClick>,
    mut stations: MessageReader<StationPickerClick>,
    mut depots: MessageReader<DepotPickerClick>,
    mut waypoints: MessageReader<WaypointPickerClick>,
    mut rotations: MessageReader<PickerRotate>,
    mut gui: GuiParams,
) {
    for msg in signals.read() {
        let (toolbar, mut cx) = gui.split();
        if toolbar.pickers.signal {
            toolbar.on_signal_picker_click(msg.button, &mut cx);
        }
    }
    for msg in stations.read() {
        let (toolbar, mut cx) = gui.split();
        if toolbar.pickers.station {
            toolbar.on_station_picker_click(msg.button.clone(), &mut cx);
        }
    }
    for msg in depots.read() {
        let (toolbar, mut cx) = gui.split();
        if toolbar.pickers.depot {
            toolbar.on_depot_picker_click(msg.direction, &mut cx);
        }
    }
    for msg in waypoints.read() {
        let (toolbar, mut cx) = gui.split();
        if toolbar.pickers.waypoint && !toolbar.on_waypoint_picker_click(msg.waypoint_type, &mut cx)
        {
            debug!("Waypoint type {} is not available", msg.waypoint_type);
        }
    }
    for _ in rotations.read() {
        let (toolbar, mut cx) = gui.split();
        if toolbar.pickers.station {
            toolbar.rotate_station(&mut cx);
        } else if toolbar.pickers.depot {
            toolbar.rotate_depot(&mut cx);
        }
    }
}

/// Completion callbacks for commands the toolbar posted earlier.
pub fn handle_command_outcomes(mut reader: MessageReader<CommandOutcome>, mut gui: GuiParams) {
    for msg in reader.read() {
        let (toolbar, mut cx) = gui.split();
        toolbar.on_command_outcome(&msg.command, &msg.cost, &mut cx);
    }
}

/// Turn the effects queued by toolbar logic into messages.
pub fn flush_effects(
    mut effects: ResMut<PendingEffects>,
    mut commands: MessageWriter<CommandRequest>,
    mut sounds: MessageWriter<PlaySound>,
    mut log: MessageWriter<TerminalLogEvent>,
    mut bridge_pickers: MessageWriter<ShowBridgePicker>,
    mut station_selects: MessageWriter<SelectStationRequest>,
) {
    let effects = std::mem::take(&mut *effects);
    commands.write_batch(
        effects
            .commands
            .into_iter()
            .map(|command| CommandRequest { command }),
    );
    sounds.write_batch(effects.sounds);
    log.write_batch(
        effects
            .log
            .into_iter()
            .map(|message| TerminalLogEvent { message }),
    );
    bridge_pickers.write_batch(effects.bridge_pickers);
    station_selects.write_batch(effects.station_selects);
}
