use bevy::prelude::*;

use crate::context::{GameYear, LocalCompany, ModifierState, PendingEffects};
use crate::highlight::TileHighlight;
use crate::rail::{RailTypes, StationCatalog};
use crate::settings::RailGuiSettings;

pub mod buttons;
pub mod callbacks;
pub mod click;
pub mod hotkeys;
pub mod messages;
pub mod place;
pub mod remove;
pub mod state;
pub mod systems;


pub use buttons::{HotkeyAction, RailToolButton, UserAction};
pub use hotkeys::*;
pub use messages::*;
pub use state::{OpenPickers, RailToolbarState};

/// Frame order of the toolbar: raw input is turned into messages, toolbar
/// logic handles them, queued effects are flushed, then the host answers
/// the command requests.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum RailToolbarSet {
    Input,
    Toolbar,
    Flush,
    Host,
}

/// Plugin that owns the rail construction toolbar state and its systems
pub struct RailToolbarPlugin;

impl Plugin for RailToolbarPlugin {
    fn build(&self, app: &mut App) {
        // Register resources
        app.init_resource::<RailToolbarState>()
            .init_resource::<RailGuiSettings>()
            .init_resource::<TileHighlight>()
            .init_resource::<StationCatalog>()
            .init_resource::<RailTypes>()
            .init_resource::<ModifierState>()
            .init_resource::<GameYear>()
            .init_resource::<LocalCompany>()
            .init_resource::<PendingEffects>();

        // Register messages
        app.add_message::<ToolbarClick>()
            .add_message::<ToolbarHotkey>()
            .add_message::<ShowRailToolbar>()
            .add_message::<CloseRailToolbar>()
            .add_message::<PlaceObject>()
            .add_message::<PlaceMouseUp>()
            .add_message::<PlacePresize>()
            .add_message::<PlaceAbort>()
            .add_message::<ShowBridgePicker>()
            .add_message::<BridgeChosen>()
            .add_message::<SelectStationRequest>()
            .add_message::<StationChosen>()
            .add_message::<SignalPickerClick>()
            .add_message::<StationPickerClick>()
            .add_message::<DepotPickerClick>()
            .add_message::<PickerRotate>()
            .add_message::<WaypointPickerClick>()
            .add_message::<ModifiersChanged>();

        app.configure_sets(
            Update,
            (
                RailToolbarSet::Input,
                RailToolbarSet::Toolbar,
                RailToolbarSet::Flush,
                RailToolbarSet::Host,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                systems::handle_command_outcomes,
                systems::handle_show_toolbar,
                systems::handle_close_toolbar,
                systems::handle_modifier_changes,
                systems::handle_toolbar_clicks,
                systems::handle_toolbar_hotkeys,
                systems::handle_picker_clicks,
                systems::handle_dialog_answers,
                systems::handle_place_presize,
                systems::handle_place_object,
                systems::handle_place_mouse_up,
                systems::handle_place_abort,
            )
                .chain()
                .in_set(RailToolbarSet::Toolbar),
        );

        app.add_systems(
            Update,
            systems::flush_effects
                .run_if(|effects: Res<PendingEffects>| !effects.is_empty())
                .in_set(RailToolbarSet::Flush),
        );
    }
}
