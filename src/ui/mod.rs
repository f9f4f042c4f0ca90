pub mod button_style;
pub mod logging;
pub mod toolbar_panel;

use bevy::prelude::*;

use crate::toolbar::RailToolbarSet;

/// On-screen toolbar buttons. Needs a window; headless apps skip it.
pub struct RailToolbarUiPlugin;

impl Plugin for RailToolbarUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, toolbar_panel::setup_toolbar_panel)
            .add_systems(
                Update,
                (
                    toolbar_panel::handle_toolbar_buttons.in_set(RailToolbarSet::Input),
                    toolbar_panel::update_toolbar_buttons.after(RailToolbarSet::Flush),
                ),
            );
    }
}
