//! On-screen rail toolbar: one button per tool plus the terminal log.

use bevy::prelude::*;

use crate::toolbar::{RailToolButton, RailToolbarState, ToolbarClick};
use crate::ui::button_style::{button_color, button_node};
use crate::ui::logging::TerminalOutput;

/// Marker for the toolbar root node
#[derive(Component)]
pub struct RailToolbarRoot;

/// A toolbar button and the tool it presses
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton(pub RailToolButton);

pub fn setup_toolbar_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(8.0)),
                row_gap: Val::Px(8.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.15, 0.9)),
            BorderColor::all(Color::srgba(0.4, 0.4, 0.5, 0.8)),
            Visibility::Hidden,
            RailToolbarRoot,
        ))
        .with_children(|root| {
            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(4.0),
                ..default()
            })
            .with_children(|row| {
                for button in RailToolButton::ALL {
                    row.spawn((
                        Button,
                        button_node(),
                        BackgroundColor(button_color(false, true, false, false)),
                        ToolbarButton(button),
                        children![(
                            Text::new(button.label()),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.9, 0.9, 1.0)),
                        )],
                    ));
                }
            });
            root.spawn((
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.85, 0.8)),
                TerminalOutput,
            ));
        });
}

/// Handle clicks on the toolbar buttons
pub fn handle_toolbar_buttons(
    interactions: Query<(&Interaction, &ToolbarButton), Changed<Interaction>>,
    mut clicks: MessageWriter<ToolbarClick>,
) {
    for (interaction, button) in interactions.iter() {
        if *interaction == Interaction::Pressed {
            clicks.write(ToolbarClick { button: button.0 });
        }
    }
}

/// Show the lowered tool, the remove toggle and the toolbar itself.
pub fn update_toolbar_buttons(
    toolbar: Res<RailToolbarState>,
    mut root: Query<&mut Visibility, With<RailToolbarRoot>>,
    mut buttons: Query<(&ToolbarButton, &Interaction, &mut BackgroundColor)>,
) {
    for mut visibility in root.iter_mut() {
        *visibility = if toolbar.open {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for (button, interaction, mut color) in buttons.iter_mut() {
        let (lowered, enabled, danger) = match button.0 {
            RailToolButton::Remove => (toolbar.remove_active, toolbar.remove_enabled, true),
            other => (toolbar.is_lowered(other), true, false),
        };
        let hovered = *interaction == Interaction::Hovered;
        *color = button_color(lowered, enabled, danger, hovered).into();
    }
}
