use bevy::prelude::*;

use crate::constants::{
    TOOLBAR_BUTTON_SIZE, TOOLBAR_DISABLED, TOOLBAR_LOWERED, TOOLBAR_RAISED,
    TOOLBAR_REMOVE_ACTIVE,
};

pub const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);

pub fn button_node() -> Node {
    Node {
        min_width: Val::Px(TOOLBAR_BUTTON_SIZE),
        height: Val::Px(TOOLBAR_BUTTON_SIZE),
        padding: UiRect::all(Val::Px(6.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

/// Background of a toolbar button given its toolbar and pointer state.
pub fn button_color(lowered: bool, enabled: bool, danger: bool, hovered: bool) -> Color {
    match (enabled, lowered) {
        (false, _) => TOOLBAR_DISABLED,
        (true, true) if danger => TOOLBAR_REMOVE_ACTIVE,
        (true, true) => TOOLBAR_LOWERED,
        (true, false) if hovered => HOVERED_BUTTON,
        (true, false) => TOOLBAR_RAISED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_wins_over_everything() {
        assert_eq!(button_color(true, false, true, true), TOOLBAR_DISABLED);
        assert_eq!(button_color(true, true, true, false), TOOLBAR_REMOVE_ACTIVE);
        assert_eq!(button_color(false, true, false, true), HOVERED_BUTTON);
    }
}
