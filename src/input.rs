use bevy::prelude::*;

use crate::context::ModifierState;
use crate::toolbar::{
    HotkeyInput, ModifiersChanged, PlaceAbort, RailToolbarSet, ToolbarHotkey, find_binding,
};

/// Keyboard and mouse input for the toolbar.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (track_modifiers, dispatch_hotkeys)
                .chain()
                .in_set(RailToolbarSet::Input),
        );
    }
}

/// Ctrl is the fn modifier, shift estimates and alt removes.
pub fn modifiers_from_keys(keys: &ButtonInput<KeyCode>) -> ModifierState {
    ModifierState {
        fn_mod: keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
        estimate_mod: keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        remove_mod: keys.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]),
    }
}

pub fn track_modifiers(
    keys: Res<ButtonInput<KeyCode>>,
    mut mods: ResMut<ModifierState>,
    mut changes: MessageWriter<ModifiersChanged>,
) {
    let current = modifiers_from_keys(&keys);
    if current == *mods {
        return;
    }
    let previous = *mods;
    *mods = current;
    changes.write(ModifiersChanged { previous, current });
}

/// Turn key and mouse presses into toolbar hotkeys. Escape aborts placement.
pub fn dispatch_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mods: Res<ModifierState>,
    mut hotkeys: MessageWriter<ToolbarHotkey>,
    mut aborts: MessageWriter<PlaceAbort>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        aborts.write(PlaceAbort);
    }

    let pressed = keys
        .get_just_pressed()
        .map(|key| HotkeyInput::Key(*key))
        .chain(mouse.get_just_pressed().map(|button| HotkeyInput::Mouse(*button)));
    for input in pressed {
        if let Some(binding) = find_binding(input, mods.fn_mod, mods.estimate_mod) {
            debug!("Hotkey {:?} -> {:?}", input, binding.target);
            hotkeys.write(ToolbarHotkey {
                target: binding.target,
                global: binding.global,
            });
        }
    }
}
