use bevy::prelude::*;

use crate::toolbar::buttons::{HotkeyAction, RailToolButton};

/// What a hotkey does once it reaches the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyTarget {
    Button(RailToolButton),
    Action(HotkeyAction),
}

/// Key or mouse button that triggers a hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyInput {
    Key(KeyCode),
    Mouse(MouseButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub input: HotkeyInput,
    pub ctrl: bool,
    pub shift: bool,
    /// Works while the toolbar is closed, opening it first.
    pub global: bool,
    pub target: HotkeyTarget,
}

const fn key(code: KeyCode, target: HotkeyTarget) -> HotkeyBinding {
    HotkeyBinding {
        input: HotkeyInput::Key(code),
        ctrl: false,
        shift: false,
        global: false,
        target,
    }
}

const fn button(code: KeyCode, button: RailToolButton) -> HotkeyBinding {
    key(code, HotkeyTarget::Button(button))
}

const AUTORAIL: HotkeyTarget = HotkeyTarget::Button(RailToolButton::Autorail);
const POLYRAIL: HotkeyTarget = HotkeyTarget::Action(HotkeyAction::Polyrail);
const NEW_POLYRAIL: HotkeyTarget = HotkeyTarget::Action(HotkeyAction::NewPolyrail);

/// Default key bindings of the rail toolbar.
///
/// The station sized, station drag-and-drop and blueprint hotkeys have no
/// default key.
pub const RAIL_TOOLBAR_HOTKEYS: &[HotkeyBinding] = &[
    button(KeyCode::Digit1, RailToolButton::BuildNs),
    button(KeyCode::Digit2, RailToolButton::BuildX),
    button(KeyCode::Digit3, RailToolButton::BuildEw),
    button(KeyCode::Digit4, RailToolButton::BuildY),
    key(KeyCode::Digit5, AUTORAIL),
    HotkeyBinding {
        global: true,
        ..key(KeyCode::KeyA, AUTORAIL)
    },
    HotkeyBinding {
        ctrl: true,
        ..key(KeyCode::Digit5, POLYRAIL)
    },
    HotkeyBinding {
        ctrl: true,
        global: true,
        ..key(KeyCode::KeyA, POLYRAIL)
    },
    HotkeyBinding {
        ctrl: true,
        shift: true,
        ..key(KeyCode::Digit5, NEW_POLYRAIL)
    },
    HotkeyBinding {
        ctrl: true,
        shift: true,
        global: true,
        ..key(KeyCode::KeyA, NEW_POLYRAIL)
    },
    button(KeyCode::Digit6, RailToolButton::Demolish),
    button(KeyCode::Digit7, RailToolButton::Depot),
    button(KeyCode::Digit8, RailToolButton::Waypoint),
    button(KeyCode::Digit9, RailToolButton::Station),
    button(KeyCode::KeyS, RailToolButton::Signals),
    button(KeyCode::KeyB, RailToolButton::Bridge),
    button(KeyCode::KeyT, RailToolButton::Tunnel),
    button(KeyCode::KeyR, RailToolButton::Remove),
    button(KeyCode::KeyC, RailToolButton::Convert),
    HotkeyBinding {
        input: HotkeyInput::Mouse(MouseButton::Middle),
        ctrl: false,
        shift: false,
        global: false,
        target: HotkeyTarget::Action(HotkeyAction::BlueprintRotate),
    },
];

/// Binding for an input with the given modifiers. Modifiers must match
/// exactly, so ctrl+5 never also triggers plain 5.
pub fn find_binding(input: HotkeyInput, ctrl: bool, shift: bool) -> Option<&'static HotkeyBinding> {
    RAIL_TOOLBAR_HOTKEYS
        .iter()
        .find(|binding| binding.input == input && binding.ctrl == ctrl && binding.shift == shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_select_polyrail_variants() {
        let plain = find_binding(HotkeyInput::Key(KeyCode::Digit5), false, false).unwrap();
        assert_eq!(plain.target, AUTORAIL);
        let ctrl = find_binding(HotkeyInput::Key(KeyCode::Digit5), true, false).unwrap();
        assert_eq!(ctrl.target, POLYRAIL);
        let both = find_binding(HotkeyInput::Key(KeyCode::Digit5), true, true).unwrap();
        assert_eq!(both.target, NEW_POLYRAIL);
    }

    #[test]
    fn only_letter_a_bindings_are_global() {
        for binding in RAIL_TOOLBAR_HOTKEYS {
            assert_eq!(
                binding.global,
                binding.input == HotkeyInput::Key(KeyCode::KeyA),
                "{binding:?}"
            );
        }
    }

    #[test]
    fn unbound_input_finds_nothing() {
        assert!(find_binding(HotkeyInput::Key(KeyCode::KeyZ), false, false).is_none());
        assert!(find_binding(HotkeyInput::Key(KeyCode::KeyS), false, true).is_none());
    }
}
