use crate::constants::{MAX_SIGNAL_DENSITY, MIN_SIGNAL_DENSITY};
use crate::context::GuiContext;
use crate::rail::{SignalGuiMode, SignalType, SignalVariant};
use crate::toolbar::RailToolbarState;

/// Signal picker selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalGuiState {
    pub signal_type: SignalType,
    pub variant: SignalVariant,
    /// Clicking an existing signal converts it to the selected type.
    pub convert: bool,
}

impl SignalGuiState {
    pub fn reset_variant(&mut self, year: i32, semaphore_build_before: i32) {
        self.variant = SignalVariant::for_year(year, semaphore_build_before);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalPickerButton {
    Signal {
        variant: SignalVariant,
        signal_type: SignalType,
    },
    Convert,
    DensityDecrease,
    DensityIncrease,
}

/// Signal buttons shown for a picker mode, semaphores first.
pub fn visible_signal_buttons(mode: SignalGuiMode) -> Vec<(SignalVariant, SignalType)> {
    [SignalVariant::Semaphore, SignalVariant::Electric]
        .into_iter()
        .flat_map(|variant| {
            SignalType::ALL
                .into_iter()
                .filter(move |ty| mode == SignalGuiMode::All || ty.is_path_signal())
                .map(move |ty| (variant, ty))
        })
        .collect()
}

impl RailToolbarState {
    pub fn open_signal_picker(&mut self) {
        self.pickers.signal = true;
    }

    pub fn close_signal_picker(&mut self) {
        self.pickers.signal = false;
        self.signal.convert = false;
    }

    pub fn on_signal_picker_click(&mut self, button: SignalPickerButton, cx: &mut GuiContext) {
        match button {
            SignalPickerButton::Signal {
                variant,
                signal_type,
            } => {
                self.signal.variant = variant;
                self.signal.signal_type = signal_type;
                // Picking a signal means building one.
                if self.remove_active {
                    self.toggle_remove(cx);
                }
            }
            SignalPickerButton::Convert => {
                self.signal.convert = !self.signal.convert;
            }
            SignalPickerButton::DensityDecrease => {
                if cx.settings.drag_signals_density <= MIN_SIGNAL_DENSITY {
                    return;
                }
                cx.settings.drag_signals_density -= 1;
            }
            SignalPickerButton::DensityIncrease => {
                if cx.settings.drag_signals_density >= MAX_SIGNAL_DENSITY {
                    return;
                }
                cx.settings.drag_signals_density += 1;
            }
        }
        cx.beep();
    }
}
