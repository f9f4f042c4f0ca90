use crate::context::GuiContext;
use crate::map::DiagDirection;
use crate::toolbar::RailToolbarState;

/// Depot entrance direction chosen in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepotDirection {
    Fixed(DiagDirection),
    /// Face whichever neighbouring track the depot can connect to.
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepotGuiState {
    pub direction: DepotDirection,
    /// Which of several auto-detected candidates to use.
    pub auto_rotation: u8,
}

impl DepotGuiState {
    /// Rotate hotkey: a quarter turn, or the next auto-detected candidate.
    pub fn rotate(&mut self) {
        match self.direction {
            DepotDirection::Fixed(dir) => self.direction = DepotDirection::Fixed(dir.rotate_right()),
            DepotDirection::Auto => self.auto_rotation = self.auto_rotation.wrapping_add(1),
        }
    }

    pub fn reset_rotation(&mut self) {
        self.auto_rotation = 0;
    }
}

impl RailToolbarState {
    pub fn on_depot_picker_click(&mut self, direction: DepotDirection, cx: &mut GuiContext) {
        self.depot.direction = direction;
        self.depot.reset_rotation();
        cx.beep();
    }

    pub fn rotate_depot(&mut self, cx: &mut GuiContext) {
        self.depot.rotate();
        cx.beep();
    }
}
