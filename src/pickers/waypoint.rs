use crate::context::GuiContext;
use crate::rail::StationClassId;
use crate::toolbar::RailToolbarState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaypointGuiState {
    pub waypoint_type: u16,
    pub count: u16,
}

impl Default for WaypointGuiState {
    fn default() -> Self {
        Self {
            waypoint_type: 0,
            count: 1,
        }
    }
}

impl RailToolbarState {
    /// Returns false when the type is not currently buildable.
    pub fn on_waypoint_picker_click(&mut self, waypoint_type: u16, cx: &mut GuiContext) -> bool {
        let available = cx
            .catalog
            .spec(StationClassId::WAYPOINT, waypoint_type)
            .is_some_and(|spec| spec.available);
        if !available {
            return false;
        }
        self.waypoint.waypoint_type = waypoint_type;
        cx.beep();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::rail::{StationClassId, StationSpecInfo};
    use crate::test_utils::TestGui;

    #[test]
    fn unavailable_waypoint_is_rejected() {
        let mut gui = TestGui::new();
        let mut future = StationSpecInfo::new("Future waypoint");
        future.available = false;
        if let Some(class) = gui
            .catalog
            .classes
            .iter_mut()
            .find(|class| class.id == StationClassId::WAYPOINT)
        {
            class.specs.push(StationSpecInfo::new("Rustic waypoint"));
            class.specs.push(future);
        }

        assert!(gui.run(|toolbar, cx| toolbar.on_waypoint_picker_click(1, cx)));
        assert_eq!(gui.toolbar.waypoint.waypoint_type, 1);
        assert!(!gui.run(|toolbar, cx| toolbar.on_waypoint_picker_click(2, cx)));
        assert!(!gui.run(|toolbar, cx| toolbar.on_waypoint_picker_click(9, cx)));
        assert_eq!(gui.toolbar.waypoint.waypoint_type, 1);
    }
}
