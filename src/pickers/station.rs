use crate::constants::MAX_STATION_SIZE;
use crate::context::GuiContext;
use crate::map::Axis;
use crate::rail::{StationCatalog, StationClassId, StationSpecInfo};
use crate::settings::RailGuiSettings;
use crate::toolbar::RailToolbarState;

/// Station picker selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationGuiState {
    pub orientation: Axis,
    pub station_class: StationClassId,
    pub station_type: u16,
    /// Types in the selected class.
    pub station_count: u16,
    /// The catalog offers more than the default station.
    pub newstations: bool,
    /// Class list filter text.
    pub filter: String,
}

impl Default for StationGuiState {
    fn default() -> Self {
        Self {
            orientation: Axis::X,
            station_class: StationClassId::DEFAULT,
            station_type: 0,
            station_count: 1,
            newstations: false,
            filter: String::new(),
        }
    }
}

impl StationGuiState {
    /// Platform count and length as placed on the map: X stations are laid
    /// out lengthwise along x.
    pub fn footprint(&self, settings: &RailGuiSettings) -> (u32, u32) {
        let tracks = settings.station_numtracks as u32;
        let length = settings.station_platlength as u32;
        match self.orientation {
            Axis::X => (length, tracks),
            Axis::Y => (tracks, length),
        }
    }

    /// Reconcile the selection with the catalog when the picker opens.
    pub fn on_picker_open(&mut self, catalog: &StationCatalog) {
        self.newstations = catalog.has_custom_stations();
        let class = catalog
            .class(self.station_class)
            .filter(|_| self.newstations);
        match class {
            Some(class) => {
                self.station_count = class.specs.len() as u16;
                if self.station_type >= self.station_count {
                    self.station_type = 0;
                }
            }
            None => {
                self.station_class = StationClassId::DEFAULT;
                self.station_type = 0;
                self.station_count = catalog
                    .class(StationClassId::DEFAULT)
                    .map(|class| class.specs.len() as u16)
                    .unwrap_or(1);
            }
        }
    }
}

/// First platform count or length the mask allows, starting at one.
fn first_allowed(mask: u8) -> u8 {
    (0..MAX_STATION_SIZE)
        .find(|bit| mask & (1 << bit) == 0)
        .map(|bit| bit + 1)
        .unwrap_or(1)
}

fn is_disallowed(mask: u8, value: u8) -> bool {
    value >= 1 && mask & (1 << (value - 1)) != 0
}

/// Move fixed-size platform settings off values the station type forbids.
pub fn check_selected_size(spec: Option<&StationSpecInfo>, settings: &mut RailGuiSettings) {
    let Some(spec) = spec else {
        return;
    };
    if settings.station_dragdrop {
        return;
    }
    if is_disallowed(spec.disallowed_platforms, settings.station_numtracks) {
        settings.station_numtracks = 1;
        if spec.disallowed_platforms != 0xFF {
            while is_disallowed(spec.disallowed_platforms, settings.station_numtracks) {
                settings.station_numtracks += 1;
            }
        }
    }
    if is_disallowed(spec.disallowed_lengths, settings.station_platlength) {
        settings.station_platlength = 1;
        if spec.disallowed_lengths != 0xFF {
            while is_disallowed(spec.disallowed_lengths, settings.station_platlength) {
                settings.station_platlength += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationPickerButton {
    Orientation(Axis),
    PlatformCount(u8),
    PlatformLength(u8),
    DragDrop,
    Coverage(bool),
    Class(StationClassId),
    Type(u16),
    Filter(String),
}

impl RailToolbarState {
    pub(crate) fn open_station_picker(&mut self, cx: &mut GuiContext) {
        self.pickers.station = true;
        self.station.on_picker_open(cx.catalog);
        let spec = cx
            .catalog
            .spec(self.station.station_class, self.station.station_type);
        check_selected_size(spec, cx.settings);
        self.update_station_selection(cx);
    }

    pub fn close_station_picker(&mut self, cx: &mut GuiContext) {
        self.pickers.station = false;
        self.join.close_select_dialog();
        cx.highlight.coverage_radius = None;
    }

    /// Platform buttons are greyed out beyond the station spread and where
    /// the selected type forbids the value.
    pub fn platform_count_enabled(&self, count: u8, cx: &GuiContext) -> bool {
        let spec = cx
            .catalog
            .spec(self.station.station_class, self.station.station_type);
        count <= cx.settings.station_spread
            && !spec.is_some_and(|spec| is_disallowed(spec.disallowed_platforms, count))
    }

    pub fn platform_length_enabled(&self, length: u8, cx: &GuiContext) -> bool {
        let spec = cx
            .catalog
            .spec(self.station.station_class, self.station.station_type);
        length <= cx.settings.station_spread
            && !spec.is_some_and(|spec| is_disallowed(spec.disallowed_lengths, length))
    }

    /// Footprint and coverage shown while the station tool is active.
    pub(crate) fn update_station_selection(&self, cx: &mut GuiContext) {
        if cx.settings.station_dragdrop {
            cx.highlight.set_select_size(1, 1);
        } else if !self.remove_active {
            let (w, h) = self.station.footprint(cx.settings);
            cx.highlight.set_select_size(w, h);
        }
        cx.highlight.coverage_radius =
            if cx.settings.station_show_coverage || cx.settings.improved_station_join {
                Some(cx.settings.catchment_radius)
            } else {
                None
            };
    }

    pub fn rotate_station(&mut self, cx: &mut GuiContext) {
        self.station.orientation = self.station.orientation.other();
        cx.beep();
        self.join.close_select_dialog();
        self.update_station_selection(cx);
    }

    pub fn on_station_picker_click(&mut self, button: StationPickerButton, cx: &mut GuiContext) {
        match button {
            StationPickerButton::Orientation(axis) => {
                self.station.orientation = axis;
            }
            StationPickerButton::PlatformCount(count) => {
                if count == 0 || count > MAX_STATION_SIZE || !self.platform_count_enabled(count, cx)
                {
                    return;
                }
                cx.settings.station_numtracks = count;
                cx.settings.station_dragdrop = false;
                if let Some(spec) = cx
                    .catalog
                    .spec(self.station.station_class, self.station.station_type)
                    && is_disallowed(spec.disallowed_lengths, cx.settings.station_platlength)
                {
                    cx.settings.station_platlength = first_allowed(spec.disallowed_lengths);
                }
            }
            StationPickerButton::PlatformLength(length) => {
                if length == 0
                    || length > MAX_STATION_SIZE
                    || !self.platform_length_enabled(length, cx)
                {
                    return;
                }
                cx.settings.station_platlength = length;
                cx.settings.station_dragdrop = false;
                if let Some(spec) = cx
                    .catalog
                    .spec(self.station.station_class, self.station.station_type)
                    && is_disallowed(spec.disallowed_platforms, cx.settings.station_numtracks)
                {
                    cx.settings.station_numtracks = first_allowed(spec.disallowed_platforms);
                }
            }
            StationPickerButton::DragDrop => {
                cx.settings.station_dragdrop = !cx.settings.station_dragdrop;
                if let Some(spec) = cx
                    .catalog
                    .spec(self.station.station_class, self.station.station_type)
                {
                    if is_disallowed(spec.disallowed_platforms, cx.settings.station_numtracks) {
                        cx.settings.station_numtracks = first_allowed(spec.disallowed_platforms);
                    }
                    if is_disallowed(spec.disallowed_lengths, cx.settings.station_platlength) {
                        cx.settings.station_platlength = first_allowed(spec.disallowed_lengths);
                    }
                }
            }
            StationPickerButton::Coverage(show) => {
                cx.settings.station_show_coverage = show;
            }
            StationPickerButton::Class(class_id) => {
                if class_id == self.station.station_class {
                    return;
                }
                let Some(class) = cx.catalog.class(class_id) else {
                    return;
                };
                self.station.station_class = class_id;
                self.station.station_count = class.specs.len() as u16;
                self.station.station_type = self
                    .station
                    .station_type
                    .min(self.station.station_count.saturating_sub(1));
                let spec = cx.catalog.spec(class_id, self.station.station_type);
                check_selected_size(spec, cx.settings);
            }
            StationPickerButton::Type(station_type) => {
                if station_type >= self.station.station_count {
                    return;
                }
                let Some(spec) = cx.catalog.spec(self.station.station_class, station_type) else {
                    return;
                };
                if !spec.available {
                    return;
                }
                self.station.station_type = station_type;
                check_selected_size(Some(spec), cx.settings);
            }
            StationPickerButton::Filter(text) => {
                self.station.filter = text;
                self.update_station_selection(cx);
                return;
            }
        }
        cx.beep();
        self.join.close_select_dialog();
        self.update_station_selection(cx);
    }
}
