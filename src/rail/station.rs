use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u16);

impl StationId {
    /// Build a separate station even when one is adjacent.
    pub const NEW: StationId = StationId(0xFFFE);
    /// Let the engine pick an adjacent station to join.
    pub const INVALID: StationId = StationId(0xFFFF);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationClassId(pub u8);

impl StationClassId {
    pub const DEFAULT: StationClassId = StationClassId(0);
    pub const WAYPOINT: StationClassId = StationClassId(1);
}

/// One station or waypoint type offered by a class.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSpecInfo {
    pub name: String,
    /// Bit `n` set forbids `n + 1` platforms.
    pub disallowed_platforms: u8,
    /// Bit `n` set forbids a platform length of `n + 1`.
    pub disallowed_lengths: u8,
    /// Buildable now (introduction date and callbacks permitting).
    pub available: bool,
}

impl StationSpecInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disallowed_platforms: 0,
            disallowed_lengths: 0,
            available: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationClassInfo {
    pub id: StationClassId,
    pub name: String,
    pub specs: Vec<StationSpecInfo>,
}

/// Station and waypoint types supplied by the host's content catalogs.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct StationCatalog {
    pub classes: Vec<StationClassInfo>,
}

impl Default for StationCatalog {
    fn default() -> Self {
        Self {
            classes: vec![
                StationClassInfo {
                    id: StationClassId::DEFAULT,
                    name: "Default stations".to_string(),
                    specs: vec![StationSpecInfo::new("Default station")],
                },
                StationClassInfo {
                    id: StationClassId::WAYPOINT,
                    name: "Waypoints".to_string(),
                    specs: vec![StationSpecInfo::new("Default waypoint")],
                },
            ],
        }
    }
}

impl StationCatalog {
    pub fn class(&self, id: StationClassId) -> Option<&StationClassInfo> {
        self.classes.iter().find(|class| class.id == id)
    }

    pub fn spec(&self, class: StationClassId, station_type: u16) -> Option<&StationSpecInfo> {
        self.class(class)?.specs.get(station_type as usize)
    }

    /// More than the default station exists, so the picker shows lists.
    pub fn has_custom_stations(&self) -> bool {
        self.classes
            .iter()
            .filter(|class| class.id != StationClassId::WAYPOINT)
            .map(|class| class.specs.len())
            .sum::<usize>()
            > 1
    }

    /// Number of waypoint types; the default waypoint always counts.
    pub fn waypoint_count(&self) -> u16 {
        self.class(StationClassId::WAYPOINT)
            .map(|class| class.specs.len().max(1) as u16)
            .unwrap_or(1)
    }

    /// Classes listed in the station picker, by id, matching `filter`
    /// case-insensitively.
    pub fn picker_classes(&self, filter: &str) -> Vec<StationClassId> {
        let filter = filter.to_lowercase();
        let mut ids: Vec<StationClassId> = self
            .classes
            .iter()
            .filter(|class| class.id != StationClassId::WAYPOINT)
            .filter(|class| !class.specs.is_empty())
            .filter(|class| filter.is_empty() || class.name.to_lowercase().contains(&filter))
            .map(|class| class.id)
            .collect();
        ids.sort();
        ids
    }
}
