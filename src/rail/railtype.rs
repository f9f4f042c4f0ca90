use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Index into the rail type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RailType(pub u8);

impl RailType {
    pub const RAIL: RailType = RailType(0);
    pub const ELECTRIC: RailType = RailType(1);
    pub const MONORAIL: RailType = RailType(2);
    pub const MAGLEV: RailType = RailType(3);
}

#[derive(Debug, Clone, PartialEq)]
pub struct RailTypeInfo {
    pub id: RailType,
    pub label: String,
    /// Label used in the replacement dropdown.
    pub replace_label: String,
    /// km/h, zero means unlimited and is not shown.
    pub max_speed: u16,
    /// The local company may build this type.
    pub available: bool,
    /// Introduced anywhere in the game so far.
    pub introduced: bool,
    /// Needs catenary; hidden while electrified rail is disabled.
    pub electrified: bool,
}

impl RailTypeInfo {
    pub fn new(id: RailType, label: impl Into<String>, max_speed: u16) -> Self {
        let label = label.into();
        Self {
            id,
            replace_label: label.clone(),
            label,
            max_speed,
            available: true,
            introduced: true,
            electrified: false,
        }
    }
}

/// All rail types known to the game, in display order.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RailTypes {
    pub types: Vec<RailTypeInfo>,
}

impl Default for RailTypes {
    fn default() -> Self {
        let mut electric = RailTypeInfo::new(RailType::ELECTRIC, "Electrified railway", 0);
        electric.electrified = true;
        let mut monorail = RailTypeInfo::new(RailType::MONORAIL, "Monorail", 0);
        monorail.available = false;
        monorail.introduced = false;
        let mut maglev = RailTypeInfo::new(RailType::MAGLEV, "Maglev", 0);
        maglev.available = false;
        maglev.introduced = false;
        Self {
            types: vec![
                RailTypeInfo::new(RailType::RAIL, "Railway", 0),
                electric,
                monorail,
                maglev,
            ],
        }
    }
}

impl RailTypes {
    pub fn get(&self, railtype: RailType) -> Option<&RailTypeInfo> {
        self.types.iter().find(|info| info.id == railtype)
    }

    pub fn is_available(&self, railtype: RailType) -> bool {
        self.get(railtype).is_some_and(|info| info.available)
    }

    /// The company can build at least one rail type.
    pub fn any_available(&self) -> bool {
        self.types.iter().any(|info| info.available)
    }

    pub fn first_available(&self) -> Option<RailType> {
        self.types.iter().find(|info| info.available).map(|info| info.id)
    }

    pub fn last_available(&self) -> Option<RailType> {
        self.types
            .iter()
            .rev()
            .find(|info| info.available)
            .map(|info| info.id)
    }

    pub fn set_available(&mut self, railtype: RailType, available: bool) {
        if let Some(info) = self.types.iter_mut().find(|info| info.id == railtype) {
            info.available = available;
        }
    }
}

/// Entry of the rail type dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct DropDownItem {
    pub label: String,
    pub value: Option<RailType>,
    pub disabled: bool,
}

/// Build the rail type dropdown list.
///
/// The construction list shows introduced types and greys out those the
/// company cannot build. The replacement list shows every known type with its
/// replacement label. An empty list yields a single disabled "None" entry.
pub fn rail_type_dropdown(
    railtypes: &RailTypes,
    for_replacement: bool,
    all_option: bool,
) -> Vec<DropDownItem> {
    let mut list = Vec::new();

    if all_option {
        list.push(DropDownItem {
            label: "All rail types".to_string(),
            value: None,
            disabled: false,
        });
    }

    for info in &railtypes.types {
        if !for_replacement && !info.introduced {
            continue;
        }
        let label = if for_replacement {
            info.replace_label.clone()
        } else if info.max_speed > 0 {
            format!("{} ({} km/h)", info.label, info.max_speed)
        } else {
            info.label.clone()
        };
        list.push(DropDownItem {
            label,
            value: Some(info.id),
            disabled: !info.available,
        });
    }

    if list.is_empty() {
        list.push(DropDownItem {
            label: "None".to_string(),
            value: None,
            disabled: true,
        });
    }

    list
}
