use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignalType {
    Normal = 0,
    Entry = 1,
    Exit = 2,
    Combo = 3,
    Pbs = 4,
    #[default]
    PbsOneway = 5,
}

impl SignalType {
    pub const ALL: [SignalType; 6] = [
        SignalType::Normal,
        SignalType::Entry,
        SignalType::Exit,
        SignalType::Combo,
        SignalType::Pbs,
        SignalType::PbsOneway,
    ];

    /// Last type in the cycling order.
    pub const LAST: SignalType = SignalType::PbsOneway;

    /// Path signals are the only types shown in the basic picker.
    pub fn is_path_signal(self) -> bool {
        matches!(self, SignalType::Pbs | SignalType::PbsOneway)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignalVariant {
    #[default]
    Electric = 0,
    Semaphore = 1,
}

impl SignalVariant {
    /// Semaphores before the configured year, lights afterwards.
    pub fn for_year(year: i32, semaphore_build_before: i32) -> Self {
        if year < semaphore_build_before {
            SignalVariant::Semaphore
        } else {
            SignalVariant::Electric
        }
    }
}

/// Which signal types the build tool cycles through when clicking an
/// existing signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCycle {
    #[default]
    PathOnly,
    All,
}

/// Which signal types the picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalGuiMode {
    #[default]
    PathOnly,
    All,
}
