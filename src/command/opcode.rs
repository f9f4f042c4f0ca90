/// Engine command posted by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    BuildSingleRail,
    RemoveSingleRail,
    BuildRailroadTrack,
    RemoveRailroadTrack,
    BuildTrainDepot,
    BuildRailWaypoint,
    RemoveFromRailWaypoint,
    BuildRailStation,
    RemoveFromRailStation,
    BuildSignals,
    RemoveSignals,
    BuildSignalTrack,
    RemoveSignalTrack,
    BuildTunnel,
    BuildBridge,
    ConvertRail,
    LevelLand,
    ClearArea,
}

/// Headline shown when a command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMessage {
    CantBuildRailroadTrack,
    CantRemoveRailroadTrack,
    CantBuildTrainDepot,
    CantBuildTrainWaypoint,
    CantRemoveTrainWaypoint,
    CantBuildRailroadStation,
    CantRemovePartOfStation,
    CantBuildSignalsHere,
    CantRemoveSignalsFromHere,
    CantConvertSignalsHere,
    CantBuildTunnelHere,
    CantBuildBridgeHere,
    CantConvertRailType,
    CantLevelLand,
    CantClearArea,
}

impl ErrorMessage {
    pub fn describe(self) -> &'static str {
        match self {
            ErrorMessage::CantBuildRailroadTrack => "can't build railway track here",
            ErrorMessage::CantRemoveRailroadTrack => "can't remove railway track from here",
            ErrorMessage::CantBuildTrainDepot => "can't build train depot here",
            ErrorMessage::CantBuildTrainWaypoint => "can't build train waypoint here",
            ErrorMessage::CantRemoveTrainWaypoint => "can't remove train waypoint here",
            ErrorMessage::CantBuildRailroadStation => "can't build railway station here",
            ErrorMessage::CantRemovePartOfStation => "can't remove part of station",
            ErrorMessage::CantBuildSignalsHere => "can't build signals here",
            ErrorMessage::CantRemoveSignalsFromHere => "can't remove signals from here",
            ErrorMessage::CantConvertSignalsHere => "can't convert signals here",
            ErrorMessage::CantBuildTunnelHere => "can't build tunnel here",
            ErrorMessage::CantBuildBridgeHere => "can't build bridge here",
            ErrorMessage::CantConvertRailType => "can't convert rail type here",
            ErrorMessage::CantLevelLand => "can't level land here",
            ErrorMessage::CantClearArea => "can't clear this area",
        }
    }
}
