//! End-to-end toolbar flows against the scripted host
//!
//! Each test drives the headless app with input messages and checks what the
//! host engine ended up executing.

mod common;

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;
use common::{engine, open_toolbar_app, read_messages, send_and_update};
use rail_toolbar::command::{CommandId, CommandRequest};
use rail_toolbar::context::ModifierState;
use rail_toolbar::highlight::{DragProcess, DrawStyle, PlaceDrag, PlaceMethod, TileHighlight};
use rail_toolbar::map::{Axis, StationTileInfo, Track, Trackdir};
use rail_toolbar::placement::StationChoice;
use rail_toolbar::rail::{StationClassId, StationId};
use rail_toolbar::settings::RailGuiSettings;
use rail_toolbar::toolbar::{
    BridgeChosen, ModifiersChanged, PlaceMouseUp, PlaceObject, RailToolButton, RailToolbarState,
    SelectStationRequest, ShowBridgePicker, StationChosen, ToolbarClick,
};

fn click(app: &mut App, button: RailToolButton) {
    send_and_update(app, [ToolbarClick { button }]);
}

fn executed(app: &mut App) -> Vec<CommandId> {
    engine(app).executed.iter().map(|command| command.cmd).collect()
}

/// Test the select-station dialog holds the build back until answered
#[test]
fn test_station_join_dialog() {
    let mut app = open_toolbar_app();
    engine(&mut app).nearby_stations = vec![StationId(3), StationId(8)];
    app.insert_resource(ModifierState {
        fn_mod: true,
        ..default()
    });

    click(&mut app, RailToolButton::Station);
    send_and_update(&mut app, [PlaceObject {
        tile: TilePos { x: 10, y: 10 },
    }]);

    let requests = read_messages::<SelectStationRequest>(&mut app);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].candidates, vec![StationId(3), StationId(8)]);
    assert!(executed(&mut app).is_empty());

    send_and_update(&mut app, [StationChosen {
        choice: StationChoice::Join(StationId(8)),
    }]);
    let built = engine(&mut app).executed.clone();
    assert_eq!(built.len(), 1);
    assert_eq!(built[0].cmd, CommandId::BuildRailStation);
    assert_eq!(built[0].p2 >> 16, 8);
}

/// Test the bridge picker answer builds the chosen bridge
#[test]
fn test_bridge_picker_round_trip() {
    let mut app = open_toolbar_app();
    click(&mut app, RailToolButton::Bridge);
    let span = (TilePos { x: 4, y: 4 }, TilePos { x: 4, y: 9 });
    send_and_update(&mut app, [PlaceMouseUp {
        drag: PlaceDrag {
            method: PlaceMethod::XOrY,
            process: DragProcess::BuildBridge,
            start: span.0,
            end: span.1,
            style: DrawStyle::Rect,
            fract: (8, 8),
            poly_dir: None,
        },
    }]);

    let pickers = read_messages::<ShowBridgePicker>(&mut app);
    assert_eq!(pickers.len(), 1);
    assert_eq!((pickers[0].start, pickers[0].end), span);
    // The tool is released while the dialog is open.
    assert_eq!(app.world().resource::<RailToolbarState>().lowered(), None);

    send_and_update(&mut app, [BridgeChosen {
        start: span.0,
        end: span.1,
        bridge_type: 2,
    }]);
    assert_eq!(executed(&mut app), vec![CommandId::BuildBridge]);
}

/// Test ctrl over the polyline tool levels the land before laying track
#[test]
fn test_polyline_terraform_then_rail() {
    let mut app = open_toolbar_app();
    app.world_mut()
        .resource_mut::<RailGuiSettings>()
        .enable_polyrail_terraform = true;

    click(&mut app, RailToolButton::Polyrail);
    send_and_update(&mut app, [ModifiersChanged {
        previous: ModifierState::default(),
        current: ModifierState {
            fn_mod: true,
            ..default()
        },
    }]);
    assert!(app.world().resource::<TileHighlight>().poly_terraform);

    send_and_update(&mut app, [PlaceMouseUp {
        drag: PlaceDrag {
            method: PlaceMethod::RailDirs,
            process: DragProcess::PlaceRail,
            start: TilePos { x: 10, y: 10 },
            end: TilePos { x: 6, y: 10 },
            style: DrawStyle::Line(Track::X),
            fract: (8, 8),
            poly_dir: Some(Trackdir::XNe),
        },
    }]);
    assert_eq!(
        executed(&mut app),
        vec![CommandId::LevelLand, CommandId::LevelLand]
    );

    // Rail follows once the levelling outcomes come back.
    app.update();
    assert_eq!(
        executed(&mut app),
        vec![
            CommandId::LevelLand,
            CommandId::LevelLand,
            CommandId::BuildRailroadTrack
        ]
    );
    assert!(
        engine(&mut app)
            .rails
            .contains_key(&TilePos { x: 8, y: 10 })
    );
    assert_eq!(app.world().resource::<TileHighlight>().snap_points.len(), 2);
}

/// Test the improved join policy builds with the ctrl-clicked station
#[test]
fn test_improved_join_uses_picked_station() {
    let mut app = open_toolbar_app();
    app.world_mut()
        .resource_mut::<RailGuiSettings>()
        .improved_station_join = true;
    engine(&mut app).station_tiles.insert(
        TilePos { x: 20, y: 20 },
        StationTileInfo {
            station: StationId(5),
            axis: Axis::X,
            class: StationClassId::DEFAULT,
            station_type: 0,
            is_waypoint: false,
        },
    );

    click(&mut app, RailToolButton::Station);
    app.insert_resource(ModifierState {
        fn_mod: true,
        ..default()
    });
    send_and_update(&mut app, [PlaceObject {
        tile: TilePos { x: 20, y: 20 },
    }]);
    assert!(read_messages::<CommandRequest>(&mut app).is_empty());

    app.insert_resource(ModifierState::default());
    send_and_update(&mut app, [PlaceObject {
        tile: TilePos { x: 22, y: 20 },
    }]);
    let built = engine(&mut app).executed.clone();
    assert_eq!(built.len(), 1);
    assert_eq!(built[0].p2 >> 16, 5);
}

/// Test releasing ctrl on another tool stops the polyline from levelling
#[test]
fn test_polyline_terraform_ends_with_ctrl_release_elsewhere() {
    let mut app = open_toolbar_app();
    app.world_mut()
        .resource_mut::<RailGuiSettings>()
        .enable_polyrail_terraform = true;
    let ctrl = ModifierState {
        fn_mod: true,
        ..default()
    };

    click(&mut app, RailToolButton::Polyrail);
    send_and_update(&mut app, [ModifiersChanged {
        previous: ModifierState::default(),
        current: ctrl,
    }]);
    click(&mut app, RailToolButton::BuildX);
    send_and_update(&mut app, [ModifiersChanged {
        previous: ctrl,
        current: ModifierState::default(),
    }]);
    click(&mut app, RailToolButton::Polyrail);
    assert!(!app.world().resource::<TileHighlight>().poly_terraform);

    send_and_update(&mut app, [PlaceMouseUp {
        drag: PlaceDrag {
            method: PlaceMethod::RailDirs,
            process: DragProcess::PlaceRail,
            start: TilePos { x: 10, y: 10 },
            end: TilePos { x: 6, y: 10 },
            style: DrawStyle::Line(Track::X),
            fract: (8, 8),
            poly_dir: Some(Trackdir::XNe),
        },
    }]);
    assert_eq!(executed(&mut app), vec![CommandId::BuildRailroadTrack]);
}
