use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;
use criterion::{Criterion, criterion_group, criterion_main};
use rail_toolbar::blueprint::Blueprint;
use rail_toolbar::command::CommandRequest;
use rail_toolbar::highlight::{DragProcess, DrawStyle, PlaceDrag, PlaceMethod};
use rail_toolbar::map::{Track, TrackBits, Trackdir};
use rail_toolbar::placement::terraform::corner_plan;
use rail_toolbar::rail::RailType;
use rail_toolbar::sandbox::{ScriptedEngine, ScriptedHostPlugin};
use rail_toolbar::toolbar::{PlaceMouseUp, RailToolButton, ShowRailToolbar, ToolbarClick};

/// 256x256 map with a rail yard of parallel X lines in the north corner.
fn rail_yard() -> ScriptedEngine {
    let mut engine = ScriptedEngine::new(256, 256);
    for y in (0..64).step_by(2) {
        for x in 0..64 {
            engine.lay_rail(TilePos { x, y }, TrackBits::X);
        }
        engine.put_signals(TilePos { x: 32, y });
    }
    engine
}

fn bench_blueprint(c: &mut Criterion) {
    let engine = rail_yard();
    let start = TilePos { x: 0, y: 0 };
    let end = TilePos { x: 63, y: 63 };

    let mut group = c.benchmark_group("blueprint");

    group.bench_function("copy_64x64", |b| {
        b.iter(|| {
            let blueprint = Blueprint::copy_area(&engine, start, end);
            std::hint::black_box(blueprint);
        })
    });

    let blueprint = Blueprint::copy_area(&engine, start, end);
    group.bench_function("rotate_and_paste", |b| {
        b.iter(|| {
            let commands = blueprint
                .rotated()
                .commands(TilePos { x: 100, y: 100 }, RailType::RAIL);
            std::hint::black_box(commands);
        })
    });

    group.finish();
}

fn bench_corner_plan(c: &mut Criterion) {
    let start = TilePos { x: 40, y: 40 };
    let end = TilePos { x: 60, y: 20 };

    c.bench_function("corner_plan_all_trackdirs", |b| {
        b.iter(|| {
            for dir in Trackdir::ALL {
                std::hint::black_box(corner_plan(start, end, dir));
            }
        })
    });
}

fn bench_toolbar_frame(c: &mut Criterion) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(rail_toolbar::RailToolbarPlugins)
        .add_plugins(ScriptedHostPlugin {
            width: 256,
            height: 256,
        });
    app.world_mut().write_message(ShowRailToolbar {
        railtype: RailType::RAIL,
    });
    app.world_mut().write_message(ToolbarClick {
        button: RailToolButton::BuildX,
    });
    app.update();

    let drag = PlaceDrag {
        method: PlaceMethod::FixY,
        process: DragProcess::PlaceRail,
        start: TilePos { x: 10, y: 10 },
        end: TilePos { x: 200, y: 10 },
        style: DrawStyle::Line(Track::X),
        fract: (8, 8),
        poly_dir: None,
    };

    c.bench_function("drag_to_command_frame", |b| {
        b.iter(|| {
            app.world_mut().write_message(PlaceMouseUp { drag });
            app.update();
            let requests = app.world().resource::<Messages<CommandRequest>>().len();
            std::hint::black_box(requests);
        })
    });
}

criterion_group!(benches, bench_blueprint, bench_corner_plan, bench_toolbar_frame);
criterion_main!(benches);
