//! Sandbox executable: the rail toolbar driven by keyboard and the
//! on-screen buttons, answered by the scripted engine.

use bevy::prelude::*;
use rail_toolbar::lifecycle::NewGameStarted;
use rail_toolbar::rail::RailType;
use rail_toolbar::settings::RailGuiSettings;
use rail_toolbar::toolbar::ShowRailToolbar;

fn main() {
    let mut app = rail_toolbar::app();

    // Optional settings file as the only argument
    if let Some(path) = std::env::args().nth(1) {
        match RailGuiSettings::load(std::path::Path::new(&path)) {
            Ok(settings) => {
                app.insert_resource(settings);
            }
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }

    app.add_systems(Startup, open_toolbar).run();
}

fn open_toolbar(mut new_game: MessageWriter<NewGameStarted>, mut show: MessageWriter<ShowRailToolbar>) {
    new_game.write(NewGameStarted);
    show.write(ShowRailToolbar {
        railtype: RailType::RAIL,
    });
}
