use bevy::prelude::*;
use bevy::window::WindowResolution;

use coin_arena::arcade::ArcadePlugin;
use coin_arena::audio::AudioCuePlugin;
use coin_arena::config::{self, GameConfig};
use coin_arena::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use coin_arena::graphics::{self, CLEAR_COLOR};
use coin_arena::menu::MenuPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Coin Arena".into(),
            resolution: WindowResolution::new(ARENA_WIDTH as u32, ARENA_HEIGHT as u32),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(CLEAR_COLOR))
    // Compiled defaults; load_game_config overwrites them from assets/game.toml
    // (if present) in the Startup schedule.
    .insert_resource(GameConfig::default())
    .add_systems(
        Startup,
        (
            config::load_game_config,
            graphics::setup_camera.after(config::load_game_config),
        ),
    )
    // MenuPlugin registers GameState, so it goes first.
    .add_plugins(MenuPlugin)
    .add_plugins(AudioCuePlugin)
    .add_plugins(ArcadePlugin);

    app.run();
}
