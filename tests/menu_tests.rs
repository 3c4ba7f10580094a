//! Headless tests for the welcome screen and the [`GameState`] machine.
//!
//! These tests use [`MinimalPlugins`] (no window, no rendering, no audio
//! output) so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `Welcome`.
//! 2. A blank name keeps the game on `Welcome`, shakes the field and plays the
//!    error cue.
//! 3. A valid name is trimmed, stored as [`PlayerProfile`] and moves to
//!    `Playing`.
//! 4. Force-starting in `Playing` without a profile builds a session for the
//!    default player.

use bevy::ecs::message::Messages;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use coin_arena::arcade::{start_session, ActiveSession};
use coin_arena::audio::{PlayCue, SoundCue};
use coin_arena::config::GameConfig;
use coin_arena::menu::{GameState, MenuPlugin, NameEntry, StartRequest};
use coin_arena::profile::PlayerProfile;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal headless app with the welcome flow registered.
///
/// `KeyboardInput` is normally registered by `InputPlugin`; it is added by
/// hand so `name_typing_system` can run.
fn welcome_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .add_message::<KeyboardInput>()
        .add_plugins(MenuPlugin);
    app.update(); // settle into Welcome
    app
}

fn type_name(app: &mut App, name: &str) {
    app.world_mut().resource_mut::<NameEntry>().buffer = name.to_string();
}

fn request_start(app: &mut App) {
    app.world_mut()
        .resource_mut::<Messages<StartRequest>>()
        .write(StartRequest);
}

fn cues_written(app: &App) -> Vec<SoundCue> {
    let messages = app.world().resource::<Messages<PlayCue>>();
    let mut cursor = messages.get_cursor();
    cursor.read(messages).map(|PlayCue(cue)| *cue).collect()
}

fn current_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn default_state_is_welcome() {
    let app = welcome_app();
    assert_eq!(current_state(&app), GameState::Welcome);
    assert!(app.world().get_resource::<PlayerProfile>().is_none());
}

#[test]
fn blank_name_stays_on_welcome_and_shakes() {
    let mut app = welcome_app();
    type_name(&mut app, "   ");
    request_start(&mut app);
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::Welcome);
    assert!(app.world().get_resource::<PlayerProfile>().is_none());
    assert!(app.world().resource::<NameEntry>().shake_secs > 0.0);
    assert!(cues_written(&app).contains(&SoundCue::Error));
}

#[test]
fn valid_name_is_trimmed_and_starts_the_game() {
    let mut app = welcome_app();
    type_name(&mut app, "  Ana ");
    request_start(&mut app);
    app.update(); // start_request_system queues the transition
    app.update(); // StateTransition fires

    assert_eq!(current_state(&app), GameState::Playing);
    let profile = app.world().resource::<PlayerProfile>();
    assert_eq!(profile.name(), "Ana");
    assert!(cues_written(&app).contains(&SoundCue::GameStart));
}

/// Starting straight in `Playing` (no welcome screen, no profile) still
/// builds a session, under the default player name.
#[test]
fn direct_start_in_playing_uses_default_profile() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(GameConfig::default())
        .insert_state(GameState::Playing)
        .add_systems(OnEnter(GameState::Playing), start_session);
    app.update();

    let session = app.world().resource::<ActiveSession>();
    assert_eq!(session.0.profile().name(), "Player");
    assert_eq!(session.0.player().position, Vec2::new(400.0, 300.0));
}
