//! Welcome screen: `GameState` definition, name entry, and `MenuPlugin`.
//!
//! ## States
//!
//! | State     | Description                                    |
//! |-----------|------------------------------------------------|
//! | `Welcome` | Initial state; name entry shown                |
//! | `Playing` | A [`crate::session::GameSession`] is running   |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                     | Schedule              | Purpose                           |
//! |----------------------------|-----------------------|-----------------------------------|
//! | `setup_welcome_screen`     | `OnEnter(Welcome)`    | Spawn the name-entry UI           |
//! | `cleanup_welcome_screen`   | `OnExit(Welcome)`     | Despawn the name-entry UI         |
//! | `name_typing_system`       | `Update / in Welcome` | Keyboard text into [`NameEntry`]  |
//! | `start_button_system`      | `Update / in Welcome` | Start button click                |
//! | `start_request_system`     | `Update / in Welcome` | Validate name, start or reject    |
//! | `name_field_display_system`| `Update / in Welcome` | Refresh field text + shake offset |

use crate::audio::{PlayCue, SoundCue};
use crate::constants::NAME_SHAKE_SECS;
use crate::profile::PlayerProfile;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

/// Longest name the field accepts.
pub const MAX_NAME_LEN: usize = 16;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Gameplay systems in [`crate::arcade::ArcadePlugin`] run under
/// `.run_if(in_state(GameState::Playing))`.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Name-entry screen; shown on startup.
    #[default]
    Welcome,
    /// Active gameplay.
    Playing,
}

// ── Resources, messages, markers ──────────────────────────────────────────────

/// Text typed into the name field plus the remaining shake animation time.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct NameEntry {
    pub buffer: String,
    /// Seconds of shake left after a rejected start; 0 when idle.
    pub shake_secs: f32,
}

/// Outcome of one key press on the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    Typed,
    Erased,
    Submit,
    Ignored,
}

impl NameEntry {
    /// Apply one logical key press to the buffer.
    pub fn apply_key(&mut self, key: &Key) -> KeyEffect {
        match key {
            Key::Enter => KeyEffect::Submit,
            Key::Backspace => {
                if self.buffer.pop().is_some() {
                    KeyEffect::Erased
                } else {
                    KeyEffect::Ignored
                }
            }
            Key::Space => self.push_str(" "),
            Key::Character(text) => self.push_str(text),
            _ => KeyEffect::Ignored,
        }
    }

    fn push_str(&mut self, text: &str) -> KeyEffect {
        let mut typed = false;
        for c in text.chars().filter(|c| !c.is_control()) {
            if self.buffer.chars().count() >= MAX_NAME_LEN {
                break;
            }
            self.buffer.push(c);
            typed = true;
        }
        if typed {
            KeyEffect::Typed
        } else {
            KeyEffect::Ignored
        }
    }
}

/// Ask to leave the welcome screen with the current name.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartRequest;

/// Root node of the welcome UI; despawned on `OnExit(Welcome)`.
#[derive(Component)]
pub struct WelcomeRoot;

/// The text node showing the typed name.
#[derive(Component)]
pub struct NameField;

/// Tags the "Start" button.
#[derive(Component)]
pub struct StartButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the welcome UI setup/teardown, and name entry.
///
/// This plugin must be added to the app **before** any plugin that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is always registered
/// first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<NameEntry>()
            .add_message::<StartRequest>()
            .add_message::<PlayCue>()
            .add_systems(OnEnter(GameState::Welcome), setup_welcome_screen)
            .add_systems(OnExit(GameState::Welcome), cleanup_welcome_screen)
            .add_systems(
                Update,
                (
                    name_typing_system,
                    start_button_system,
                    start_request_system,
                    name_field_display_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Welcome)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn title_color() -> Color {
    Color::srgb(1.0, 0.84, 0.0)
}
fn prompt_color() -> Color {
    Color::srgb(0.75, 0.75, 0.85)
}
fn field_bg() -> Color {
    Color::srgb(0.06, 0.06, 0.12)
}
fn field_border() -> Color {
    Color::srgb(0.27, 0.27, 1.0)
}
fn start_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
fn start_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
fn hint_color() -> Color {
    Color::srgb(0.35, 0.35, 0.45)
}

// ── OnEnter(Welcome): spawn UI ────────────────────────────────────────────────

/// Spawn the full-screen welcome overlay.
///
/// ```text
/// ┌──────────────────────────────┐
/// │          COIN ARENA          │
/// │       Enter your name:       │
/// │      [ ana_             ]    │
/// │          [ START ]           │
/// │     Press Enter to start     │
/// └──────────────────────────────┘
/// ```
pub fn setup_welcome_screen(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(18.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.10, 0.10, 0.18)),
            WelcomeRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("COIN ARENA"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));
            root.spawn((
                Text::new("Enter your name:"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(prompt_color()),
            ));
            root.spawn((
                Node {
                    min_width: Val::Px(280.0),
                    padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(field_bg()),
                BorderColor::all(field_border()),
                Text::new("_"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                NameField,
            ));
            root.spawn((
                Button,
                Node {
                    padding: UiRect::axes(Val::Px(36.0), Val::Px(10.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(start_bg()),
                BorderColor::all(start_border()),
                StartButton,
            ))
            .with_children(|button| {
                button.spawn((
                    Text::new("START"),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
            root.spawn((
                Text::new("Press Enter to start"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
    info!("[SETUP] Welcome screen shown");
}

/// Despawn the welcome UI.
pub fn cleanup_welcome_screen(mut commands: Commands, query: Query<Entity, With<WelcomeRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Feed key presses into [`NameEntry`]; Enter submits.
pub fn name_typing_system(
    mut keys: MessageReader<KeyboardInput>,
    mut entry: ResMut<NameEntry>,
    mut starts: MessageWriter<StartRequest>,
    mut cues: MessageWriter<PlayCue>,
) {
    for event in keys.read() {
        if !event.state.is_pressed() {
            continue;
        }
        match entry.apply_key(&event.logical_key) {
            KeyEffect::Typed => {
                cues.write(PlayCue(SoundCue::Keystroke));
            }
            KeyEffect::Submit => {
                starts.write(StartRequest);
            }
            KeyEffect::Erased | KeyEffect::Ignored => {}
        }
    }
}

/// Clicking START is the same as pressing Enter.
pub fn start_button_system(
    query: Query<&Interaction, (Changed<Interaction>, With<StartButton>)>,
    mut starts: MessageWriter<StartRequest>,
) {
    for interaction in query.iter() {
        if *interaction == Interaction::Pressed {
            starts.write(StartRequest);
        }
    }
}

/// Validate the typed name.  A valid name becomes the [`PlayerProfile`]
/// resource and moves the game to `Playing`; a blank one shakes the field and
/// plays the error cue.
pub fn start_request_system(
    mut commands: Commands,
    mut requests: MessageReader<StartRequest>,
    mut entry: ResMut<NameEntry>,
    mut next_state: ResMut<NextState<GameState>>,
    mut cues: MessageWriter<PlayCue>,
) {
    if requests.read().last().is_none() {
        return;
    }
    match PlayerProfile::parse(&entry.buffer) {
        Ok(profile) => {
            info!("Starting game as '{}'", profile.name());
            commands.insert_resource(profile);
            cues.write(PlayCue(SoundCue::GameStart));
            next_state.set(GameState::Playing);
        }
        Err(err) => {
            warn!("Start rejected: {err}");
            entry.shake_secs = NAME_SHAKE_SECS;
            cues.write(PlayCue(SoundCue::Error));
        }
    }
}

/// Show the buffer with a cursor and run the shake animation.
pub fn name_field_display_system(
    mut entry: ResMut<NameEntry>,
    mut query: Query<(&mut Text, &mut Node), With<NameField>>,
    time: Res<Time>,
) {
    if entry.shake_secs > 0.0 {
        entry.shake_secs = (entry.shake_secs - time.delta_secs()).max(0.0);
    }
    let offset = if entry.shake_secs > 0.0 {
        (entry.shake_secs * 60.0).sin() * 8.0
    } else {
        0.0
    };
    for (mut text, mut node) in query.iter_mut() {
        let shown = format!("{}_", entry.buffer);
        if text.0 != shown {
            text.0 = shown;
        }
        node.left = Val::Px(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_erasing_edit_the_buffer() {
        let mut entry = NameEntry::default();
        assert_eq!(entry.apply_key(&Key::Character("A".into())), KeyEffect::Typed);
        assert_eq!(entry.apply_key(&Key::Space), KeyEffect::Typed);
        assert_eq!(entry.apply_key(&Key::Character("b".into())), KeyEffect::Typed);
        assert_eq!(entry.buffer, "A b");
        assert_eq!(entry.apply_key(&Key::Backspace), KeyEffect::Erased);
        assert_eq!(entry.buffer, "A ");
        assert_eq!(entry.apply_key(&Key::Enter), KeyEffect::Submit);
        assert_eq!(entry.apply_key(&Key::Escape), KeyEffect::Ignored);
    }

    #[test]
    fn buffer_stops_at_max_length() {
        let mut entry = NameEntry::default();
        entry.apply_key(&Key::Character("x".repeat(MAX_NAME_LEN + 4).as_str().into()));
        assert_eq!(entry.buffer.chars().count(), MAX_NAME_LEN);
        assert_eq!(entry.apply_key(&Key::Character("y".into())), KeyEffect::Ignored);
    }

    #[test]
    fn backspace_on_empty_buffer_is_ignored() {
        let mut entry = NameEntry::default();
        assert_eq!(entry.apply_key(&Key::Backspace), KeyEffect::Ignored);
    }
}
