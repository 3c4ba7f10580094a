//! Gameplay plugin: owns the [`GameSession`] while `GameState::Playing` is active.
//!
//! System order inside `Update` (all gated on `Playing`):
//!
//! 1. `movement_input_system`  – WASD into the movement intent
//! 2. `pointer_input_system`   – left click shoots
//! 3. `purchase_input_system`  – digit keys buy while the shop is open
//! 4. `session_tick_system`    – advance the session by the frame delta
//! 5. `feedback_system`        – forward cues, log notable events
//! 6. `render_session_system`  – gizmos and HUD text
//!
//! `save_on_exit_system` runs in `Last` so it sees the `AppExit` written during
//! the frame.

use crate::audio::{start_background_music, PlayCue};
use crate::config::GameConfig;
use crate::feedback::Feedback;
use crate::input::{movement_input_system, pointer_input_system, purchase_input_system};
use crate::menu::GameState;
use crate::profile::PlayerProfile;
use crate::rendering::{cleanup_hud, render_session_system, setup_hud};
use crate::save::{save_best_effort, LogTransport};
use crate::session::GameSession;
use bevy::app::AppExit;
use bevy::prelude::*;

/// The running session.  Present only between `OnEnter(Playing)` and the end
/// of the app.
#[derive(Resource)]
pub struct ActiveSession(pub GameSession);

pub struct ArcadePlugin;

impl Plugin for ArcadePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayCue>()
            .add_systems(
                OnEnter(GameState::Playing),
                (start_session, setup_hud, start_background_music).chain(),
            )
            .add_systems(OnExit(GameState::Playing), (cleanup_hud, end_session))
            .add_systems(
                Update,
                (
                    movement_input_system,
                    pointer_input_system,
                    purchase_input_system,
                    session_tick_system,
                    feedback_system,
                    render_session_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(Last, save_on_exit_system);
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Build a fresh session from the loaded config and the chosen profile.
pub fn start_session(
    mut commands: Commands,
    config: Res<GameConfig>,
    profile: Option<Res<PlayerProfile>>,
) {
    let profile = match profile {
        Some(profile) => profile.clone(),
        None => {
            warn!("No player profile chosen; using default name");
            PlayerProfile::default()
        }
    };
    commands.insert_resource(ActiveSession(GameSession::new(config.clone(), profile)));
    info!("✓ Gameplay started");
}

pub fn end_session(mut commands: Commands) {
    commands.remove_resource::<ActiveSession>();
}

// ── Per-frame ─────────────────────────────────────────────────────────────────

pub fn session_tick_system(time: Res<Time>, mut session: ResMut<ActiveSession>) {
    session.0.update(time.delta_secs());
}

/// Drain the session's feedback queue: cues go to the audio plugin, the rest
/// is logged.
pub fn feedback_system(mut session: ResMut<ActiveSession>, mut cues: MessageWriter<PlayCue>) {
    for item in session.0.drain_feedback() {
        match item {
            Feedback::Cue(cue) => {
                cues.write(PlayCue(cue));
            }
            Feedback::ShopOpened => info!("🏪 Shop open"),
            Feedback::ShopClosed => info!("🏪 Shop closed"),
            Feedback::Purchased {
                kind,
                new_level,
                paid,
            } => info!("✓ {} -> level {new_level} (${paid})", kind.key()),
            Feedback::PurchaseRejected(err) => debug!("Purchase rejected: {err}"),
            Feedback::TargetDestroyed { target, coins } => {
                debug!("Target {:?} destroyed, {coins} coin(s) dropped", target)
            }
            Feedback::CoinCollected { .. } => {}
        }
    }
}

/// Post progress once when the app is closing, if enabled.
pub fn save_on_exit_system(
    mut exits: MessageReader<AppExit>,
    session: Option<Res<ActiveSession>>,
) {
    if exits.read().next().is_none() {
        return;
    }
    let Some(session) = session else {
        return;
    };
    let stats = session.0.stats();
    info!(
        "Session summary: {} shots, {} targets, {} coins, {} upgrades, ${} earned",
        stats.shots_fired,
        stats.targets_destroyed,
        stats.coins_collected,
        stats.upgrades_bought,
        session.0.economy().total_earned
    );
    if session.0.config().save_on_exit {
        save_best_effort(&mut LogTransport, &session.0.save_request());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn entering_playing_creates_a_session_for_the_profile() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(GameConfig {
                seed: Some(1),
                ..GameConfig::default()
            })
            .insert_resource(PlayerProfile::parse("Ana").unwrap())
            .init_state::<GameState>()
            .add_message::<PlayCue>()
            .add_systems(OnEnter(GameState::Playing), start_session)
            .add_systems(OnExit(GameState::Playing), end_session);

        app.update();
        assert!(app.world().get_resource::<ActiveSession>().is_none());

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Playing);
        app.update();

        let session = app.world().resource::<ActiveSession>();
        assert_eq!(session.0.profile().name(), "Ana");
        assert_eq!(session.0.economy().currency, 0);
    }
}
