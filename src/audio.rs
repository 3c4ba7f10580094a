//! Sound cues and their synthesized playback.
//!
//! Every cue is a short sequence of pure tones.  The game core only names the
//! cue ([`SoundCue`]); [`AudioCuePlugin`] turns each [`PlayCue`] message into
//! one Bevy [`Pitch`] source per tone, started at the tone's offset.
//!
//! | Cue               | Tones                               |
//! |-------------------|-------------------------------------|
//! | `CoinPickup`      | 1000 Hz · 0.10 s                    |
//! | `PurchaseSuccess` | 800 Hz · 0.20 s                     |
//! | `PurchaseFailure` | 200 Hz · 0.20 s                     |
//! | `Keystroke`       | 800 Hz · 0.05 s                     |
//! | `GameStart`       | 523 → 659 → 784 Hz, 0.15 s steps    |
//! | `Error`           | 400 → 200 → 100 Hz, 0.10 s steps    |

use crate::config::GameConfig;
use crate::constants::MUSIC_VOLUME;
use bevy::audio::{Pitch, Volume};
use bevy::prelude::*;
use std::time::Duration;

/// Named sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    CoinPickup,
    PurchaseSuccess,
    PurchaseFailure,
    Keystroke,
    GameStart,
    Error,
}

/// One tone of a cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    /// Delay from the start of the cue.
    pub offset_secs: f32,
    pub duration_secs: f32,
    /// Linear gain.
    pub volume: f32,
}

const fn tone(frequency_hz: f32, offset_secs: f32, duration_secs: f32, volume: f32) -> Tone {
    Tone {
        frequency_hz,
        offset_secs,
        duration_secs,
        volume,
    }
}

const COIN_PICKUP: [Tone; 1] = [tone(1000.0, 0.0, 0.1, 0.1)];
const PURCHASE_SUCCESS: [Tone; 1] = [tone(800.0, 0.0, 0.2, 0.1)];
const PURCHASE_FAILURE: [Tone; 1] = [tone(200.0, 0.0, 0.2, 0.1)];
const KEYSTROKE: [Tone; 1] = [tone(800.0, 0.0, 0.05, 0.1)];
const GAME_START: [Tone; 3] = [
    tone(523.0, 0.0, 0.15, 0.3),
    tone(659.0, 0.15, 0.15, 0.3),
    tone(784.0, 0.30, 0.20, 0.3),
];
const ERROR: [Tone; 3] = [
    tone(400.0, 0.0, 0.1, 0.2),
    tone(200.0, 0.1, 0.1, 0.2),
    tone(100.0, 0.2, 0.1, 0.2),
];

impl SoundCue {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundCue::CoinPickup => &COIN_PICKUP,
            SoundCue::PurchaseSuccess => &PURCHASE_SUCCESS,
            SoundCue::PurchaseFailure => &PURCHASE_FAILURE,
            SoundCue::Keystroke => &KEYSTROKE,
            SoundCue::GameStart => &GAME_START,
            SoundCue::Error => &ERROR,
        }
    }
}

// ── Messages & resources ──────────────────────────────────────────────────────

/// Request to play a cue this frame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayCue(pub SoundCue);

/// Tones waiting for their start offset to elapse.
#[derive(Resource, Default, Debug)]
pub struct ToneQueue {
    pending: Vec<(f32, Tone)>,
}

impl ToneQueue {
    /// Schedule every tone of `cue` relative to `now_secs`.
    pub fn push_cue(&mut self, cue: SoundCue, now_secs: f32) {
        for t in cue.tones() {
            self.pending.push((now_secs + t.offset_secs, *t));
        }
    }

    /// Remove and return the tones whose start time has arrived.
    pub fn take_due(&mut self, now_secs: f32) -> Vec<Tone> {
        let mut due = Vec::new();
        self.pending.retain(|(start, t)| {
            if *start <= now_secs {
                due.push(*t);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers [`PlayCue`] and the tone scheduler.
///
/// Requires Bevy's `AudioPlugin` (part of `DefaultPlugins`) for the
/// `Assets<Pitch>` store.
pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayCue>()
            .init_resource::<ToneQueue>()
            .add_systems(Update, (queue_cues_system, play_due_tones_system).chain());
    }
}

/// Move incoming cue requests into the [`ToneQueue`].
pub fn queue_cues_system(
    mut requests: MessageReader<PlayCue>,
    mut queue: ResMut<ToneQueue>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();
    for PlayCue(cue) in requests.read() {
        queue.push_cue(*cue, now);
    }
}

/// Spawn a self-despawning `Pitch` source for each tone that is due.
pub fn play_due_tones_system(
    mut commands: Commands,
    mut queue: ResMut<ToneQueue>,
    mut pitch_assets: ResMut<Assets<Pitch>>,
    time: Res<Time>,
) {
    for t in queue.take_due(time.elapsed_secs()) {
        commands.spawn((
            AudioPlayer(pitch_assets.add(Pitch::new(
                t.frequency_hz,
                Duration::from_secs_f32(t.duration_secs),
            ))),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(t.volume)),
        ));
    }
}

/// Marker for the looping background track.
#[derive(Component)]
pub struct BackgroundMusic;

/// Start the background track when one is configured and present on disk.
pub fn start_background_music(
    mut commands: Commands,
    config: Res<GameConfig>,
    asset_server: Res<AssetServer>,
    existing: Query<(), With<BackgroundMusic>>,
) {
    let Some(path) = config.music_path.as_deref().filter(|p| !p.is_empty()) else {
        return;
    };
    if !existing.is_empty() {
        return;
    }
    if !std::path::Path::new("assets").join(path).exists() {
        warn!("Background music '{path}' not found; playing without music");
        return;
    }
    commands.spawn((
        AudioPlayer::new(asset_server.load(path.to_string())),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(MUSIC_VOLUME)),
        BackgroundMusic,
    ));
    info!("Background music started: {path}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_jingle_steps_through_three_notes() {
        let freqs: Vec<f32> = SoundCue::GameStart
            .tones()
            .iter()
            .map(|t| t.frequency_hz)
            .collect();
        assert_eq!(freqs, vec![523.0, 659.0, 784.0]);
    }

    #[test]
    fn queue_releases_tones_at_their_offsets() {
        let mut queue = ToneQueue::default();
        queue.push_cue(SoundCue::Error, 10.0);
        assert_eq!(queue.take_due(10.0).len(), 1);
        assert_eq!(queue.take_due(10.15).len(), 1);
        assert_eq!(queue.len(), 1);
        let last = queue.take_due(11.0);
        assert_eq!(last[0].frequency_hz, 100.0);
        assert!(queue.is_empty());
    }
}
