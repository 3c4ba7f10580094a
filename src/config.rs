//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! The headless [`crate::session::GameSession`] takes a `GameConfig` by value,
//! so tests build one with `GameConfig::default()` and tweak fields directly.

use crate::constants::*;
use crate::error::{GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ────────────────────────────────────────────────────────────────
    pub arena_width: f32,
    pub arena_height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_size: f32,
    pub player_base_speed: f32,
    pub speed_upgrade_step: f32,

    // ── Shop zone ────────────────────────────────────────────────────────────
    pub shop_zone_center: [f32; 2],
    pub shop_zone_size: f32,

    // ── Combat: shooting ─────────────────────────────────────────────────────
    pub fire_interval_ms: u32,
    pub fire_interval_step_ms: u32,
    pub min_fire_interval_ms: u32,
    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub projectile_lifetime_ms: f64,

    // ── Combat: targets ──────────────────────────────────────────────────────
    pub target_spawn_interval_ms: f64,
    pub target_size: f32,
    /// Fixed hit points for spawned targets; `None` spawns them with the
    /// player's current damage per shot, so every target dies in one hit.
    pub target_hit_points: Option<i32>,
    pub max_live_targets: usize,

    // ── Coins ────────────────────────────────────────────────────────────────
    pub coin_radius: f32,
    pub coin_value: u32,
    pub coin_lifetime_ms: f64,
    pub coin_gravity: f32,
    pub coin_bounce: f32,
    pub coin_drop_min: u32,
    pub coin_drop_max: u32,
    pub coin_scatter: f32,

    // ── Session ──────────────────────────────────────────────────────────────
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Looping background track, relative to `assets/`; an empty string
    /// disables music.
    pub music_path: Option<String>,
    /// Send the best-effort backend save when the window closes.
    pub save_on_exit: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            // Player
            player_size: PLAYER_SIZE,
            player_base_speed: PLAYER_BASE_SPEED,
            speed_upgrade_step: SPEED_UPGRADE_STEP,
            // Shop zone
            shop_zone_center: [SHOP_ZONE_CENTER_X, SHOP_ZONE_CENTER_Y],
            shop_zone_size: SHOP_ZONE_SIZE,
            // Shooting
            fire_interval_ms: FIRE_INTERVAL_MS,
            fire_interval_step_ms: FIRE_INTERVAL_STEP_MS,
            min_fire_interval_ms: MIN_FIRE_INTERVAL_MS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_size: PROJECTILE_SIZE,
            projectile_lifetime_ms: PROJECTILE_LIFETIME_MS,
            // Targets
            target_spawn_interval_ms: TARGET_SPAWN_INTERVAL_MS,
            target_size: TARGET_SIZE,
            target_hit_points: None,
            max_live_targets: MAX_LIVE_TARGETS,
            // Coins
            coin_radius: COIN_RADIUS,
            coin_value: COIN_VALUE,
            coin_lifetime_ms: COIN_LIFETIME_MS,
            coin_gravity: COIN_GRAVITY,
            coin_bounce: COIN_BOUNCE,
            coin_drop_min: COIN_DROP_MIN,
            coin_drop_max: COIN_DROP_MAX,
            coin_scatter: COIN_SCATTER,
            // Session
            seed: None,
            music_path: Some(DEFAULT_MUSIC_PATH.to_string()),
            save_on_exit: false,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the game loop cannot work with.  Anything accepted here
    /// is safe to run: no range, clamp or rect built from it can be empty.
    pub fn validate(&self) -> GameResult<()> {
        positive("arena_width", self.arena_width as f64)?;
        positive("arena_height", self.arena_height as f64)?;
        positive("player_size", self.player_size as f64)?;
        positive("player_base_speed", self.player_base_speed as f64)?;
        non_negative("speed_upgrade_step", self.speed_upgrade_step as f64)?;
        finite("shop_zone_center[0]", self.shop_zone_center[0] as f64)?;
        finite("shop_zone_center[1]", self.shop_zone_center[1] as f64)?;
        positive("shop_zone_size", self.shop_zone_size as f64)?;
        positive("projectile_speed", self.projectile_speed as f64)?;
        positive("projectile_size", self.projectile_size as f64)?;
        positive("projectile_lifetime_ms", self.projectile_lifetime_ms)?;
        positive("target_spawn_interval_ms", self.target_spawn_interval_ms)?;
        positive("target_size", self.target_size as f64)?;
        positive("coin_radius", self.coin_radius as f64)?;
        positive("coin_lifetime_ms", self.coin_lifetime_ms)?;
        non_negative("coin_gravity", self.coin_gravity as f64)?;
        non_negative("coin_scatter", self.coin_scatter as f64)?;
        if self.player_size > self.arena_width.min(self.arena_height) {
            return Err(GameError::InvalidConfig {
                name: "player_size",
                value: self.player_size as f64,
                expected: "(0.0, min(arena_width, arena_height)]",
            });
        }
        if self.min_fire_interval_ms == 0 || self.fire_interval_ms < self.min_fire_interval_ms {
            return Err(GameError::InvalidConfig {
                name: "fire_interval_ms",
                value: self.fire_interval_ms as f64,
                expected: "[min_fire_interval_ms, ∞) with min_fire_interval_ms > 0",
            });
        }
        if let Some(hp) = self.target_hit_points.filter(|hp| *hp < 1) {
            return Err(GameError::InvalidConfig {
                name: "target_hit_points",
                value: hp as f64,
                expected: "[1, ∞)",
            });
        }
        if self.coin_drop_min == 0 || self.coin_drop_min > self.coin_drop_max {
            return Err(GameError::InvalidConfig {
                name: "coin_drop_min",
                value: self.coin_drop_min as f64,
                expected: "[1, coin_drop_max]",
            });
        }
        if !(0.0..=1.0).contains(&self.coin_bounce) {
            return Err(GameError::InvalidConfig {
                name: "coin_bounce",
                value: self.coin_bounce as f64,
                expected: "[0.0, 1.0]",
            });
        }
        Ok(())
    }
}

// NaN fails every comparison below, so it is rejected along with the range.

fn positive(name: &'static str, value: f64) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> GameResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "[0.0, ∞)",
        })
    }
}

fn finite(name: &'static str, value: f64) -> GameResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "a finite number",
        })
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged but do not abort the game.  A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("✓ Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("⚠ {e}; using defaults");
            }
        },
        Err(_) => {
            info!("ℹ No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = GameConfig::from_toml_str("coin_value = 25\nseed = 7\n").unwrap();
        assert_eq!(config.coin_value, 25);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.fire_interval_ms, FIRE_INTERVAL_MS);
        assert_eq!(config.shop_zone_center, [SHOP_ZONE_CENTER_X, SHOP_ZONE_CENTER_Y]);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("coin_value = \"lots\"").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse { .. }));
    }

    #[test]
    fn inverted_drop_range_is_rejected() {
        let err = GameConfig::from_toml_str("coin_drop_min = 6\ncoin_drop_max = 5").unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidConfig {
                name: "coin_drop_min",
                ..
            }
        ));
    }

    #[test]
    fn fire_interval_below_floor_is_rejected() {
        let mut config = GameConfig::default();
        config.fire_interval_ms = 50;
        assert!(config.validate().is_err());
    }

    fn rejected_key(toml: &str) -> &'static str {
        match GameConfig::from_toml_str(toml) {
            Err(GameError::InvalidConfig { name, .. }) => name,
            other => panic!("{toml:?} should be rejected, got {other:?}"),
        }
    }

    #[test]
    fn negative_coin_scatter_is_rejected() {
        assert_eq!(rejected_key("coin_scatter = -5.0"), "coin_scatter");
        assert!(GameConfig::from_toml_str("coin_scatter = 0.0").is_ok());
    }

    #[test]
    fn player_larger_than_arena_is_rejected() {
        assert_eq!(rejected_key("player_size = 1000.0"), "player_size");
        assert_eq!(
            rejected_key("arena_height = 20.0\nplayer_size = 30.0"),
            "player_size"
        );
        assert!(GameConfig::from_toml_str("arena_height = 30.0\nplayer_size = 30.0").is_ok());
    }

    #[test]
    fn negative_entity_sizes_are_rejected() {
        assert_eq!(rejected_key("target_size = -40.0"), "target_size");
        assert_eq!(rejected_key("projectile_size = -8.0"), "projectile_size");
        assert_eq!(rejected_key("coin_radius = -1.0"), "coin_radius");
    }

    #[test]
    fn nan_and_infinite_values_are_rejected() {
        assert_eq!(rejected_key("coin_gravity = nan"), "coin_gravity");
        assert_eq!(rejected_key("arena_width = inf"), "arena_width");
        assert_eq!(rejected_key("coin_bounce = nan"), "coin_bounce");
        assert_eq!(rejected_key("shop_zone_center = [nan, 100.0]"), "shop_zone_center[0]");
    }

    #[test]
    fn target_hit_points_default_to_player_damage() {
        assert_eq!(GameConfig::default().target_hit_points, None);
        let config = GameConfig::from_toml_str("target_hit_points = 3").unwrap();
        assert_eq!(config.target_hit_points, Some(3));
        assert_eq!(rejected_key("target_hit_points = 0"), "target_hit_points");
    }

    #[test]
    fn music_defaults_on_and_empty_path_turns_it_off() {
        assert_eq!(
            GameConfig::default().music_path.as_deref(),
            Some(DEFAULT_MUSIC_PATH)
        );
        let config = GameConfig::from_toml_str("music_path = \"\"").unwrap();
        assert_eq!(config.music_path.as_deref(), Some(""));
    }
}
