//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig::default`] mirrors every value below; edit
//! `assets/game.toml` to override them without recompiling.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Arena width in world units.  The window is opened at the same size so one
/// unit maps to one logical pixel.
pub const ARENA_WIDTH: f32 = 800.0;

/// Arena height in world units.
pub const ARENA_HEIGHT: f32 = 600.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Side length of the player square.
pub const PLAYER_SIZE: f32 = 30.0;

/// Movement speed before any speed upgrade (units per second).
pub const PLAYER_BASE_SPEED: f32 = 200.0;

/// Speed added by each level of the speed upgrade.
pub const SPEED_UPGRADE_STEP: f32 = 30.0;

// ── Shop zone ─────────────────────────────────────────────────────────────────

/// Centre of the shop zone (arena coordinates, y down).
pub const SHOP_ZONE_CENTER_X: f32 = 100.0;
pub const SHOP_ZONE_CENTER_Y: f32 = 100.0;

/// Full width / height of the square shop zone.
pub const SHOP_ZONE_SIZE: f32 = 180.0;

// ── Combat: shooting ──────────────────────────────────────────────────────────

/// Minimum time between two shots before any fire-rate upgrade.
pub const FIRE_INTERVAL_MS: u32 = 500;

/// Interval removed by each level of the fire-rate upgrade.
pub const FIRE_INTERVAL_STEP_MS: u32 = 50;

/// The fire-rate upgrade never pushes the interval below this value.
pub const MIN_FIRE_INTERVAL_MS: u32 = 100;

/// Projectile travel speed (units per second).
pub const PROJECTILE_SPEED: f32 = 400.0;

/// Side length of a projectile square.
pub const PROJECTILE_SIZE: f32 = 8.0;

/// Projectiles are removed this long after being fired, hit or not.
pub const PROJECTILE_LIFETIME_MS: f64 = 2000.0;

// ── Combat: targets ───────────────────────────────────────────────────────────

/// Time between two target spawns.
pub const TARGET_SPAWN_INTERVAL_MS: f64 = 2000.0;

/// Side length of a target square.
pub const TARGET_SIZE: f32 = 40.0;

/// Spawner stops adding targets while this many are alive.
pub const MAX_LIVE_TARGETS: usize = 25;

// ── Coins ─────────────────────────────────────────────────────────────────────

/// Radius of a coin pickup.
pub const COIN_RADIUS: f32 = 8.0;

/// Currency granted per collected coin.
pub const COIN_VALUE: u32 = 10;

/// Uncollected coins vanish after this long.
pub const COIN_LIFETIME_MS: f64 = 5000.0;

/// Downward acceleration applied to coins (units per second squared).
pub const COIN_GRAVITY: f32 = 300.0;

/// Fraction of velocity kept when a coin bounces off an arena edge.
pub const COIN_BOUNCE: f32 = 0.5;

/// Inclusive range of the base coin count dropped by a destroyed target;
/// the rolled value is multiplied by the coin-drop multiplier.
pub const COIN_DROP_MIN: u32 = 2;
pub const COIN_DROP_MAX: u32 = 5;

/// Maximum scatter of a dropped coin around the target centre.
pub const COIN_SCATTER: f32 = 20.0;

// ── Upgrades ──────────────────────────────────────────────────────────────────

/// Cost multiplier applied after each purchase, as the integer ratio 3/2.
pub const COST_GROWTH_NUMERATOR: u32 = 3;
pub const COST_GROWTH_DENOMINATOR: u32 = 2;

pub const FIRE_RATE_BASE_COST: u32 = 50;
pub const FIRE_RATE_MAX_LEVEL: u32 = 10;

pub const DAMAGE_BASE_COST: u32 = 100;
pub const DAMAGE_MAX_LEVEL: u32 = 10;

pub const COIN_VALUE_BASE_COST: u32 = 75;
pub const COIN_VALUE_MAX_LEVEL: u32 = 10;

pub const SPEED_BASE_COST: u32 = 60;
pub const SPEED_MAX_LEVEL: u32 = 5;

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Volume of the looping background track.
pub const MUSIC_VOLUME: f32 = 0.3;

/// Background track, relative to `assets/`.  Skipped with a warning when the
/// file is not there.
pub const DEFAULT_MUSIC_PATH: &str = "audio/17014-svphvr.mp3";

/// How long the name field shakes after a rejected start.
pub const NAME_SHAKE_SECS: f32 = 0.5;
