//! Shooting, projectile and coin motion, target damage, and coin drops.
//!
//! ## Per-tick order (driven by [`crate::session::GameSession::update`])
//!
//! | Step | Function               | Effect                                       |
//! |------|------------------------|----------------------------------------------|
//! | 1    | [`spawn_due_targets`]  | add a target every spawn interval            |
//! | 2    | [`step_projectiles`]   | move projectiles, drop expired ones          |
//! | 3    | [`step_coins`]         | gravity + bounce, drop expired coins         |
//! | 4    | [`projectile_hits`]    | list projectile/target overlaps              |
//! | 5    | [`coins_touching`]     | list coins overlapping the player            |
//!
//! Hits and pickups are applied by the session so it can emit feedback.

use crate::config::GameConfig;
use crate::entities::{overlaps, Coin, EntityId, Player, Projectile, Target, World};
use bevy::math::{Rect, Vec2};
use rand::Rng;

/// Cooldown and spawn bookkeeping on the game clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatClock {
    /// Time of the last accepted shot; `None` until the first one.
    pub last_shot_ms: Option<f64>,
    /// When the spawner adds its next target.
    pub next_target_spawn_ms: f64,
}

impl CombatClock {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            last_shot_ms: None,
            next_target_spawn_ms: config.target_spawn_interval_ms,
        }
    }

    /// Whether enough time has passed since the last shot.
    #[inline]
    pub fn can_fire(&self, now_ms: f64, fire_interval_ms: u32) -> bool {
        match self.last_shot_ms {
            Some(last) => now_ms - last >= fire_interval_ms as f64,
            None => true,
        }
    }
}

// ── Shooting ──────────────────────────────────────────────────────────────────

/// Fire toward `aim_point` if the cooldown allows.
///
/// The projectile starts at the player's centre and travels at
/// `projectile_speed`.  Aiming exactly at the player's own centre has no
/// direction, so nothing is fired and the cooldown is not consumed.
pub fn fire_projectile(
    world: &mut World,
    clock: &mut CombatClock,
    player: &Player,
    fire_interval_ms: u32,
    config: &GameConfig,
    now_ms: f64,
    aim_point: Vec2,
) -> Option<EntityId> {
    if !clock.can_fire(now_ms, fire_interval_ms) {
        return None;
    }
    let direction = (aim_point - player.position).try_normalize()?;
    clock.last_shot_ms = Some(now_ms);
    Some(world.spawn_projectile(Projectile {
        position: player.position,
        velocity: direction * config.projectile_speed,
        size: config.projectile_size,
        expires_at_ms: now_ms + config.projectile_lifetime_ms,
    }))
}

/// Move projectiles in a straight line and remove the expired ones.
pub fn step_projectiles(world: &mut World, dt: f32, now_ms: f64) -> Vec<EntityId> {
    for (_, projectile) in world.projectiles.iter_mut() {
        projectile.position += projectile.velocity * dt;
    }
    world.projectiles.retain(|p| now_ms < p.expires_at_ms)
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// What a hit did to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// The target survived with this many hit points.
    Damaged { remaining: i32 },
    /// The target reached zero hit points and was removed.
    Destroyed { position: Vec2 },
    /// The id no longer refers to a live target.
    Missing,
}

/// Subtract `damage` from a target, removing it at zero or below.
pub fn damage_target(world: &mut World, target: EntityId, damage: i32) -> HitOutcome {
    let Some(row) = world.targets.get_mut(target) else {
        return HitOutcome::Missing;
    };
    row.remaining_hit_points -= damage;
    if row.remaining_hit_points > 0 {
        return HitOutcome::Damaged {
            remaining: row.remaining_hit_points,
        };
    }
    let position = row.position;
    world.targets.remove(target);
    HitOutcome::Destroyed { position }
}

/// Spawn one target at a random spot in the right-hand part of the arena.
pub fn spawn_random_target(
    world: &mut World,
    rng: &mut impl Rng,
    config: &GameConfig,
    hit_points: i32,
) -> EntityId {
    let w = config.arena_width;
    let h = config.arena_height;
    let position = Vec2::new(
        rng.gen_range(w * 0.25..=w * 0.875),
        rng.gen_range(h * 0.15..=h * 0.85),
    );
    world.spawn_target(Target {
        position,
        size: config.target_size,
        remaining_hit_points: hit_points,
    })
}

/// Add every target whose spawn time has passed, respecting the live cap.
///
/// Targets get `config.target_hit_points` when set, otherwise `damage`, so a
/// fresh target always falls to a single shot.
pub fn spawn_due_targets(
    world: &mut World,
    clock: &mut CombatClock,
    rng: &mut impl Rng,
    config: &GameConfig,
    damage: i32,
    now_ms: f64,
) -> Vec<EntityId> {
    let hit_points = config.target_hit_points.unwrap_or(damage).max(1);
    let mut spawned = Vec::new();
    while clock.next_target_spawn_ms <= now_ms {
        clock.next_target_spawn_ms += config.target_spawn_interval_ms;
        if world.targets.len() < config.max_live_targets {
            spawned.push(spawn_random_target(world, rng, config, hit_points));
        }
    }
    spawned
}

/// Projectile/target pairs currently overlapping.  Each projectile appears
/// at most once, paired with the lowest-id target it touches.
pub fn projectile_hits(world: &World) -> Vec<(EntityId, EntityId)> {
    world
        .projectiles
        .iter()
        .filter_map(|(pid, projectile)| {
            let bounds = projectile.bounds();
            world
                .targets
                .iter()
                .find(|(_, target)| overlaps(bounds, target.bounds()))
                .map(|(tid, _)| (pid, tid))
        })
        .collect()
}

// ── Coins ─────────────────────────────────────────────────────────────────────

/// Roll the number of coins a destroyed target drops.
pub fn roll_coin_count(rng: &mut impl Rng, config: &GameConfig, multiplier: u32) -> u32 {
    rng.gen_range(config.coin_drop_min..=config.coin_drop_max) * multiplier
}

/// Burst `count` coins around `origin` with random scatter and upward kick.
pub fn drop_coins(
    world: &mut World,
    rng: &mut impl Rng,
    config: &GameConfig,
    now_ms: f64,
    origin: Vec2,
    count: u32,
) -> Vec<EntityId> {
    let scatter = config.coin_scatter;
    (0..count)
        .map(|_| {
            let offset = Vec2::new(
                rng.gen_range(-scatter..=scatter),
                rng.gen_range(-scatter..=scatter),
            );
            let velocity = Vec2::new(rng.gen_range(-50.0..=50.0), rng.gen_range(-100.0..=-50.0));
            world.spawn_coin(Coin {
                position: origin + offset,
                velocity,
                radius: config.coin_radius,
                expires_at_ms: now_ms + config.coin_lifetime_ms,
            })
        })
        .collect()
}

/// Apply gravity, bounce coins off the arena edges, and remove expired ones.
pub fn step_coins(world: &mut World, config: &GameConfig, dt: f32, now_ms: f64) -> Vec<EntityId> {
    let arena = Rect::new(0.0, 0.0, config.arena_width, config.arena_height);
    for (_, coin) in world.coins.iter_mut() {
        coin.velocity.y += config.coin_gravity * dt;
        coin.position += coin.velocity * dt;
        bounce_inside(coin, arena, config.coin_bounce);
    }
    world.coins.retain(|c| now_ms < c.expires_at_ms)
}

fn bounce_inside(coin: &mut Coin, arena: Rect, restitution: f32) {
    let r = coin.radius;
    if coin.position.x - r < arena.min.x {
        coin.position.x = arena.min.x + r;
        coin.velocity.x = coin.velocity.x.abs() * restitution;
    } else if coin.position.x + r > arena.max.x {
        coin.position.x = arena.max.x - r;
        coin.velocity.x = -coin.velocity.x.abs() * restitution;
    }
    if coin.position.y - r < arena.min.y {
        coin.position.y = arena.min.y + r;
        coin.velocity.y = coin.velocity.y.abs() * restitution;
    } else if coin.position.y + r > arena.max.y {
        coin.position.y = arena.max.y - r;
        coin.velocity.y = -coin.velocity.y.abs() * restitution;
    }
}

/// Coins overlapping the player square.
pub fn coins_touching(world: &World, player: &Player) -> Vec<EntityId> {
    let bounds = player.bounds();
    world
        .coins
        .iter()
        .filter(|(_, coin)| overlaps(bounds, coin.bounds()))
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player_at(x: f32, y: f32) -> Player {
        Player {
            position: Vec2::new(x, y),
            size: 30.0,
        }
    }

    #[test]
    fn second_shot_inside_interval_is_ignored() {
        let config = GameConfig::default();
        let mut world = World::default();
        let mut clock = CombatClock::new(&config);
        let player = player_at(400.0, 300.0);
        let aim = Vec2::new(600.0, 300.0);

        let first = fire_projectile(&mut world, &mut clock, &player, 500, &config, 1000.0, aim);
        let second = fire_projectile(&mut world, &mut clock, &player, 500, &config, 1499.0, aim);
        let third = fire_projectile(&mut world, &mut clock, &player, 500, &config, 1500.0, aim);
        assert!(first.is_some());
        assert!(second.is_none());
        assert!(third.is_some());
        assert_eq!(world.projectiles.len(), 2);
    }

    #[test]
    fn projectile_flies_toward_aim_point() {
        let config = GameConfig::default();
        let mut world = World::default();
        let mut clock = CombatClock::new(&config);
        let player = player_at(100.0, 100.0);
        let id = fire_projectile(
            &mut world,
            &mut clock,
            &player,
            500,
            &config,
            0.0,
            Vec2::new(100.0, 0.0),
        )
        .unwrap();
        let p = world.projectiles.get(id).unwrap();
        assert_eq!(p.velocity, Vec2::new(0.0, -config.projectile_speed));
    }

    #[test]
    fn aiming_at_self_fires_nothing() {
        let config = GameConfig::default();
        let mut world = World::default();
        let mut clock = CombatClock::new(&config);
        let player = player_at(100.0, 100.0);
        let shot = fire_projectile(
            &mut world,
            &mut clock,
            &player,
            500,
            &config,
            0.0,
            player.position,
        );
        assert!(shot.is_none());
        assert_eq!(clock.last_shot_ms, None);
    }

    #[test]
    fn projectiles_expire_after_lifetime() {
        let mut world = World::default();
        let id = world.spawn_projectile(Projectile {
            position: Vec2::ZERO,
            velocity: Vec2::X,
            size: 8.0,
            expires_at_ms: 2000.0,
        });
        assert!(step_projectiles(&mut world, 0.016, 1999.0).is_empty());
        assert_eq!(step_projectiles(&mut world, 0.016, 2000.0), vec![id]);
    }

    #[test]
    fn target_survives_until_hit_points_run_out() {
        let mut world = World::default();
        let id = world.spawn_target(Target {
            position: Vec2::new(300.0, 300.0),
            size: 40.0,
            remaining_hit_points: 3,
        });
        assert_eq!(
            damage_target(&mut world, id, 2),
            HitOutcome::Damaged { remaining: 1 }
        );
        assert_eq!(
            damage_target(&mut world, id, 2),
            HitOutcome::Destroyed {
                position: Vec2::new(300.0, 300.0)
            }
        );
        assert_eq!(damage_target(&mut world, id, 1), HitOutcome::Missing);
    }

    #[test]
    fn coin_roll_scales_with_multiplier() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let n = roll_coin_count(&mut rng, &config, 3);
            assert!((6..=15).contains(&n));
            assert_eq!(n % 3, 0);
        }
    }

    #[test]
    fn spawner_catches_up_and_respects_cap() {
        let mut config = GameConfig::default();
        config.max_live_targets = 2;
        let mut world = World::default();
        let mut clock = CombatClock::new(&config);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(spawn_due_targets(&mut world, &mut clock, &mut rng, &config, 1, 1999.0).is_empty());
        let spawned = spawn_due_targets(&mut world, &mut clock, &mut rng, &config, 1, 6000.0);
        assert_eq!(spawned.len(), 2);
        assert_eq!(world.targets.len(), 2);
        assert_eq!(clock.next_target_spawn_ms, 8000.0);
        for (_, t) in world.targets.iter() {
            assert!(t.position.x >= 200.0 && t.position.x <= 700.0);
            assert!(t.position.y >= 90.0 && t.position.y <= 510.0);
            assert_eq!(t.remaining_hit_points, 1);
        }
    }

    #[test]
    fn spawned_targets_match_damage_unless_overridden() {
        let mut config = GameConfig::default();
        let mut world = World::default();
        let mut clock = CombatClock::new(&config);
        let mut rng = StdRng::seed_from_u64(5);

        let id = spawn_due_targets(&mut world, &mut clock, &mut rng, &config, 4, 2000.0)[0];
        assert_eq!(world.targets.get(id).unwrap().remaining_hit_points, 4);

        config.target_hit_points = Some(3);
        let id = spawn_due_targets(&mut world, &mut clock, &mut rng, &config, 4, 4000.0)[0];
        assert_eq!(world.targets.get(id).unwrap().remaining_hit_points, 3);
    }

    #[test]
    fn coins_fall_and_bounce_off_the_floor() {
        let config = GameConfig::default();
        let mut world = World::default();
        let id = world.spawn_coin(Coin {
            position: Vec2::new(400.0, config.arena_height - 9.0),
            velocity: Vec2::new(0.0, 100.0),
            radius: 8.0,
            expires_at_ms: 5000.0,
        });
        step_coins(&mut world, &config, 0.1, 100.0);
        let coin = world.coins.get(id).unwrap();
        assert_eq!(coin.position.y, config.arena_height - 8.0);
        assert!(coin.velocity.y < 0.0);
        assert_eq!(step_coins(&mut world, &config, 0.0, 5000.0), vec![id]);
    }

    #[test]
    fn dropped_coins_start_near_origin_and_move_up() {
        let config = GameConfig::default();
        let mut world = World::default();
        let mut rng = StdRng::seed_from_u64(5);
        let origin = Vec2::new(400.0, 300.0);
        let ids = drop_coins(&mut world, &mut rng, &config, 0.0, origin, 8);
        assert_eq!(ids.len(), 8);
        for id in ids {
            let coin = world.coins.get(id).unwrap();
            assert!((coin.position - origin).abs().max_element() <= config.coin_scatter);
            assert!(coin.velocity.y <= -50.0);
            assert_eq!(coin.expires_at_ms, config.coin_lifetime_ms);
        }
    }
}
