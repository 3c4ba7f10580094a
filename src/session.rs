//! One play-through of the game, as plain data.
//!
//! [`GameSession`] owns everything that lives for the duration of a run: the
//! player, the economy and upgrade catalog, the shop state, the entity tables
//! and the game clock.  The front-end talks to it only through three entry
//! points plus a movement intent:
//!
//! | Entry point                 | Called when                         |
//! |-----------------------------|-------------------------------------|
//! | [`GameSession::update`]     | once per frame with the frame delta |
//! | [`GameSession::on_pointer_down`] | the player clicks to shoot     |
//! | [`GameSession::on_purchase_request`] | a digit key is pressed     |
//! | [`GameSession::set_move_intent`] | keyboard state changes         |
//!
//! and reads results back through [`GameSession::render`] and
//! [`GameSession::drain_feedback`].

use crate::audio::SoundCue;
use crate::combat::{self, CombatClock, HitOutcome};
use crate::config::GameConfig;
use crate::economy::{PlayerEconomy, UpgradeCatalog, UpgradeKind};
use crate::entities::{EntityId, Player, Target, World};
use crate::error::PurchaseError;
use crate::feedback::Feedback;
use crate::profile::PlayerProfile;
use crate::render::{Overlay, Renderer, Sprite, SpriteKind};
use crate::save::SaveRequest;
use crate::shop::{self, PurchaseReceipt, ShopSession, ShopTransition, ShopZone};
use bevy::log::{debug, info};
use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Which movement keys are held this frame.
///
/// Opposite keys do not cancel: up wins over down and left wins over right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Unit-per-axis direction (not normalised; diagonals are faster).
    pub fn direction(self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// Running counters for the end-of-session summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub shots_fired: u32,
    pub targets_destroyed: u32,
    pub coins_collected: u32,
    pub upgrades_bought: u32,
}

pub struct GameSession {
    config: GameConfig,
    profile: PlayerProfile,
    /// Milliseconds since the session started; advanced only by `update`.
    now_ms: f64,
    player: Player,
    intent: MoveIntent,
    economy: PlayerEconomy,
    catalog: UpgradeCatalog,
    zone: ShopZone,
    shop: ShopSession,
    world: World,
    combat: CombatClock,
    rng: StdRng,
    feedback: Vec<Feedback>,
    stats: SessionStats,
}

impl GameSession {
    /// Start a session.  Seeds the RNG from `config.seed` when set.
    pub fn new(config: GameConfig, profile: PlayerProfile) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let player = Player {
            position: Vec2::new(config.arena_width / 2.0, config.arena_height / 2.0),
            size: config.player_size,
        };
        info!(
            "Session started for '{}' (arena {}x{})",
            profile.name(),
            config.arena_width,
            config.arena_height
        );
        Self {
            economy: PlayerEconomy::from_config(&config),
            catalog: UpgradeCatalog::default(),
            zone: ShopZone::from_config(&config),
            shop: ShopSession::default(),
            world: World::default(),
            combat: CombatClock::new(&config),
            now_ms: 0.0,
            intent: MoveIntent::default(),
            feedback: Vec::new(),
            stats: SessionStats::default(),
            player,
            rng,
            profile,
            config,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn economy(&self) -> &PlayerEconomy {
        &self.economy
    }

    pub fn catalog(&self) -> &UpgradeCatalog {
        &self.catalog
    }

    pub fn shop(&self) -> &ShopSession {
        &self.shop
    }

    pub fn shop_zone(&self) -> &ShopZone {
        &self.zone
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    // ── Direct state edits (debug tools and tests) ────────────────────────────

    /// Move the player without going through input, clamped to the arena.
    pub fn place_player(&mut self, position: Vec2) {
        self.player.position = self.clamp_to_arena(position);
    }

    /// Credit currency as if coins had been collected.
    pub fn grant_currency(&mut self, amount: u32) {
        self.economy.earn(amount);
        self.shop.refresh(&self.catalog, &self.economy);
    }

    /// Place a target with an explicit hit-point count.
    pub fn spawn_target_at(&mut self, position: Vec2, hit_points: i32) -> EntityId {
        self.world.spawn_target(Target {
            position,
            size: self.config.target_size,
            remaining_hit_points: hit_points,
        })
    }

    // ── Entry points ──────────────────────────────────────────────────────────

    pub fn set_move_intent(&mut self, intent: MoveIntent) {
        self.intent = intent;
    }

    /// Advance the session by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.now_ms += dt as f64 * 1000.0;

        self.move_player(dt);
        self.check_shop_proximity();

        let spawned = combat::spawn_due_targets(
            &mut self.world,
            &mut self.combat,
            &mut self.rng,
            &self.config,
            self.economy.damage_per_shot,
            self.now_ms,
        );
        if !spawned.is_empty() {
            debug!("Spawned {} target(s)", spawned.len());
        }

        combat::step_projectiles(&mut self.world, dt, self.now_ms);
        combat::step_coins(&mut self.world, &self.config, dt, self.now_ms);

        for (projectile, target) in combat::projectile_hits(&self.world) {
            // A target destroyed earlier in this pass cannot absorb another round.
            if !self.world.targets.contains(target) {
                continue;
            }
            self.world.projectiles.remove(projectile);
            self.on_target_hit(target);
        }

        for coin in combat::coins_touching(&self.world, &self.player) {
            self.on_coin_collected(coin);
        }
    }

    /// Pointer press at `position` (arena coordinates).  Shoots unless the
    /// player is standing in the shop.
    pub fn on_pointer_down(&mut self, position: Vec2) -> Option<EntityId> {
        if self.shop.is_open() {
            return None;
        }
        self.shoot(position)
    }

    /// Purchase request for a 1-based catalog slot.
    pub fn on_purchase_request(&mut self, slot: usize) -> Result<PurchaseReceipt, PurchaseError> {
        if !self.shop.is_open() {
            return Err(PurchaseError::ShopClosed);
        }
        match self.catalog.kind_at_slot(slot) {
            Some(kind) => self.purchase(kind),
            None => Err(PurchaseError::UnknownSlot { slot }),
        }
    }

    // ── Operations ────────────────────────────────────────────────────────────

    /// Fire toward `target_point` if the fire interval has elapsed.
    pub fn shoot(&mut self, target_point: Vec2) -> Option<EntityId> {
        let fired = combat::fire_projectile(
            &mut self.world,
            &mut self.combat,
            &self.player,
            self.economy.fire_interval_ms,
            &self.config,
            self.now_ms,
            target_point,
        );
        if fired.is_some() {
            self.stats.shots_fired += 1;
        }
        fired
    }

    /// Buy one level of `kind`.  Failures emit the failure cue and change nothing.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<PurchaseReceipt, PurchaseError> {
        let result = shop::purchase(
            &mut self.shop,
            &mut self.catalog,
            &mut self.economy,
            &self.config,
            kind,
        );
        match result {
            Ok(receipt) => {
                info!(
                    "Bought {} level {} for ${} (next ${}, balance ${})",
                    kind.key(),
                    receipt.new_level,
                    receipt.paid,
                    receipt.next_cost,
                    self.economy.currency
                );
                self.stats.upgrades_bought += 1;
                self.feedback.push(Feedback::Purchased {
                    kind,
                    new_level: receipt.new_level,
                    paid: receipt.paid,
                });
                self.feedback.push(Feedback::Cue(SoundCue::PurchaseSuccess));
            }
            Err(err) => {
                debug!("Purchase of {} refused: {err}", kind.key());
                self.feedback.push(Feedback::PurchaseRejected(err));
                self.feedback.push(Feedback::Cue(SoundCue::PurchaseFailure));
            }
        }
        result
    }

    /// Apply one hit to `target`.  Returns the number of coins dropped when
    /// the hit destroys it.
    pub fn on_target_hit(&mut self, target: EntityId) -> Option<u32> {
        match combat::damage_target(&mut self.world, target, self.economy.damage_per_shot) {
            HitOutcome::Destroyed { position } => {
                let count = combat::roll_coin_count(
                    &mut self.rng,
                    &self.config,
                    self.economy.coin_drop_multiplier,
                );
                combat::drop_coins(
                    &mut self.world,
                    &mut self.rng,
                    &self.config,
                    self.now_ms,
                    position,
                    count,
                );
                self.stats.targets_destroyed += 1;
                self.feedback.push(Feedback::TargetDestroyed {
                    target,
                    coins: count,
                });
                Some(count)
            }
            HitOutcome::Damaged { .. } | HitOutcome::Missing => None,
        }
    }

    /// Pick up `coin`.  Returns `false` if it was already gone.
    pub fn on_coin_collected(&mut self, coin: EntityId) -> bool {
        if self.world.coins.remove(coin).is_none() {
            return false;
        }
        let value = self.config.coin_value;
        self.economy.earn(value);
        self.stats.coins_collected += 1;
        self.shop.refresh(&self.catalog, &self.economy);
        self.feedback.push(Feedback::CoinCollected { coin, value });
        self.feedback.push(Feedback::Cue(SoundCue::CoinPickup));
        true
    }

    /// Take every queued notification.
    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }

    /// Payload for the best-effort backend save.
    pub fn save_request(&self) -> SaveRequest {
        SaveRequest {
            username: self.profile.name().to_string(),
            xp: self.economy.total_earned,
            level: 1 + self.catalog.total_levels(),
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Describe the current frame to `renderer`.
    pub fn render(&self, renderer: &mut impl Renderer) {
        renderer.draw_sprite(&Sprite {
            id: None,
            kind: SpriteKind::ShopZone,
            position: self.zone.rect.center(),
            size: self.zone.rect.size(),
        });
        for (id, target) in self.world.targets.iter() {
            renderer.draw_sprite(&Sprite {
                id: Some(id),
                kind: SpriteKind::Target,
                position: target.position,
                size: Vec2::splat(target.size),
            });
        }
        for (id, coin) in self.world.coins.iter() {
            renderer.draw_sprite(&Sprite {
                id: Some(id),
                kind: SpriteKind::Coin,
                position: coin.position,
                size: Vec2::splat(coin.radius * 2.0),
            });
        }
        for (id, projectile) in self.world.projectiles.iter() {
            renderer.draw_sprite(&Sprite {
                id: Some(id),
                kind: SpriteKind::Projectile,
                position: projectile.position,
                size: Vec2::splat(projectile.size),
            });
        }
        renderer.draw_sprite(&Sprite {
            id: None,
            kind: SpriteKind::Player,
            position: self.player.position,
            size: Vec2::splat(self.player.size),
        });

        renderer.draw_overlay(Overlay::Balance, &format!("💰 ${}", self.economy.currency));
        renderer.draw_overlay(Overlay::ShopLabel, "🏪 SHOP");
        renderer.draw_overlay(
            Overlay::Greeting,
            &format!(
                "Welcome, {}! WASD to move, mouse to shoot",
                self.profile.name()
            ),
        );
        match self.shop.catalog_text() {
            Some(text) => renderer.draw_overlay(Overlay::Catalog, text),
            None => renderer.hide_overlay(Overlay::Catalog),
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn move_player(&mut self, dt: f32) {
        let step = self.intent.direction() * self.economy.move_speed * dt;
        if step != Vec2::ZERO {
            self.player.position = self.clamp_to_arena(self.player.position + step);
        }
    }

    fn clamp_to_arena(&self, position: Vec2) -> Vec2 {
        let half = self.player.size / 2.0;
        Vec2::new(
            position.x.clamp(half, self.config.arena_width - half),
            position.y.clamp(half, self.config.arena_height - half),
        )
    }

    fn check_shop_proximity(&mut self) {
        let transition = self.shop.observe(
            &self.zone,
            self.player.position,
            &self.catalog,
            &self.economy,
        );
        match transition {
            Some(ShopTransition::Opened) => {
                debug!("Shop opened");
                self.feedback.push(Feedback::ShopOpened);
            }
            Some(ShopTransition::Closed) => {
                debug!("Shop closed");
                self.feedback.push(Feedback::ShopClosed);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let config = GameConfig {
            seed: Some(42),
            ..GameConfig::default()
        };
        GameSession::new(config, PlayerProfile::parse("Tester").unwrap())
    }

    #[test]
    fn player_starts_centred_with_base_stats() {
        let s = session();
        assert_eq!(s.player().position, Vec2::new(400.0, 300.0));
        assert_eq!(s.economy().currency, 0);
        assert_eq!(s.economy().fire_interval_ms, 500);
        assert!(!s.shop().is_open());
    }

    #[test]
    fn up_beats_down_and_left_beats_right() {
        let intent = MoveIntent {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(intent.direction(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn movement_uses_move_speed_and_stays_in_arena() {
        let mut s = session();
        s.set_move_intent(MoveIntent {
            right: true,
            ..MoveIntent::default()
        });
        s.update(0.5);
        assert_eq!(s.player().position, Vec2::new(500.0, 300.0));
        s.update(10.0);
        assert_eq!(s.player().position.x, 800.0 - 15.0);
    }

    #[test]
    fn pointer_is_ignored_inside_the_shop() {
        let mut s = session();
        s.place_player(Vec2::new(100.0, 100.0));
        s.update(0.0);
        assert!(s.shop().is_open());
        assert!(s.on_pointer_down(Vec2::new(500.0, 500.0)).is_none());
        assert!(s.world().projectiles.is_empty());
    }

    #[test]
    fn coin_pickup_credits_and_cues() {
        let mut s = session();
        let target = s.spawn_target_at(Vec2::new(400.0, 300.0), 1);
        assert!(s.on_target_hit(target).is_some());
        let coin = s.world().coins.ids()[0];
        assert!(s.on_coin_collected(coin));
        assert!(!s.on_coin_collected(coin));
        assert_eq!(s.economy().currency, 10);
        let feedback = s.drain_feedback();
        assert!(feedback.contains(&Feedback::Cue(SoundCue::CoinPickup)));
        assert!(s.drain_feedback().is_empty());
    }

    #[test]
    fn save_request_reports_earnings_and_levels() {
        let mut s = session();
        s.grant_currency(150);
        s.place_player(Vec2::new(100.0, 100.0));
        s.update(0.0);
        s.on_purchase_request(1).unwrap();
        let request = s.save_request();
        assert_eq!(request.username, "Tester");
        assert_eq!(request.xp, 150);
        assert_eq!(request.level, 2);
    }
}
