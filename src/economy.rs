//! Player economy: currency, upgradeable stats, and the upgrade catalog.
//!
//! ## Default catalog
//!
//! | Slot | Upgrade          | Base cost | Max level | Effect per level            |
//! |------|------------------|-----------|-----------|-----------------------------|
//! | 1    | Fire Rate        | 50        | 10        | −50 ms fire interval (≥ 100)|
//! | 2    | Damage           | 100       | 10        | +1 damage per shot          |
//! | 3    | Coin Multiplier  | 75        | 10        | +1 coin drop multiplier     |
//! | 4    | Speed            | 60        | 5         | +30 move speed              |
//!
//! After every purchase the cost becomes `floor(cost × 1.5)`, computed in
//! integers as `cost * 3 / 2`.

use crate::config::GameConfig;
use crate::constants::*;

/// Identifies one purchasable upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    FireRate,
    Damage,
    CoinValue,
    Speed,
}

impl UpgradeKind {
    /// Stable lowercase key, used in logs.
    pub fn key(self) -> &'static str {
        match self {
            UpgradeKind::FireRate => "fire_rate",
            UpgradeKind::Damage => "damage",
            UpgradeKind::CoinValue => "coin_value",
            UpgradeKind::Speed => "speed",
        }
    }
}

/// One catalog row: level and cost bookkeeping for a single upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeDefinition {
    pub kind: UpgradeKind,
    pub display_name: &'static str,
    pub base_cost: u32,
    pub current_cost: u32,
    /// Levels bought so far, `0..=max_level`.
    pub level: u32,
    pub max_level: u32,
    pub effect_description: &'static str,
}

impl UpgradeDefinition {
    pub fn new(
        kind: UpgradeKind,
        display_name: &'static str,
        base_cost: u32,
        max_level: u32,
        effect_description: &'static str,
    ) -> Self {
        Self {
            kind,
            display_name,
            base_cost,
            current_cost: base_cost,
            level: 0,
            max_level,
            effect_description,
        }
    }

    /// Whether the upgrade can be bought further.
    #[inline]
    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    /// Returns `true` when `balance` covers the current cost.
    #[inline]
    pub fn can_afford(&self, balance: u32) -> bool {
        balance >= self.current_cost
    }

    /// Bump the level and scale the cost.  Callers validate first.
    pub(crate) fn advance(&mut self) {
        self.level += 1;
        self.current_cost = next_cost(self.current_cost);
    }
}

/// `floor(cost × 1.5)` in integer arithmetic.
#[inline]
pub fn next_cost(cost: u32) -> u32 {
    cost.saturating_mul(COST_GROWTH_NUMERATOR) / COST_GROWTH_DENOMINATOR
}

/// Ordered list of upgrades; the order is the purchase-slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeCatalog {
    entries: Vec<UpgradeDefinition>,
}

impl Default for UpgradeCatalog {
    fn default() -> Self {
        Self::new(vec![
            UpgradeDefinition::new(
                UpgradeKind::FireRate,
                "Fire Rate",
                FIRE_RATE_BASE_COST,
                FIRE_RATE_MAX_LEVEL,
                "Shoots faster",
            ),
            UpgradeDefinition::new(
                UpgradeKind::Damage,
                "Damage",
                DAMAGE_BASE_COST,
                DAMAGE_MAX_LEVEL,
                "Deals more damage",
            ),
            UpgradeDefinition::new(
                UpgradeKind::CoinValue,
                "Coin Multiplier",
                COIN_VALUE_BASE_COST,
                COIN_VALUE_MAX_LEVEL,
                "More coins from boxes",
            ),
            UpgradeDefinition::new(
                UpgradeKind::Speed,
                "Speed",
                SPEED_BASE_COST,
                SPEED_MAX_LEVEL,
                "Moves faster",
            ),
        ])
    }
}

impl UpgradeCatalog {
    pub fn new(entries: Vec<UpgradeDefinition>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[UpgradeDefinition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kind: UpgradeKind) -> Option<&UpgradeDefinition> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    pub fn get_mut(&mut self, kind: UpgradeKind) -> Option<&mut UpgradeDefinition> {
        self.entries.iter_mut().find(|e| e.kind == kind)
    }

    /// Upgrade bound to a 1-based purchase slot.
    pub fn kind_at_slot(&self, slot: usize) -> Option<UpgradeKind> {
        slot.checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
            .map(|e| e.kind)
    }

    /// Sum of all bought levels.
    pub fn total_levels(&self) -> u32 {
        self.entries.iter().map(|e| e.level).sum()
    }
}

/// Currency plus every stat an upgrade can change.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEconomy {
    pub currency: u32,
    pub fire_interval_ms: u32,
    pub damage_per_shot: i32,
    pub coin_drop_multiplier: u32,
    pub move_speed: f32,
    /// Lifetime currency picked up; never decreases.
    pub total_earned: u32,
}

impl PlayerEconomy {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            currency: 0,
            fire_interval_ms: config.fire_interval_ms,
            damage_per_shot: 1,
            coin_drop_multiplier: 1,
            move_speed: config.player_base_speed,
            total_earned: 0,
        }
    }

    /// Credit a coin pickup.
    pub fn earn(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
    }

    /// Apply one level of `kind` to the stats.
    pub fn apply_upgrade(&mut self, kind: UpgradeKind, config: &GameConfig) {
        match kind {
            UpgradeKind::FireRate => {
                self.fire_interval_ms = self
                    .fire_interval_ms
                    .saturating_sub(config.fire_interval_step_ms)
                    .max(config.min_fire_interval_ms);
            }
            UpgradeKind::Damage => self.damage_per_shot += 1,
            UpgradeKind::CoinValue => self.coin_drop_multiplier += 1,
            UpgradeKind::Speed => self.move_speed += config.speed_upgrade_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_scaling_floors_each_step() {
        assert_eq!(next_cost(50), 75);
        assert_eq!(next_cost(75), 112);
        assert_eq!(next_cost(112), 168);
        assert_eq!(next_cost(1), 1);
    }

    #[test]
    fn slots_follow_catalog_order() {
        let catalog = UpgradeCatalog::default();
        assert_eq!(catalog.kind_at_slot(1), Some(UpgradeKind::FireRate));
        assert_eq!(catalog.kind_at_slot(4), Some(UpgradeKind::Speed));
        assert_eq!(catalog.kind_at_slot(0), None);
        assert_eq!(catalog.kind_at_slot(5), None);
    }

    #[test]
    fn fire_rate_upgrade_floors_at_minimum() {
        let config = GameConfig::default();
        let mut economy = PlayerEconomy::from_config(&config);
        for _ in 0..20 {
            economy.apply_upgrade(UpgradeKind::FireRate, &config);
        }
        assert_eq!(economy.fire_interval_ms, MIN_FIRE_INTERVAL_MS);
    }

    #[test]
    fn stat_upgrades_step_by_fixed_amounts() {
        let config = GameConfig::default();
        let mut economy = PlayerEconomy::from_config(&config);
        economy.apply_upgrade(UpgradeKind::Damage, &config);
        economy.apply_upgrade(UpgradeKind::CoinValue, &config);
        economy.apply_upgrade(UpgradeKind::Speed, &config);
        assert_eq!(economy.damage_per_shot, 2);
        assert_eq!(economy.coin_drop_multiplier, 2);
        assert_eq!(economy.move_speed, PLAYER_BASE_SPEED + SPEED_UPGRADE_STEP);
    }

    #[test]
    fn earning_tracks_lifetime_total() {
        let mut economy = PlayerEconomy::from_config(&GameConfig::default());
        economy.earn(10);
        economy.currency -= 5;
        economy.earn(10);
        assert_eq!(economy.currency, 15);
        assert_eq!(economy.total_earned, 20);
    }
}
