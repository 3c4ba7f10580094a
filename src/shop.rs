//! The upgrade shop: zone detection, catalog text, and purchase validation.
//!
//! ## States
//!
//! | State    | Entered when                      | Purchase slots |
//! |----------|-----------------------------------|----------------|
//! | `Closed` | player leaves the zone (initial)  | ignored        |
//! | `Open`   | player enters the zone            | `1..=N` active |
//!
//! Only [`ShopSession::observe`] changes the state, and only when the
//! containment result differs from the current state, so a stationary player
//! never produces repeated transitions.

use crate::config::GameConfig;
use crate::economy::{PlayerEconomy, UpgradeCatalog, UpgradeKind};
use crate::error::PurchaseError;
use bevy::math::{Rect, Vec2};

/// Fixed rectangular region that opens the shop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShopZone {
    pub rect: Rect,
}

impl ShopZone {
    pub fn from_config(config: &GameConfig) -> Self {
        let [x, y] = config.shop_zone_center;
        Self {
            rect: Rect::from_center_size(Vec2::new(x, y), Vec2::splat(config.shop_zone_size)),
        }
    }

    /// Closed-rectangle containment: points on the edge are inside.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.rect.min.x
            && point.x <= self.rect.max.x
            && point.y >= self.rect.min.y
            && point.y <= self.rect.max.y
    }
}

/// Result of one proximity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopTransition {
    Opened,
    Closed,
}

/// Open/closed state plus the catalog text shown while open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopSession {
    is_open: bool,
    catalog_text: Option<String>,
}

impl ShopSession {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Catalog text to display; `None` while closed.
    pub fn catalog_text(&self) -> Option<&str> {
        self.catalog_text.as_deref()
    }

    /// Compare the player position with the zone and transition if the
    /// containment changed.
    pub fn observe(
        &mut self,
        zone: &ShopZone,
        player_position: Vec2,
        catalog: &UpgradeCatalog,
        economy: &PlayerEconomy,
    ) -> Option<ShopTransition> {
        let inside = zone.contains(player_position);
        match (inside, self.is_open) {
            (true, false) => {
                self.is_open = true;
                self.refresh(catalog, economy);
                Some(ShopTransition::Opened)
            }
            (false, true) => {
                self.is_open = false;
                self.catalog_text = None;
                Some(ShopTransition::Closed)
            }
            _ => None,
        }
    }

    /// Re-render the catalog text if the shop is open.
    pub fn refresh(&mut self, catalog: &UpgradeCatalog, economy: &PlayerEconomy) {
        if self.is_open {
            self.catalog_text = Some(render_catalog(catalog, economy.currency));
        }
    }
}

/// Successful purchase details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub kind: UpgradeKind,
    pub paid: u32,
    pub new_level: u32,
    pub next_cost: u32,
}

/// Validate and apply one purchase.
///
/// Checks, in order: the shop is open, the upgrade exists, it is below its
/// max level, and the player can pay.  Any failure leaves every argument
/// untouched.  On success the currency is debited, the level and cost
/// advance, the stat effect is applied, and the open catalog is re-rendered.
pub fn purchase(
    shop: &mut ShopSession,
    catalog: &mut UpgradeCatalog,
    economy: &mut PlayerEconomy,
    config: &GameConfig,
    kind: UpgradeKind,
) -> Result<PurchaseReceipt, PurchaseError> {
    if !shop.is_open() {
        return Err(PurchaseError::ShopClosed);
    }
    let Some(upgrade) = catalog.get_mut(kind) else {
        return Err(PurchaseError::UnknownUpgrade { kind });
    };
    if upgrade.is_maxed() {
        return Err(PurchaseError::MaxLevelReached);
    }
    if !upgrade.can_afford(economy.currency) {
        return Err(PurchaseError::InsufficientFunds {
            cost: upgrade.current_cost,
            balance: economy.currency,
        });
    }

    let paid = upgrade.current_cost;
    economy.currency -= paid;
    upgrade.advance();
    let receipt = PurchaseReceipt {
        kind,
        paid,
        new_level: upgrade.level,
        next_cost: upgrade.current_cost,
    };
    economy.apply_upgrade(kind, config);
    shop.refresh(catalog, economy);
    Ok(receipt)
}

/// Catalog text as shown in the shop overlay.
pub fn render_catalog(catalog: &UpgradeCatalog, balance: u32) -> String {
    let mut menu = String::from("=== SHOP ===\n\n");
    for (idx, upgrade) in catalog.entries().iter().enumerate() {
        let status = if upgrade.is_maxed() {
            "(MAX)"
        } else if upgrade.can_afford(balance) {
            "✓"
        } else {
            "✗"
        };
        menu.push_str(&format!(
            "{}. {} [Lv{}/{}]\n",
            idx + 1,
            upgrade.display_name,
            upgrade.level,
            upgrade.max_level
        ));
        menu.push_str(&format!("   {}\n", upgrade.effect_description));
        menu.push_str(&format!("   Cost: ${} {}\n\n", upgrade.current_cost, status));
    }
    menu.push_str(&format!(
        "Press 1-{} to buy\nLeave the zone to close",
        catalog.len()
    ));
    menu
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (GameConfig, ShopZone, UpgradeCatalog, PlayerEconomy) {
        let config = GameConfig::default();
        let zone = ShopZone::from_config(&config);
        let economy = PlayerEconomy::from_config(&config);
        (config, zone, UpgradeCatalog::default(), economy)
    }

    #[test]
    fn zone_edges_are_inside() {
        let (_, zone, _, _) = fixtures();
        assert!(zone.contains(Vec2::new(10.0, 10.0)));
        assert!(zone.contains(Vec2::new(190.0, 190.0)));
        assert!(zone.contains(Vec2::new(190.0, 100.0)));
        assert!(!zone.contains(Vec2::new(190.01, 100.0)));
        assert!(!zone.contains(Vec2::new(9.99, 100.0)));
    }

    #[test]
    fn observe_only_reports_changes() {
        let (_, zone, catalog, economy) = fixtures();
        let mut shop = ShopSession::default();
        let inside = Vec2::new(100.0, 100.0);
        let outside = Vec2::new(400.0, 300.0);

        assert_eq!(shop.observe(&zone, outside, &catalog, &economy), None);
        assert_eq!(
            shop.observe(&zone, inside, &catalog, &economy),
            Some(ShopTransition::Opened)
        );
        assert!(shop.catalog_text().is_some());
        assert_eq!(shop.observe(&zone, inside, &catalog, &economy), None);
        assert_eq!(
            shop.observe(&zone, outside, &catalog, &economy),
            Some(ShopTransition::Closed)
        );
        assert!(shop.catalog_text().is_none());
        assert_eq!(shop.observe(&zone, outside, &catalog, &economy), None);
    }

    #[test]
    fn purchase_requires_open_shop() {
        let (config, _, mut catalog, mut economy) = fixtures();
        economy.currency = 1_000;
        let mut shop = ShopSession::default();
        let result = purchase(
            &mut shop,
            &mut catalog,
            &mut economy,
            &config,
            UpgradeKind::Damage,
        );
        assert_eq!(result, Err(PurchaseError::ShopClosed));
        assert_eq!(economy.currency, 1_000);
    }

    #[test]
    fn upgrade_missing_from_catalog_is_reported_by_kind() {
        let (config, zone, _, mut economy) = fixtures();
        economy.currency = 1_000;
        let mut catalog = UpgradeCatalog::new(Vec::new());
        let mut shop = ShopSession::default();
        shop.observe(&zone, Vec2::new(50.0, 50.0), &catalog, &economy);
        let result = purchase(
            &mut shop,
            &mut catalog,
            &mut economy,
            &config,
            UpgradeKind::Speed,
        );
        assert_eq!(
            result,
            Err(PurchaseError::UnknownUpgrade {
                kind: UpgradeKind::Speed
            })
        );
        assert_eq!(economy.currency, 1_000);
    }

    #[test]
    fn max_level_is_checked_before_funds() {
        let (config, zone, mut catalog, mut economy) = fixtures();
        let mut shop = ShopSession::default();
        shop.observe(&zone, Vec2::new(50.0, 50.0), &catalog, &economy);
        if let Some(speed) = catalog.get_mut(UpgradeKind::Speed) {
            speed.level = speed.max_level;
        }
        let result = purchase(
            &mut shop,
            &mut catalog,
            &mut economy,
            &config,
            UpgradeKind::Speed,
        );
        assert_eq!(result, Err(PurchaseError::MaxLevelReached));
    }

    #[test]
    fn catalog_marks_affordability_and_max() {
        let mut catalog = UpgradeCatalog::default();
        if let Some(speed) = catalog.get_mut(UpgradeKind::Speed) {
            speed.level = speed.max_level;
        }
        let text = render_catalog(&catalog, 60);
        assert!(text.starts_with("=== SHOP ==="));
        assert!(text.contains("1. Fire Rate [Lv0/10]\n   Shoots faster\n   Cost: $50 ✓"));
        assert!(text.contains("2. Damage [Lv0/10]\n   Deals more damage\n   Cost: $100 ✗"));
        assert!(text.contains("4. Speed [Lv5/5]\n   Moves faster\n   Cost: $60 (MAX)"));
        assert!(text.ends_with("Press 1-4 to buy\nLeave the zone to close"));
    }
}
