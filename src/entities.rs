//! Entity records and the id-keyed tables that own them.
//!
//! Every short-lived thing in the arena (projectiles, targets, coins) is a
//! plain record stored in a [`Table`] under an [`EntityId`].  Ids come from a
//! single [`IdAllocator`] per session, so an id is never reused and never
//! shared between tables; a renderer can key its visuals on the id alone.
//!
//! Expiry is a timestamp on the record, compared against the session clock
//! every tick.  Removing a row is the only way an entity dies, so there is no
//! callback that could fire for an entity that is already gone.

use bevy::math::{Rect, Vec2};
use std::collections::BTreeMap;

/// Stable identifier of an arena entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// Hands out monotonically increasing [`EntityId`]s.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }
}

/// Ordered map from id to record.
///
/// Iteration follows id order (spawn order), which keeps contact resolution
/// deterministic for a seeded session.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<EntityId, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    pub fn insert(&mut self, id: EntityId, row: T) {
        self.rows.insert(id, row);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.rows.iter_mut().map(|(id, row)| (*id, row))
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.rows.keys().copied().collect()
    }

    /// Drop every row for which `keep` returns `false`; returns the removed ids.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> Vec<EntityId> {
        let removed: Vec<EntityId> = self
            .rows
            .iter()
            .filter(|(_, row)| !keep(row))
            .map(|(id, _)| *id)
            .collect();
        for id in &removed {
            self.rows.remove(id);
        }
        removed
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// The player-controlled square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Centre of the square (arena coordinates, y down).
    pub position: Vec2,
    pub size: f32,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }
}

/// A fired round travelling in a straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Units per second.
    pub velocity: Vec2,
    pub size: f32,
    /// Game-clock time at which the projectile is removed.
    pub expires_at_ms: f64,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }
}

/// A destructible box that drops coins when its hit points run out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec2,
    pub size: f32,
    pub remaining_hit_points: i32,
}

impl Target {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }
}

/// A currency pickup with simple ballistic motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    pub position: Vec2,
    /// Units per second.
    pub velocity: Vec2,
    pub radius: f32,
    /// Game-clock time at which an uncollected coin disappears.
    pub expires_at_ms: f64,
}

impl Coin {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.radius * 2.0))
    }
}

/// Closed-interval AABB overlap: touching edges count as overlapping.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// All entity tables of one session plus their shared id source.
#[derive(Debug, Default)]
pub struct World {
    ids: IdAllocator,
    pub projectiles: Table<Projectile>,
    pub targets: Table<Target>,
    pub coins: Table<Coin>,
}

impl World {
    pub fn spawn_projectile(&mut self, projectile: Projectile) -> EntityId {
        let id = self.ids.allocate();
        self.projectiles.insert(id, projectile);
        id
    }

    pub fn spawn_target(&mut self, target: Target) -> EntityId {
        let id = self.ids.allocate();
        self.targets.insert(id, target);
        id
    }

    pub fn spawn_coin(&mut self, coin: Coin) -> EntityId {
        let id = self.ids.allocate();
        self.coins.insert(id, coin);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_across_tables() {
        let mut world = World::default();
        let t = world.spawn_target(Target {
            position: Vec2::ZERO,
            size: 40.0,
            remaining_hit_points: 1,
        });
        let c = world.spawn_coin(Coin {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: 8.0,
            expires_at_ms: 1.0,
        });
        assert_ne!(t, c);
        assert!(world.targets.contains(t));
        assert!(!world.targets.contains(c));
    }

    #[test]
    fn retain_reports_removed_ids() {
        let mut table = Table::default();
        table.insert(EntityId(1), 10);
        table.insert(EntityId(2), 20);
        table.insert(EntityId(3), 30);
        let removed = table.retain(|v| *v != 20);
        assert_eq!(removed, vec![EntityId(2)]);
        assert_eq!(table.ids(), vec![EntityId(1), EntityId(3)]);
    }

    #[test]
    fn touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        let c = Rect::new(10.5, 0.0, 20.0, 10.0);
        assert!(overlaps(a, b));
        assert!(!overlaps(a, c));
    }
}
