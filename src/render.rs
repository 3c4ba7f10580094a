//! The drawing interface a front-end implements.
//!
//! [`crate::session::GameSession::render`] walks its state once per frame and
//! describes it through [`Renderer`]: shapes as [`Sprite`]s tagged with the
//! owning [`EntityId`] (when there is one), text as [`Overlay`]s.  Positions
//! are arena coordinates with y pointing down; converting to screen or world
//! space is the implementor's job.

use crate::entities::EntityId;
use bevy::math::Vec2;

/// What a sprite depicts.  Implementors pick colour and shape from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    /// The translucent shop area.
    ShopZone,
    Player,
    Projectile,
    Target,
    Coin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Arena entity the sprite belongs to; `None` for the player and the zone.
    pub id: Option<EntityId>,
    pub kind: SpriteKind,
    /// Centre position.
    pub position: Vec2,
    /// Full width and height (for coins, the diameter on both axes).
    pub size: Vec2,
}

/// Text layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// Currency balance, top-left.
    Balance,
    /// Upgrade catalog, centred, only while the shop is open.
    Catalog,
    /// Greeting and controls hint, bottom-centre.
    Greeting,
    /// Label above the shop zone.
    ShopLabel,
}

/// Implemented by the rendering collaborator.
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: &Sprite);

    fn draw_overlay(&mut self, overlay: Overlay, text: &str);

    fn hide_overlay(&mut self, overlay: Overlay);
}

/// Renderer that records every call; useful for tests and headless runs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameRecorder {
    pub sprites: Vec<Sprite>,
    pub overlays: Vec<(Overlay, Option<String>)>,
}

impl FrameRecorder {
    /// Last text drawn for `overlay`, or `None` if it was hidden or never drawn.
    pub fn overlay_text(&self, overlay: Overlay) -> Option<&str> {
        self.overlays
            .iter()
            .rev()
            .find(|(o, _)| *o == overlay)
            .and_then(|(_, text)| text.as_deref())
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

impl Renderer for FrameRecorder {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.sprites.push(*sprite);
    }

    fn draw_overlay(&mut self, overlay: Overlay, text: &str) {
        self.overlays.push((overlay, Some(text.to_string())));
    }

    fn hide_overlay(&mut self, overlay: Overlay) {
        self.overlays.push((overlay, None));
    }
}
