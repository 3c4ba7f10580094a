//! Bevy side of [`crate::render::Renderer`]: gizmo shapes and HUD text.
//!
//! ## Layer Model
//!
//! | Layer            | Technology | Source                           |
//! |------------------|------------|----------------------------------|
//! | Shop zone        | Gizmos     | `SpriteKind::ShopZone`           |
//! | Targets          | Gizmos     | `SpriteKind::Target`             |
//! | Coins            | Gizmos     | `SpriteKind::Coin`               |
//! | Projectiles      | Gizmos     | `SpriteKind::Projectile`         |
//! | Player           | Gizmos     | `SpriteKind::Player`             |
//! | Balance          | Bevy UI    | `Overlay::Balance`, top-left     |
//! | Shop label       | Bevy UI    | `Overlay::ShopLabel`, over zone  |
//! | Greeting         | Bevy UI    | `Overlay::Greeting`, bottom      |
//! | Catalog          | Bevy UI    | `Overlay::Catalog`, centred      |
//!
//! Arena coordinates (origin top-left, y down) are mapped to world space
//! (origin centre, y up) by [`arena_to_world`].  UI nodes are positioned in
//! logical pixels, which equal arena units at the default window size.

use crate::arcade::ActiveSession;
use crate::config::GameConfig;
use crate::render::{Overlay, Renderer, Sprite, SpriteKind};
use bevy::math::Isometry2d;
use bevy::prelude::*;
use std::collections::HashMap;

// ── Component markers ─────────────────────────────────────────────────────────

/// Root of every HUD node; despawned when gameplay ends.
#[derive(Component)]
pub struct HudRoot;

/// Text node that displays one [`Overlay`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudText(pub Overlay);

// ── Colours ───────────────────────────────────────────────────────────────────

fn sprite_color(kind: SpriteKind) -> Color {
    match kind {
        SpriteKind::ShopZone => Color::srgba(0.27, 0.27, 1.0, 0.6),
        SpriteKind::Player => Color::srgb(0.0, 1.0, 0.0),
        SpriteKind::Projectile => Color::srgb(1.0, 1.0, 0.0),
        SpriteKind::Target => Color::srgb(1.0, 0.4, 0.0),
        SpriteKind::Coin => Color::srgb(1.0, 0.84, 0.0),
    }
}

/// Convert arena coordinates to Bevy world coordinates.
#[inline]
pub fn arena_to_world(position: Vec2, arena_size: Vec2) -> Vec2 {
    Vec2::new(position.x - arena_size.x / 2.0, arena_size.y / 2.0 - position.y)
}

/// Inverse of [`arena_to_world`].
#[inline]
pub fn world_to_arena(world: Vec2, arena_size: Vec2) -> Vec2 {
    Vec2::new(world.x + arena_size.x / 2.0, arena_size.y / 2.0 - world.y)
}

// ── Renderer implementation ───────────────────────────────────────────────────

/// Draws sprites immediately with gizmos and collects overlay text for the
/// HUD pass.
pub struct GizmoRenderer<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    arena_size: Vec2,
    overlays: HashMap<Overlay, Option<String>>,
}

impl<'a, 'w, 's> GizmoRenderer<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, config: &GameConfig) -> Self {
        Self {
            gizmos,
            arena_size: Vec2::new(config.arena_width, config.arena_height),
            overlays: HashMap::new(),
        }
    }

    /// Overlay text gathered this frame; `None` entries are hidden overlays.
    pub fn into_overlays(self) -> HashMap<Overlay, Option<String>> {
        self.overlays
    }
}

impl Renderer for GizmoRenderer<'_, '_, '_> {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        let at = Isometry2d::from_translation(arena_to_world(sprite.position, self.arena_size));
        let color = sprite_color(sprite.kind);
        match sprite.kind {
            SpriteKind::Coin => {
                self.gizmos.circle_2d(at, sprite.size.x / 2.0, color);
            }
            SpriteKind::Target => {
                self.gizmos.rect_2d(at, sprite.size, color);
                self.gizmos.rect_2d(at, sprite.size - Vec2::splat(6.0), color);
            }
            _ => {
                self.gizmos.rect_2d(at, sprite.size, color);
            }
        }
    }

    fn draw_overlay(&mut self, overlay: Overlay, text: &str) {
        self.overlays.insert(overlay, Some(text.to_string()));
    }

    fn hide_overlay(&mut self, overlay: Overlay) {
        self.overlays.insert(overlay, None);
    }
}

// ── HUD setup ─────────────────────────────────────────────────────────────────

/// Spawn the HUD text nodes.  All start empty; [`render_session_system`]
/// fills them every frame.
pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>) {
    // Balance, top-left.
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(16.0),
            ..default()
        },
        Text::new(""),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.84, 0.0)),
        ZIndex(100),
        HudText(Overlay::Balance),
        HudRoot,
    ));

    // Shop label above the zone.
    let [zone_x, zone_y] = config.shop_zone_center;
    let zone_top = zone_y - config.shop_zone_size / 2.0;
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(zone_x - 40.0),
            top: Val::Px((zone_top - 30.0).max(0.0)),
            ..default()
        },
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        ZIndex(100),
        HudText(Overlay::ShopLabel),
        HudRoot,
    ));

    // Greeting, bottom-centre.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                bottom: Val::Px(40.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            ZIndex(100),
            HudRoot,
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                HudText(Overlay::Greeting),
            ));
        });

    // Catalog, centred, hidden until the shop opens.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            ZIndex(1000),
            HudRoot,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Node {
                    padding: UiRect::all(Val::Px(10.0)),
                    ..default()
                },
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                BackgroundColor(Color::BLACK),
                Visibility::Hidden,
                HudText(Overlay::Catalog),
            ));
        });

    info!("[SETUP] HUD spawned");
}

/// Despawn the HUD.
pub fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Per-frame rendering ───────────────────────────────────────────────────────

/// Render the active session: sprites straight to gizmos, overlays into the
/// tagged HUD text nodes.
pub fn render_session_system(
    session: Option<Res<ActiveSession>>,
    mut gizmos: Gizmos,
    mut hud: Query<(&HudText, &mut Text, &mut Visibility)>,
) {
    let Some(session) = session else {
        return;
    };
    let mut renderer = GizmoRenderer::new(&mut gizmos, session.0.config());
    session.0.render(&mut renderer);
    let overlays = renderer.into_overlays();

    for (tag, mut text, mut visibility) in hud.iter_mut() {
        match overlays.get(&tag.0) {
            Some(Some(content)) => {
                if text.0 != *content {
                    text.0 = content.clone();
                }
                visibility.set_if_neq(Visibility::Inherited);
            }
            Some(None) => {
                visibility.set_if_neq(Visibility::Hidden);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_corners_map_to_world_corners() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(arena_to_world(Vec2::ZERO, size), Vec2::new(-400.0, 300.0));
        assert_eq!(arena_to_world(size, size), Vec2::new(400.0, -300.0));
        assert_eq!(arena_to_world(size / 2.0, size), Vec2::ZERO);
    }

    #[test]
    fn world_to_arena_undoes_arena_to_world() {
        let size = Vec2::new(800.0, 600.0);
        let p = Vec2::new(37.0, 512.0);
        assert_eq!(world_to_arena(arena_to_world(p, size), size), p);
    }
}
