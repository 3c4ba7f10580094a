//! Input systems: keyboard and mouse into [`crate::session::GameSession`] calls.
//!
//! | Input             | Session call                                         |
//! |-------------------|------------------------------------------------------|
//! | W / A / S / D     | [`crate::session::GameSession::set_move_intent`]     |
//! | Left click        | [`crate::session::GameSession::on_pointer_down`]     |
//! | 1 – 9             | [`crate::session::GameSession::on_purchase_request`] |
//!
//! Digit keys only reach the session while its shop is open; outside the zone
//! they are dropped here without feedback.

use crate::arcade::ActiveSession;
use crate::rendering::world_to_arena;
use crate::session::MoveIntent;
use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Digit keys in slot order (slot 1 first).
const SLOT_KEYS: [(KeyCode, KeyCode); 9] = [
    (KeyCode::Digit1, KeyCode::Numpad1),
    (KeyCode::Digit2, KeyCode::Numpad2),
    (KeyCode::Digit3, KeyCode::Numpad3),
    (KeyCode::Digit4, KeyCode::Numpad4),
    (KeyCode::Digit5, KeyCode::Numpad5),
    (KeyCode::Digit6, KeyCode::Numpad6),
    (KeyCode::Digit7, KeyCode::Numpad7),
    (KeyCode::Digit8, KeyCode::Numpad8),
    (KeyCode::Digit9, KeyCode::Numpad9),
];

/// Read WASD into the session's movement intent.
pub fn movement_input_system(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<ActiveSession>) {
    let intent = MoveIntent {
        up: keys.pressed(KeyCode::KeyW),
        down: keys.pressed(KeyCode::KeyS),
        left: keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::KeyD),
    };
    session.0.set_move_intent(intent);
}

/// Left click shoots toward the cursor.
pub fn pointer_input_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<ActiveSession>,
) {
    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let config = session.0.config();
    let point = cursor_to_arena(
        cursor,
        Vec2::new(window.width(), window.height()),
        Vec2::new(config.arena_width, config.arena_height),
    );
    session.0.on_pointer_down(point);
}

/// Digit keys buy the matching catalog slot while the shop is open.
pub fn purchase_input_system(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<ActiveSession>) {
    if !session.0.shop().is_open() {
        return;
    }
    let slots = session.0.catalog().len().min(SLOT_KEYS.len());
    for (idx, (digit, numpad)) in SLOT_KEYS.iter().take(slots).enumerate() {
        if keys.just_pressed(*digit) || keys.just_pressed(*numpad) {
            // Refusals already queue the failure cue inside the session.
            let _ = session.0.on_purchase_request(idx + 1);
        }
    }
}

/// Map a window cursor position (logical pixels, y down) into arena units.
///
/// The camera is unscaled and centred, so the arena sits 1:1 in the middle of
/// the window; a larger window only adds a border around it.  Points outside
/// the drawn arena map outside `0..arena_size`.
pub fn cursor_to_arena(cursor: Vec2, window_size: Vec2, arena_size: Vec2) -> Vec2 {
    // Screen to world, then the inverse of `arena_to_world`.
    let world = Vec2::new(
        cursor.x - window_size.x / 2.0,
        -(cursor.y - window_size.y / 2.0),
    );
    world_to_arena(world, arena_size)
}
