use bevy::prelude::*;

/// Background colour behind the arena (#1a1a2e).
pub const CLEAR_COLOR: Color = Color::srgb(0.10, 0.10, 0.18);

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel, so the arena
    // fills the window at the default resolution.
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}
