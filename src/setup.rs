// ./src/setup.rs
use bevy::prelude::*;

pub const BACKGROUND: Color = Color::rgb(0.06, 0.06, 0.08);

/// 2D-Kamera mit Ursprung in der Fenstermitte; das Overlay rechnet
/// Flächenkoordinaten entsprechend um.
pub fn setup_scene(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}
