//! Feature plugins.
//!
//! Order matters: `core` inserts the config every later plugin reads at build
//! time, and `visuals` must exist before anything mounts a weapon.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod core;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod visuals;
pub mod weapons;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    visuals::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    weapons::plugin(app);
    world::plugin(app);
    player::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
