//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub host_speed: f32,
    /// Radians per second.
    pub host_turn_speed: f32,
    pub projectile_pool_capacity: usize,
    /// Arsenal id mounted on the player at spawn.
    pub starting_weapon: String,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            host_speed: 420.0,
            host_turn_speed: 3.5,
            projectile_pool_capacity: 512,
            starting_weapon: "blaster".into(),
        }
    }
}
