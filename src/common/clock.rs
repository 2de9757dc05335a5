//! Simulation clock in milliseconds.
//!
//! Weapons and projectile timers all read the same clock: elapsed virtual time.
//! Hitstop or pause therefore also pauses fire gating and projectile lifetimes.

use bevy::prelude::*;

#[inline]
pub fn elapsed_ms(time: &Time) -> f64 {
    time.elapsed_secs_f64() * 1_000.0
}
