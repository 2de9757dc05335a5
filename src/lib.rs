//! Library entry point.
//!
//! `weapons` is the engine-agnostic weapon/projectile core; `plugins` adapts
//! it to Bevy + avian2d. Integration tests in `tests/` import from here.

pub mod common;
pub mod game;
pub mod plugins;
pub mod weapons;
