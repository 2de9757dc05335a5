//! Common, shared types.

pub mod clock;
pub mod config;
pub mod layers;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
