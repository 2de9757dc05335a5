//! Global state machine.

use bevy::prelude::*;

/// The weapon shutdown event is delivered on `OnExit(InGame)`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    GameOver,
}
