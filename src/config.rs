//! Game configuration.

use thiserror::Error;

use crate::constants::{DEFAULT_BOARD_SIZE, DEFAULT_ITERATIONS, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Who controls WHITE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Opponent {
    /// WHITE is played by the search engine.
    #[default]
    Engine,
    /// Both colors are entered by hand.
    Human,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "unacceptable board size {0}, expected {min}..={max}",
        min = MIN_BOARD_SIZE,
        max = MAX_BOARD_SIZE
    )]
    BoardSize(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    /// Search iterations per engine move
    pub iterations: usize,
    /// Playout seed; `None` seeds from the system
    pub seed: Option<u64>,
    pub opponent: Opponent,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            opponent: Opponent::Engine,
        }
    }
}

impl GameConfig {
    /// Hot-seat game on a board of `size`.
    pub fn two_player(size: usize) -> Self {
        Self {
            board_size: size,
            opponent: Opponent::Human,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        Ok(())
    }
}
