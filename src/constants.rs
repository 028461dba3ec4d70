//! Constants for board dimensions, game-end rules and search parameters.
//!
//! The board size is chosen at runtime (see [`crate::config::GameConfig`]);
//! the values here are the defaults and the hard limits around it.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Smallest board on which a group can be surrounded.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board addressable with vertex letters (A..Z without I).
pub const MAX_BOARD_SIZE: usize = 25;

// =============================================================================
// Game-End Rules
// =============================================================================

/// Consecutive passes that end the game.
pub const PASSES_TO_END: u32 = 2;

/// Combined prisoners (both colors) that end the game.
///
/// Not a standard Go rule.
pub const PRISONER_LIMIT: u32 = 10;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of search iterations per engine move.
pub const DEFAULT_ITERATIONS: usize = 1;

/// UCB1 exploration constant, 1/sqrt(2).
pub const EXPLORATION: f64 = std::f64::consts::FRAC_1_SQRT_2;
