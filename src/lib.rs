//! Tengen: a small Go engine with a shallow MCTS opponent.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes, game-end limits and search parameters
//! - [`config`] - Game configuration
//! - [`board`] - Board representation and vertex notation
//! - [`rules`] - Legality, groups, liberties, captures and scoring
//! - [`error`] - The illegal-move error
//! - [`mcts`] - Monte Carlo Tree Search over an arena of nodes
//! - [`playout`] - Random game simulation for leaf evaluation
//! - [`game`] - Turn controller driving human and engine moves
//! - [`console`] - Line-oriented text front end
//!
//! ## Example
//!
//! ```
//! use tengen::config::GameConfig;
//! use tengen::game::{Game, Intent};
//!
//! let config = GameConfig { seed: Some(7), ..GameConfig::default() };
//! let mut game = Game::new(&config).unwrap();
//!
//! // Black plays the center; the engine answers as White
//! let step = game.handle(Intent::Place((4, 4)));
//! println!("{:?} / {:?}", step.outcome, step.reply);
//! println!("{}", game.board());
//! ```

pub mod board;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod mcts;
pub mod playout;
pub mod rules;
