//! Game controller: turn alternation, passes, termination and engine turns.
//!
//! Front ends feed [`Intent`]s to [`Game::handle`] and redraw from
//! [`Game::snapshot`]. When WHITE belongs to the engine, the reply is searched
//! and played inside the same call.

use fastrand::Rng;
use tracing::{debug, info};

use crate::board::{Board, Color, Point, vertex_name};
use crate::config::{ConfigError, GameConfig, Opponent};
use crate::error::IllegalMove;
use crate::mcts::search;
use crate::rules::{self, Prisoners, Score, place_stone};

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BlackToMove,
    WhiteToMove,
    GameOver,
}

/// An action requested by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Place(Point),
    Pass,
    Quit,
}

/// What became of an intent or an engine turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Placed {
        color: Color,
        point: Point,
        captured: u32,
    },
    /// Nothing changed, same side to move.
    Rejected(IllegalMove),
    Passed(Color),
    /// The game was already over.
    Finished,
    Quit,
}

/// Result of [`Game::handle`]: the requested action and, if WHITE is the
/// engine, its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub outcome: Outcome,
    pub reply: Option<Outcome>,
}

/// Read-only view for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub prisoners: Prisoners,
    pub to_move: Color,
    pub phase: Phase,
    pub result: Option<Score>,
}

impl Snapshot<'_> {
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

pub struct Game {
    board: Board,
    prisoners: Prisoners,
    to_move: Color,
    consecutive_passes: u32,
    last_passer: Option<Color>,
    result: Option<Score>,
    iterations: usize,
    opponent: Opponent,
    rng: Rng,
}

impl Game {
    /// Start a game on an empty board, black to move.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_position(config, Board::new(config.board_size), Color::Black))
    }

    /// Start from an existing position.
    ///
    /// When WHITE belongs to the engine and is to move, the engine plays
    /// its turn before this returns.
    ///
    /// # Panics
    ///
    /// Panics if `board` does not match `config.board_size`.
    pub fn with_position(config: &GameConfig, board: Board, to_move: Color) -> Self {
        assert_eq!(
            board.size(),
            config.board_size,
            "board size does not match configuration"
        );
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let mut game = Self {
            board,
            prisoners: Prisoners::default(),
            to_move,
            consecutive_passes: 0,
            last_passer: None,
            result: None,
            iterations: config.iterations,
            opponent: config.opponent,
            rng,
        };
        game.check_end();
        if game.engine_to_move() && !game.is_over() {
            game.engine_move();
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn prisoners(&self) -> Prisoners {
        self.prisoners
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    pub fn last_passer(&self) -> Option<Color> {
        self.last_passer
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            return Phase::GameOver;
        }
        match self.to_move {
            Color::Black => Phase::BlackToMove,
            Color::White => Phase::WhiteToMove,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Final score, once the game is over.
    pub fn result(&self) -> Option<Score> {
        self.result
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            prisoners: self.prisoners,
            to_move: self.to_move,
            phase: self.phase(),
            result: self.result,
        }
    }

    fn engine_to_move(&self) -> bool {
        self.opponent == Opponent::Engine && self.to_move == Color::White
    }

    /// Apply an intent for the side to move, then let the engine answer.
    ///
    /// While the engine owns the turn, a placement or pass makes the engine
    /// move instead; the human's stone is never played for it.
    pub fn handle(&mut self, intent: Intent) -> Step {
        let outcome = match intent {
            Intent::Quit => Outcome::Quit,
            _ if self.engine_to_move() => self.engine_move(),
            Intent::Place(pt) => self.play(pt),
            Intent::Pass => self.pass(),
        };

        let reply = match outcome {
            Outcome::Placed { .. } | Outcome::Passed(_)
                if self.engine_to_move() && !self.is_over() =>
            {
                Some(self.engine_move())
            }
            _ => None,
        };

        Step { outcome, reply }
    }

    /// Place a stone for the side to move.
    pub fn play(&mut self, pt: Point) -> Outcome {
        if self.is_over() {
            return Outcome::Finished;
        }

        let color = self.to_move;
        match place_stone(&mut self.board, pt, color) {
            Ok(placement) => {
                let captured = placement.captures();
                self.prisoners.add(color, captured);
                self.consecutive_passes = 0;
                self.last_passer = None;
                self.to_move = color.opponent();
                debug!(%color, point = %vertex_name(pt), captured, "stone placed");
                self.check_end();
                Outcome::Placed {
                    color,
                    point: pt,
                    captured,
                }
            }
            Err(err) => {
                debug!(%color, %err, "placement rejected");
                Outcome::Rejected(err)
            }
        }
    }

    /// Pass for the side to move.
    pub fn pass(&mut self) -> Outcome {
        if self.is_over() {
            return Outcome::Finished;
        }

        let color = self.to_move;
        self.consecutive_passes += 1;
        self.last_passer = Some(color);
        self.to_move = color.opponent();
        debug!(%color, passes = self.consecutive_passes, "pass");
        self.check_end();
        Outcome::Passed(color)
    }

    /// Search and play a move for the side to move.
    ///
    /// The engine passes when the search finds nothing or its move is
    /// refused.
    pub fn engine_move(&mut self) -> Outcome {
        if self.is_over() {
            return Outcome::Finished;
        }

        match search(&self.board, self.iterations, &mut self.rng) {
            Some(pt) => match self.play(pt) {
                Outcome::Rejected(err) => {
                    debug!(%err, "engine move refused, passing");
                    self.pass()
                }
                outcome => outcome,
            },
            None => self.pass(),
        }
    }

    fn check_end(&mut self) {
        if self.result.is_none()
            && rules::is_game_over(&self.board, &self.prisoners, self.consecutive_passes)
        {
            let score = rules::score(&self.board, &self.prisoners);
            info!(black = score.black, white = score.white, "game over");
            self.result = Some(score);
        }
    }
}
