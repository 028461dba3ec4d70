use thiserror::Error;

use crate::board::Point;

/// Reason a placement was refused. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("illegal move: {0:?} is off the board")]
    OffBoard(Point),
    #[error("illegal move: {0:?} is not empty")]
    Occupied(Point),
    #[error("illegal move: suicide at {0:?}")]
    Suicide(Point),
}
