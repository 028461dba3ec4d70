//! Random playouts for evaluating search-tree leaves.
//!
//! A playout fills the board with uniformly random stones, alternating
//! colors, without resolving captures. The result is decided purely by stone
//! count, so it measures occupancy rather than territory.

use fastrand::Rng;

use crate::board::{Board, Color};
use crate::rules::legal_moves;

/// Black-favourable playout result.
pub const BLACK_WINS: i32 = 1;
pub const WHITE_WINS: i32 = -1;
pub const DRAW: i32 = 0;

/// Play random stones on `board` until no empty point is left.
///
/// `is_max` is the side to move first: `true` places WHITE, `false` BLACK.
/// Returns the [`result`] of the filled board.
pub fn simulate(board: &mut Board, mut is_max: bool, rng: &mut Rng) -> i32 {
    loop {
        let moves = legal_moves(board);
        if moves.is_empty() {
            break;
        }
        let pt = moves[rng.usize(..moves.len())];
        board.set(pt, Some(if is_max { Color::White } else { Color::Black }));
        is_max = !is_max;
    }

    result(board)
}

/// [`BLACK_WINS`] when black has more stones, [`WHITE_WINS`] when white has,
/// [`DRAW`] otherwise.
pub fn result(board: &Board) -> i32 {
    let black = board.count(Color::Black);
    let white = board.count(Color::White);

    match black.cmp(&white) {
        std::cmp::Ordering::Greater => BLACK_WINS,
        std::cmp::Ordering::Less => WHITE_WINS,
        std::cmp::Ordering::Equal => DRAW,
    }
}
