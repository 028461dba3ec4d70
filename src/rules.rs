//! Rules engine: legality, groups, liberties, captures and scoring.
//!
//! Groups are recomputed from the board every time they are needed; nothing
//! here caches derived data across a mutation.

use std::collections::BTreeSet;

use tracing::trace;

use crate::board::{Board, Color, Point};
use crate::constants::{PASSES_TO_END, PRISONER_LIMIT};
use crate::error::IllegalMove;

/// A maximal 4-connected set of same-colored stones.
pub type Group = BTreeSet<Point>;

/// Captured-stone counts, keyed by the capturing color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prisoners {
    pub black: u32,
    pub white: u32,
}

impl Prisoners {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    pub fn add(&mut self, color: Color, n: u32) {
        match color {
            Color::Black => self.black += n,
            Color::White => self.white += n,
        }
    }

    pub fn total(&self) -> u32 {
        self.black + self.white
    }
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// Opponent stones removed by the move.
    pub captured: Vec<Point>,
}

impl Placement {
    pub fn captures(&self) -> u32 {
        self.captured.len() as u32
    }
}

/// Final tally: territory plus prisoners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    /// `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// In bounds and empty. Suicide is only detected by [`place_stone`].
pub fn is_valid_move(board: &Board, pt: Point) -> bool {
    board.is_empty_at(pt)
}

/// All valid moves, column by column.
pub fn legal_moves(board: &Board) -> Vec<Point> {
    board.points().filter(|&pt| is_valid_move(board, pt)).collect()
}

pub fn has_valid_moves(board: &Board) -> bool {
    board.points().any(|pt| is_valid_move(board, pt))
}

/// Flood-fill the group containing the stone at `pt`.
fn collect_group(board: &Board, pt: Point, color: Color, visited: &mut [bool]) -> Group {
    let size = board.size();
    let mut group = Group::new();
    let mut stack = vec![pt];
    while let Some(cur) = stack.pop() {
        let i = cur.1 * size + cur.0;
        if visited[i] {
            continue;
        }
        visited[i] = true;
        group.insert(cur);
        for n in board.neighbors(cur) {
            if !visited[n.1 * size + n.0] && board.get(n) == Some(color) {
                stack.push(n);
            }
        }
    }
    group
}

/// Every maximal group of `color`.
pub fn get_stone_groups(board: &Board, color: Color) -> Vec<Group> {
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut groups = Vec::new();
    for pt in board.points() {
        if board.get(pt) == Some(color) && !visited[pt.1 * size + pt.0] {
            groups.push(collect_group(board, pt, color, &mut visited));
        }
    }
    groups
}

/// The group containing the stone at `pt`, if any.
pub fn group_at(board: &Board, pt: Point) -> Option<Group> {
    let color = board.get(pt)?;
    let size = board.size();
    let mut visited = vec![false; size * size];
    Some(collect_group(board, pt, color, &mut visited))
}

/// Empty points adjacent to any stone of `group`.
pub fn liberties(board: &Board, group: &Group) -> BTreeSet<Point> {
    group
        .iter()
        .flat_map(|&pt| board.neighbors(pt))
        .filter(|&n| board.get(n).is_none())
        .collect()
}

pub fn has_no_liberties(board: &Board, group: &Group) -> bool {
    !group
        .iter()
        .flat_map(|&pt| board.neighbors(pt))
        .any(|n| board.get(n).is_none())
}

/// Play `color` at `pt`, resolving captures.
///
/// The stone goes down first; every opponent group left without liberties
/// is removed. Only when nothing was captured is the placer's own group
/// checked, and a move leaving it without liberties is undone.
pub fn place_stone(board: &mut Board, pt: Point, color: Color) -> Result<Placement, IllegalMove> {
    if !board.contains(pt) {
        return Err(IllegalMove::OffBoard(pt));
    }
    if !is_valid_move(board, pt) {
        return Err(IllegalMove::Occupied(pt));
    }
    board.set(pt, Some(color));

    let mut captured = Vec::new();
    for group in get_stone_groups(board, color.opponent()) {
        if has_no_liberties(board, &group) {
            trace!(?pt, size = group.len(), "capturing group");
            for &stone in &group {
                board.set(stone, None);
            }
            captured.extend(group);
        }
    }

    if captured.is_empty() {
        let suicide = group_at(board, pt).is_some_and(|own| has_no_liberties(board, &own));
        if suicide {
            board.set(pt, None);
            return Err(IllegalMove::Suicide(pt));
        }
    }

    Ok(Placement { captured })
}

/// Territory plus prisoners for both colors.
///
/// An empty point is territory when all of its stone neighbors share one
/// color. There is no dead-stone removal.
pub fn score(board: &Board, prisoners: &Prisoners) -> Score {
    let mut black = 0;
    let mut white = 0;

    for pt in board.points() {
        if board.get(pt).is_some() {
            continue;
        }
        let mut seen_black = false;
        let mut seen_white = false;
        for n in board.neighbors(pt) {
            match board.get(n) {
                Some(Color::Black) => seen_black = true,
                Some(Color::White) => seen_white = true,
                None => {}
            }
        }
        match (seen_black, seen_white) {
            (true, false) => black += 1,
            (false, true) => white += 1,
            _ => {}
        }
    }

    Score {
        black: black + prisoners.black,
        white: white + prisoners.white,
    }
}

/// Two consecutive passes, a full board, or the prisoner limit.
pub fn is_game_over(board: &Board, prisoners: &Prisoners, consecutive_passes: u32) -> bool {
    consecutive_passes >= PASSES_TO_END
        || !has_valid_moves(board)
        || prisoners.total() >= PRISONER_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, black: &[Point], white: &[Point]) -> Board {
        let mut board = Board::new(size);
        for &pt in black {
            board.set(pt, Some(Color::Black));
        }
        for &pt in white {
            board.set(pt, Some(Color::White));
        }
        board
    }

    #[test]
    fn test_is_valid_move() {
        let board = board_with(9, &[(4, 4)], &[]);
        assert!(is_valid_move(&board, (0, 0)));
        assert!(!is_valid_move(&board, (4, 4)));
        assert!(!is_valid_move(&board, (9, 0)));
    }

    #[test]
    fn test_groups_split_by_gap() {
        let board = board_with(9, &[(0, 0), (0, 1), (2, 0), (3, 0)], &[(1, 0)]);
        let groups = get_stone_groups(&board, Color::Black);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().any(|g| g.len() == 2 && g.contains(&(0, 1))));
        assert!(groups.iter().any(|g| g.len() == 2 && g.contains(&(3, 0))));
        assert_eq!(get_stone_groups(&board, Color::White).len(), 1);
    }

    #[test]
    fn test_diagonal_stones_are_separate() {
        let board = board_with(5, &[(1, 1), (2, 2)], &[]);
        assert_eq!(get_stone_groups(&board, Color::Black).len(), 2);
    }

    #[test]
    fn test_liberties_of_single_stone() {
        let board = board_with(9, &[(4, 4)], &[]);
        let group = group_at(&board, (4, 4)).unwrap();
        assert_eq!(liberties(&board, &group).len(), 4);

        let corner = board_with(9, &[(0, 0)], &[(1, 0)]);
        let group = group_at(&corner, (0, 0)).unwrap();
        assert_eq!(liberties(&corner, &group), BTreeSet::from([(0, 1)]));
        assert!(!has_no_liberties(&corner, &group));
    }

    #[test]
    fn test_has_no_liberties() {
        let board = board_with(9, &[(1, 0), (0, 1)], &[(0, 0)]);
        let group = group_at(&board, (0, 0)).unwrap();
        assert!(has_no_liberties(&board, &group));
    }

    #[test]
    fn test_place_center_stone() {
        let mut board = Board::new(9);
        let placement = place_stone(&mut board, (4, 4), Color::Black).unwrap();
        assert!(placement.captured.is_empty());
        assert_eq!(board.get((4, 4)), Some(Color::Black));
    }

    #[test]
    fn test_place_occupied_and_off_board() {
        let mut board = board_with(9, &[(4, 4)], &[]);
        let before = board.clone();
        assert_eq!(
            place_stone(&mut board, (4, 4), Color::White),
            Err(IllegalMove::Occupied((4, 4)))
        );
        assert_eq!(
            place_stone(&mut board, (9, 3), Color::White),
            Err(IllegalMove::OffBoard((9, 3)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_single_stone() {
        let mut board = board_with(9, &[(3, 4), (5, 4), (4, 3)], &[(4, 4)]);
        let placement = place_stone(&mut board, (4, 5), Color::Black).unwrap();
        assert_eq!(placement.captured, vec![(4, 4)]);
        assert_eq!(board.get((4, 4)), None);
    }

    #[test]
    fn test_capture_group_on_edge() {
        // White (0,0)-(1,0) boxed in by black (2,0), (0,1); last liberty (1,1)
        let mut board = board_with(9, &[(2, 0), (0, 1)], &[(0, 0), (1, 0)]);
        let placement = place_stone(&mut board, (1, 1), Color::Black).unwrap();
        assert_eq!(placement.captures(), 2);
        assert_eq!(board.get((0, 0)), None);
        assert_eq!(board.get((1, 0)), None);
    }

    #[test]
    fn test_suicide_is_reverted() {
        let mut board = board_with(9, &[(1, 0), (0, 1)], &[]);
        let before = board.clone();
        assert_eq!(
            place_stone(&mut board, (0, 0), Color::White),
            Err(IllegalMove::Suicide((0, 0)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_overrides_suicide() {
        // Black (0,0) is in atari; white fills (0,1) which has no liberties of
        // its own but captures first.
        let mut board = board_with(5, &[(0, 0), (1, 1), (0, 2)], &[(1, 0)]);
        let placement = place_stone(&mut board, (0, 1), Color::White).unwrap();
        assert_eq!(placement.captured, vec![(0, 0)]);
        assert_eq!(board.get((0, 1)), Some(Color::White));
    }

    #[test]
    fn test_territory_single_color() {
        let board = board_with(3, &[(1, 0), (1, 1), (1, 2)], &[]);
        // Columns 0 and 2 border only black.
        let s = score(&board, &Prisoners::default());
        assert_eq!(s, Score { black: 6, white: 0 });
        assert_eq!(s.winner(), Some(Color::Black));
    }

    #[test]
    fn test_territory_mixed_counts_for_nobody() {
        let board = board_with(3, &[(0, 0)], &[(2, 0)]);
        let s = score(&board, &Prisoners::default());
        // (1,0) touches both; (0,1) black only; (2,1) white only.
        assert_eq!(s, Score { black: 1, white: 1 });
        assert_eq!(s.winner(), None);
    }

    #[test]
    fn test_score_adds_prisoners() {
        let board = Board::new(3);
        let prisoners = Prisoners { black: 3, white: 1 };
        assert_eq!(score(&board, &prisoners), Score { black: 3, white: 1 });
    }

    #[test]
    fn test_is_game_over() {
        let board = Board::new(3);
        assert!(!is_game_over(&board, &Prisoners::default(), 1));
        assert!(is_game_over(&board, &Prisoners::default(), 2));
        assert!(is_game_over(&board, &Prisoners { black: 6, white: 4 }, 0));

        let mut full = Board::new(2);
        for pt in full.points().collect::<Vec<_>>() {
            full.set(pt, Some(Color::Black));
        }
        assert!(is_game_over(&full, &Prisoners::default(), 0));
    }
}
