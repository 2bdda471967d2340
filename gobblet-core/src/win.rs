//! Line geometry and win detection.

use crate::board::Board;
use crate::{Color, Pos};

/// Four cells in a row, column or diagonal.
pub type Line = [Pos; 4];

/// The 4 rows, bottom (row A) first.
pub const ROWS: [Line; 4] = [
    [Pos(0), Pos(1), Pos(2), Pos(3)],
    [Pos(4), Pos(5), Pos(6), Pos(7)],
    [Pos(8), Pos(9), Pos(10), Pos(11)],
    [Pos(12), Pos(13), Pos(14), Pos(15)],
];

/// The 4 columns, left (column A) first.
pub const COLUMNS: [Line; 4] = [
    [Pos(0), Pos(4), Pos(8), Pos(12)],
    [Pos(1), Pos(5), Pos(9), Pos(13)],
    [Pos(2), Pos(6), Pos(10), Pos(14)],
    [Pos(3), Pos(7), Pos(11), Pos(15)],
];

/// `(col d, row d)` then `(col d, row 3 - d)`.
pub const DIAGONALS: [Line; 2] = [
    [Pos(0), Pos(5), Pos(10), Pos(15)],
    [Pos(12), Pos(9), Pos(6), Pos(3)],
];

/// Signed visible-piece sum and empty-cell count of one line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LineTally {
    pub sum: i32,
    pub empty: u8,
}

impl LineTally {
    /// All four cells show `color`.
    #[inline]
    pub fn is_four(self, color: Color) -> bool {
        self.sum == 4 * color.sign()
    }

    /// Three cells show `color` and the fourth is empty.
    #[inline]
    pub fn is_near_win(self, color: Color) -> bool {
        self.sum == 3 * color.sign() && self.empty == 1
    }
}

impl Board {
    /// Tally the visible pieces on a line: First counts -1, Second +1.
    pub fn tally(&self, line: &Line) -> LineTally {
        line.iter().fold(LineTally::default(), |mut t, &pos| {
            match self.visible_piece(pos) {
                Some(color) => t.sum += color.sign(),
                None => t.empty += 1,
            }
            t
        })
    }
}

/// Find a completed line after `just_moved` played.
///
/// Lifting a piece can uncover a line for the opponent, and that counts
/// against the mover, so each row and column checks the opponent before the
/// mover. Rows are scanned, then columns, then both diagonals together;
/// the first hit wins.
pub fn find_winner(board: &Board, just_moved: Color) -> Option<Color> {
    let opponent = just_moved.opponent();

    for line in ROWS.iter().chain(COLUMNS.iter()) {
        let tally = board.tally(line);
        if tally.is_four(opponent) {
            return Some(opponent);
        } else if tally.is_four(just_moved) {
            return Some(just_moved);
        }
    }

    let diagonals = DIAGONALS.map(|line| board.tally(&line));
    if diagonals.iter().any(|t| t.is_four(opponent)) {
        Some(opponent)
    } else if diagonals.iter().any(|t| t.is_four(just_moved)) {
        Some(just_moved)
    } else {
        None
    }
}
