//! Gobblet (4x4) rules engine with a bit-packed board and a one-ply heuristic player.
//!
//! # Board Encoding (128-bit)
//!
//! ```text
//! 16 cells × 8 bits per cell, cell i at bits 8i..8i+8.
//!
//! Each cell (8 bits) - indexed by SIZE, not stack position:
//!   Bits 0-1: size 1 (Tiny) owner   (0=empty, 1=First, 2=Second)
//!   Bits 2-3: size 2 (Small) owner
//!   Bits 4-5: size 3 (Medium) owner
//!   Bits 6-7: size 4 (Large) owner
//!
//! Cell indices (row-major, row A at the bottom of the printed board):
//!   row D: 12 13 14 15
//!   row C:  8  9 10 11
//!   row B:  4  5  6  7
//!   row A:  0  1  2  3
//!           A  B  C  D   <- column
//! ```
//!
//! A piece may only cover a strictly smaller one, so the visible piece of a
//! cell is always the highest occupied size slot, and "is anything of size
//! `s` or larger here" is a single shift of the cell byte.
//!
//! # Stocks
//!
//! Each player holds three nested groups of sizes 4, 3, 2, 1, playable
//! largest first. A group is just its current top size; placing from it
//! decrements the counter, and 0 means the group is spent.

pub mod board;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod validate;
pub mod win;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use board::{Board, Cell, GameState, Stock};
pub use error::{MoveError, ValidationError};
pub use eval::{choose, rank, score, Scored, BIG_SCORE, HUGE_SCORE};
pub use movegen::MoveGenerator;
pub use validate::{validate_destination, validate_source, Source};
pub use win::find_winner;

/// Cells along one side of the board.
pub const BOARD_SIZE: u8 = 4;
/// Total number of cells.
pub const NUM_CELLS: usize = 16;
/// Nested piece groups per player.
pub const NUM_GROUPS: usize = 3;
/// Pieces each player owns for the whole game (3 groups of sizes 4..=1).
pub const PIECES_PER_PLAYER: u8 = 12;

/// Player color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    First = 1,
    Second = 2,
}

impl Color {
    /// Get the opponent color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::First => Color::Second,
            Color::Second => Color::First,
        }
    }

    /// Convert from the 2-bit slot code (1 or 2) to a color.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Color> {
        match bits {
            1 => Some(Color::First),
            2 => Some(Color::Second),
            _ => None,
        }
    }

    /// Contribution of one visible piece to a line sum: First is -1, Second is +1.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Color::First => -1,
            Color::Second => 1,
        }
    }

    /// 0 for First, 1 for Second.
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Player number as shown to people (1 or 2).
    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Piece size, ordered smallest to largest.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Size {
    Tiny = 1,
    Small = 2,
    Medium = 3,
    Large = 4,
}

impl Size {
    /// Convert from the numeric size (1-4).
    #[inline]
    pub fn from_value(value: u8) -> Option<Size> {
        match value {
            1 => Some(Size::Tiny),
            2 => Some(Size::Small),
            3 => Some(Size::Medium),
            4 => Some(Size::Large),
            _ => None,
        }
    }

    /// Numeric size (1-4).
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// All sizes, smallest first.
    pub fn all() -> impl DoubleEndedIterator<Item = Size> {
        [Size::Tiny, Size::Small, Size::Medium, Size::Large].into_iter()
    }
}

/// Position on the 4x4 board (0-15), `row * 4 + col`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from column and row (0-3 each).
    #[inline]
    pub fn from_col_row(col: u8, row: u8) -> Pos {
        debug_assert!(col < BOARD_SIZE && row < BOARD_SIZE);
        Pos(row * BOARD_SIZE + col)
    }

    /// Get the column (0-3).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// Get the row (0-3).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    /// Iterate over all 16 positions in scan order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..NUM_CELLS as u8).map(Pos)
    }
}

/// Column letter then row letter, e.g. `CB` is column C, row B.
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col()) as char, (b'A' + self.row()) as char)
    }
}

/// An unchecked (column, row) pair handed in by the I/O layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub col: u8,
    pub row: u8,
}

impl Coord {
    pub fn new(col: u8, row: u8) -> Coord {
        Coord { col, row }
    }

    /// The board position, or `None` if either axis is outside 0-3.
    #[inline]
    pub fn to_pos(self) -> Option<Pos> {
        if self.col < BOARD_SIZE && self.row < BOARD_SIZE {
            Some(Pos::from_col_row(self.col, self.row))
        } else {
            None
        }
    }
}

impl From<Pos> for Coord {
    fn from(pos: Pos) -> Coord {
        Coord::new(pos.col(), pos.row())
    }
}

/// A move in the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Play the top piece of a stock group onto the board.
    Place { size: Size, to: Pos },
    /// Lift the mover's visible piece at `from` and put it on `to`.
    Relocate { from: Pos, to: Pos },
}

impl Move {
    /// Get the destination position of the move.
    #[inline]
    pub fn to(&self) -> Pos {
        match self {
            Move::Place { to, .. } => *to,
            Move::Relocate { to, .. } => *to,
        }
    }

    #[inline]
    pub fn is_place(&self) -> bool {
        matches!(self, Move::Place { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { size, to } => write!(f, "{} -> {}", size.value(), to),
            Move::Relocate { from, to } => write!(f, "{} -> {}", from, to),
        }
    }
}

/// Where a game stands after a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Status {
    Ongoing,
    Won(Color),
    Draw,
}

// ========== Caller-facing API ==========

/// Empty board, full stocks.
pub fn new_game() -> GameState {
    GameState::new()
}

/// All legal moves for `player`: placements first, then relocations.
pub fn legal_moves(player: Color, state: &GameState) -> Vec<Move> {
    MoveGenerator::new(state, player).collect()
}

/// Check a source token and destination and build the move they describe.
pub fn validate_and_build_move(
    player: Color,
    source: Source,
    dest: Coord,
    state: &GameState,
) -> Result<Move, ValidationError> {
    validate::build_move(state, player, source, dest)
}

/// Apply `mov` for `player`, returning the successor state.
///
/// The input state is never touched; on error nothing changes.
pub fn apply_move(state: &GameState, player: Color, mov: Move) -> Result<GameState, MoveError> {
    let mut next = *state;
    next.apply(mov, player)?;
    Ok(next)
}

/// Winner after `just_moved` played, checking the opponent's lines first.
pub fn winner(state: &GameState, just_moved: Color) -> Option<Color> {
    find_winner(state.board(), just_moved)
}

/// True when every cell shows a piece.
pub fn is_full(state: &GameState) -> bool {
    state.board().is_full()
}

/// Game status after `just_moved` played.
///
/// A full board, or a next player with no legal move, is a draw.
pub fn status(state: &GameState, just_moved: Color) -> Status {
    if let Some(color) = winner(state, just_moved) {
        Status::Won(color)
    } else if is_full(state) || MoveGenerator::new(state, just_moved.opponent()).next().is_none() {
        Status::Draw
    } else {
        Status::Ongoing
    }
}

/// Pick a move for a computer player with a one-ply lookahead.
///
/// Returns `Ok(None)` when `player` has no legal move.
pub fn choose_ai_move<R: Rng + ?Sized>(
    player: Color,
    state: &GameState,
    rng: &mut R,
) -> Result<Option<Move>, MoveError> {
    let moves = legal_moves(player, state);
    choose(player, state, &moves, rng)
}
