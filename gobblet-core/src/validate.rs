//! Checks on caller-supplied move tokens.
//!
//! These give friendlier errors than [`GameState::apply`] and run before
//! anything is mutated. Coordinates arrive unchecked, so out-of-range axes
//! are reported here rather than by the I/O layer.

use serde::{Deserialize, Serialize};

use crate::board::{Board, GameState};
use crate::error::ValidationError;
use crate::{Color, Coord, Move, Pos, Size};

/// What the mover wants to play: a stock size or a board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Numeric size of a stock group's top piece.
    Stock(u8),
    /// Cell holding one of the mover's visible pieces.
    Board(Coord),
}

/// Resolve a source token to the size of the piece that would move.
pub fn validate_source(
    state: &GameState,
    player: Color,
    source: Source,
) -> Result<Size, ValidationError> {
    match source {
        Source::Stock(value) => {
            let size = Size::from_value(value).ok_or(ValidationError::SizeOutOfRange(value))?;
            if state.stock(player).has(size) {
                Ok(size)
            } else {
                Err(ValidationError::NoAvailablePiece(value))
            }
        }
        Source::Board(coord) => {
            let pos = coord.to_pos().ok_or(ValidationError::CoordinateOutOfRange)?;
            match state.board().top_piece(pos) {
                Some((owner, size)) if owner == player => Ok(size),
                _ => Err(ValidationError::NotYourPiece),
            }
        }
    }
}

/// Check that a piece of `size` may land on `dest`.
///
/// Equal size blocks as well: nothing is ever placed directly on a piece of
/// its own size.
pub fn validate_destination(
    board: &Board,
    size: Size,
    dest: Coord,
) -> Result<Pos, ValidationError> {
    let pos = dest.to_pos().ok_or(ValidationError::CoordinateOutOfRange)?;
    if board.can_place(size, pos) {
        Ok(pos)
    } else {
        Err(ValidationError::DestinationBlocked)
    }
}

/// Validate both halves and build the move.
pub fn build_move(
    state: &GameState,
    player: Color,
    source: Source,
    dest: Coord,
) -> Result<Move, ValidationError> {
    let size = validate_source(state, player, source)?;
    let to = validate_destination(state.board(), size, dest)?;
    Ok(match source {
        Source::Stock(_) => Move::Place { size, to },
        Source::Board(coord) => Move::Relocate {
            from: Pos::from_col_row(coord.col, coord.row),
            to,
        },
    })
}
