//! Board, stock and game state.
//!
//! See the crate documentation for the bit layout.

use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::{Color, Move, Pos, Size, NUM_CELLS, NUM_GROUPS};

/// The four size slots of one cell (8 bits, 2 per size).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Cell(pub u8);

impl Cell {
    /// Mask for a single size slot (0=empty, 1=First, 2=Second).
    const LAYER_MASK: u8 = 0b11;

    pub const EMPTY: Cell = Cell(0);

    #[inline]
    fn shift(size: Size) -> u32 {
        (size.value() as u32 - 1) * 2
    }

    /// Owner of the piece in this size slot, if any.
    #[inline]
    pub fn owner(self, size: Size) -> Option<Color> {
        Color::from_bits((self.0 >> Self::shift(size)) & Self::LAYER_MASK)
    }

    /// This cell with `color` recorded in the `size` slot.
    #[inline]
    pub fn with(self, size: Size, color: Color) -> Cell {
        let shift = Self::shift(size);
        Cell((self.0 & !(Self::LAYER_MASK << shift)) | ((color as u8) << shift))
    }

    /// This cell with the `size` slot cleared.
    #[inline]
    pub fn without(self, size: Size) -> Cell {
        Cell(self.0 & !(Self::LAYER_MASK << Self::shift(size)))
    }

    /// The visible piece: the largest occupied size.
    pub fn top(self) -> Option<(Color, Size)> {
        Size::all()
            .rev()
            .find_map(|size| self.owner(size).map(|color| (color, size)))
    }

    /// True if any slot of `size` or larger is occupied.
    #[inline]
    pub fn is_occupied_at_or_above(self, size: Size) -> bool {
        (self.0 >> Self::shift(size)) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Pieces in this cell from the bottom of the stack (smallest) to the top.
    pub fn pieces(self) -> impl Iterator<Item = (Color, Size)> {
        Size::all().filter_map(move |size| self.owner(size).map(|color| (color, size)))
    }
}

/// Compact board - fits in a single u128.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Board(pub u128);

impl Board {
    /// Bits per cell (8 bits = 4 sizes × 2 bits each).
    const CELL_BITS: u32 = 8;
    /// Mask for a single cell.
    const CELL_MASK: u128 = 0xFF;

    /// Create a new empty board.
    #[inline]
    pub fn new() -> Board {
        Board(0)
    }

    /// Get the slots of the cell at the given position.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        Cell(((self.0 >> (pos.0 as u32 * Self::CELL_BITS)) & Self::CELL_MASK) as u8)
    }

    /// Overwrite the cell at the given position.
    #[inline]
    pub fn set_cell(&mut self, pos: Pos, cell: Cell) {
        let shift = pos.0 as u32 * Self::CELL_BITS;
        self.0 = (self.0 & !(Self::CELL_MASK << shift)) | ((cell.0 as u128) << shift);
    }

    /// Get the owner of a specific size piece at a position.
    #[inline]
    pub fn piece_owner(&self, pos: Pos, size: Size) -> Option<Color> {
        self.cell(pos).owner(size)
    }

    /// Get the top (visible) piece at a position.
    #[inline]
    pub fn top_piece(&self, pos: Pos) -> Option<(Color, Size)> {
        self.cell(pos).top()
    }

    /// Color of the visible piece at a position.
    #[inline]
    pub fn visible_piece(&self, pos: Pos) -> Option<Color> {
        self.top_piece(pos).map(|(color, _)| color)
    }

    /// True if a piece of `size` or larger sits at `pos`.
    #[inline]
    pub fn is_occupied_at_or_above(&self, pos: Pos, size: Size) -> bool {
        self.cell(pos).is_occupied_at_or_above(size)
    }

    /// A piece can go on `pos` if nothing of its size or larger is there.
    #[inline]
    pub fn can_place(&self, size: Size, pos: Pos) -> bool {
        !self.is_occupied_at_or_above(pos, size)
    }

    /// Record a piece in its size slot. Does NOT validate.
    #[inline]
    pub fn push_piece(&mut self, pos: Pos, color: Color, size: Size) {
        let cell = self.cell(pos).with(size, color);
        self.set_cell(pos, cell);
    }

    /// Clear a size slot. Does NOT validate.
    #[inline]
    pub fn clear_piece(&mut self, pos: Pos, size: Size) {
        let cell = self.cell(pos).without(size);
        self.set_cell(pos, cell);
    }

    /// Check if a cell has no pieces at all.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cell(pos).is_empty()
    }

    /// True when every cell shows a piece.
    pub fn is_full(&self) -> bool {
        Pos::all().all(|pos| !self.is_empty(pos))
    }

    /// Count a color's pieces on the board, covered ones included.
    pub fn pieces_on_board(&self, color: Color) -> u8 {
        Pos::all()
            .flat_map(|pos| self.cell(pos).pieces())
            .filter(|&(owner, _)| owner == color)
            .count() as u8
    }
}

/// One player's three nested groups, each tracked by its current top size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Stock {
    groups: [u8; NUM_GROUPS],
}

impl Stock {
    /// All three groups untouched.
    pub const FULL: Stock = Stock { groups: [4; NUM_GROUPS] };

    pub fn new() -> Stock {
        Self::FULL
    }

    /// Build a stock from raw group counters (each 0-4).
    pub fn from_groups(groups: [u8; NUM_GROUPS]) -> Option<Stock> {
        groups
            .iter()
            .all(|&g| g <= Size::Large.value())
            .then_some(Stock { groups })
    }

    /// Current top size of each group; 0 means exhausted.
    #[inline]
    pub fn groups(&self) -> [u8; NUM_GROUPS] {
        self.groups
    }

    /// Check if some group has `size` on top.
    #[inline]
    pub fn has(&self, size: Size) -> bool {
        self.groups.contains(&size.value())
    }

    /// Take the top piece of the first group showing `size`.
    pub fn take(&mut self, size: Size) -> Result<(), MoveError> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| **g == size.value())
            .ok_or(MoveError::NoSuchStockPiece(size.value()))?;
        *group -= 1;
        Ok(())
    }

    /// Pieces still off the board (a group at `c` holds sizes `c..=1`).
    pub fn remaining(&self) -> u8 {
        self.groups.iter().sum()
    }
}

impl Default for Stock {
    fn default() -> Self {
        Self::new()
    }
}

/// Board plus both players' stocks. Cheap to copy for lookahead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GameState {
    board: Board,
    stocks: [Stock; 2],
}

impl GameState {
    /// Empty board, full stocks.
    pub fn new() -> GameState {
        GameState {
            board: Board::new(),
            stocks: [Stock::FULL; 2],
        }
    }

    /// Assemble a state from parts, e.g. for a position set up by hand.
    pub fn from_parts(board: Board, first: Stock, second: Stock) -> GameState {
        GameState {
            board,
            stocks: [first, second],
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions. Bypasses every rule.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    pub fn stock(&self, color: Color) -> &Stock {
        &self.stocks[color.index()]
    }

    /// Pieces of `color` on the board plus those still in stock.
    pub fn pieces_accounted(&self, color: Color) -> u8 {
        self.board.pieces_on_board(color) + self.stock(color).remaining()
    }

    /// Apply a move for `player`.
    ///
    /// Re-checks every rule the validator checks, since lookahead calls this
    /// directly on scratch copies. On error the state is unchanged.
    pub fn apply(&mut self, mov: Move, player: Color) -> Result<(), MoveError> {
        match mov {
            Move::Place { size, to } => {
                if !self.stock(player).has(size) {
                    return Err(MoveError::NoSuchStockPiece(size.value()));
                }
                if self.board.piece_owner(to, size).is_some() {
                    return Err(MoveError::SlotOccupied(size.value()));
                }
                if self.board.is_occupied_at_or_above(to, size) {
                    return Err(MoveError::DestinationBlocked(size.value()));
                }

                self.stocks[player.index()].take(size)?;
                self.board.push_piece(to, player, size);
            }
            Move::Relocate { from, to } => {
                let size = match self.board.top_piece(from) {
                    Some((owner, size)) if owner == player => size,
                    _ => return Err(MoveError::NotOwner),
                };

                // Lift first so that from == to is a legal no-op.
                let mut board = self.board;
                board.clear_piece(from, size);
                if board.is_occupied_at_or_above(to, size) {
                    return Err(MoveError::DestinationBlocked(size.value()));
                }
                board.push_piece(to, player, size);
                self.board = board;
            }
        }
        Ok(())
    }
}

const _: () = assert!(NUM_CELLS * 8 == u128::BITS as usize);
