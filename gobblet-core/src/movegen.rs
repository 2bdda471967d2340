//! Lazy legal-move enumeration.
//!
//! Moves come out in a fixed order that the selector relies on for
//! tie-breaking:
//! 1. Placements, stock group 0 → 2, destinations in scan order
//! 2. Relocations, source cells in scan order, destinations in scan order

use crate::board::GameState;
use crate::{Color, Move, Pos, Size, NUM_CELLS, NUM_GROUPS};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Placements,
    Relocations,
    Done,
}

/// Iterator over every legal move for one player.
///
/// Holds its own copy of the state, so a fresh generator over the same state
/// always yields the same sequence.
#[derive(Clone, Debug)]
pub struct MoveGenerator {
    state: GameState,
    player: Color,
    phase: Phase,
    /// Stock group being placed from
    group_idx: usize,
    /// Source cell for relocations
    from_idx: u8,
    /// Next destination to try, shared by both phases
    dest_idx: u8,
    /// Size of the visible piece at `from_idx`, once known to be the player's
    moving_size: Option<Size>,
}

impl MoveGenerator {
    pub fn new(state: &GameState, player: Color) -> MoveGenerator {
        MoveGenerator {
            state: *state,
            player,
            phase: Phase::Placements,
            group_idx: 0,
            from_idx: 0,
            dest_idx: 0,
            moving_size: None,
        }
    }

    fn next_placement(&mut self) -> Option<Move> {
        let groups = self.state.stock(self.player).groups();
        let board = *self.state.board();

        while self.group_idx < NUM_GROUPS {
            // Exhausted groups (0) have no size and yield nothing.
            if let Some(size) = Size::from_value(groups[self.group_idx]) {
                while (self.dest_idx as usize) < NUM_CELLS {
                    let to = Pos(self.dest_idx);
                    self.dest_idx += 1;

                    if board.can_place(size, to) {
                        return Some(Move::Place { size, to });
                    }
                }
            }

            self.group_idx += 1;
            self.dest_idx = 0;
        }
        None
    }

    fn next_relocation(&mut self) -> Option<Move> {
        let board = *self.state.board();

        while (self.from_idx as usize) < NUM_CELLS {
            let from = Pos(self.from_idx);

            if self.moving_size.is_none() {
                match board.top_piece(from) {
                    Some((owner, size)) if owner == self.player => {
                        self.moving_size = Some(size);
                        self.dest_idx = 0;
                    }
                    _ => {
                        self.from_idx += 1;
                        continue;
                    }
                }
            }

            if let Some(size) = self.moving_size {
                while (self.dest_idx as usize) < NUM_CELLS {
                    let to = Pos(self.dest_idx);
                    self.dest_idx += 1;

                    // Same-square relocation is a no-op, never a move.
                    if to != from && board.can_place(size, to) {
                        return Some(Move::Relocate { from, to });
                    }
                }
            }

            self.from_idx += 1;
            self.moving_size = None;
        }
        None
    }
}

impl Iterator for MoveGenerator {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        loop {
            match self.phase {
                Phase::Placements => {
                    if let Some(mov) = self.next_placement() {
                        return Some(mov);
                    }
                    self.phase = Phase::Relocations;
                    self.dest_idx = 0;
                }
                Phase::Relocations => {
                    if let Some(mov) = self.next_relocation() {
                        return Some(mov);
                    }
                    self.phase = Phase::Done;
                }
                Phase::Done => return None,
            }
        }
    }
}
