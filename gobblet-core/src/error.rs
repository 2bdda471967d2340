//! Error types returned by the engine.
//!
//! Nothing here is fatal: callers either re-prompt (interactive play) or
//! treat the error as a bug in whatever produced the move (search).

/// Rejections raised by [`GameState::apply`](crate::GameState::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no stock group has a size {0} piece on top")]
    NoSuchStockPiece(u8),

    #[error("destination already holds a size {0} piece")]
    SlotOccupied(u8),

    #[error("destination holds a piece of size {0} or larger")]
    DestinationBlocked(u8),

    #[error("the visible piece at the source does not belong to the mover")]
    NotOwner,
}

/// Rejections raised while turning caller tokens into a [`Move`](crate::Move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("piece size must be 1-4, got {0}")]
    SizeOutOfRange(u8),

    #[error("no stock group has a size {0} piece available")]
    NoAvailablePiece(u8),

    #[error("coordinates must be A-D")]
    CoordinateOutOfRange,

    #[error("you do not have a piece at that location")]
    NotYourPiece,

    #[error("destination contains a piece of the same size or larger")]
    DestinationBlocked,
}
