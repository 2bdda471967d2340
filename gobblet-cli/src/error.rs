use std::io;

use gobblet_core::MoveError;

/// Malformed move tokens, caught before the engine sees them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("expected size 1-4 or 2-character grid co-ordinate")]
    BadSource,

    #[error("expected 2 characters")]
    BadDestination,

    #[error("'{0}' is not a letter")]
    NotALetter(char),
}

/// Anything that ends a session early.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("input closed before the game finished")]
    InputClosed,

    /// A computer move the engine then refused to apply.
    #[error("engine rejected its own move: {0}")]
    Engine(#[from] MoveError),
}
