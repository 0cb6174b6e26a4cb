//! Errors for contract violations. Illegal user input (clicking an empty square, moving to an
//! unreachable one) is not an error; the controller rejects it silently.

use thiserror::Error;

use crate::types::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("square ({row}, {col}) is off the board")]
    SquareOutOfRange { row: u8, col: u8 },

    #[error("`{0}` is not a square name, expected a file a-h and a rank 1-8")]
    InvalidSquareName(String),

    #[error("there is no piece on {0}")]
    EmptySquare(Square),

    #[error("{from}-{to} is not a legal move in this position")]
    IllegalMove { from: Square, to: Square },
}

pub type Result<T> = std::result::Result<T, ChessError>;
