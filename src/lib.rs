pub mod errors;
pub mod types;
pub mod board;
pub mod movegen;
pub mod attacks;
pub mod legality;
pub mod executor;
pub mod status;
pub mod game;
pub mod perft;

#[cfg(test)]
mod test_utils;

pub use board::Position;
pub use errors::{ChessError, Result};
pub use game::{GameController, GameRecord, GameState, Selection, Transition};
pub use types::{Color, Move, MoveFlag, Piece, PieceType, Square, Status};
