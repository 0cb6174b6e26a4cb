use tracing::debug;

use crate::board::Position;
use crate::errors::{ChessError, Result};
use crate::legality::{is_en_passant_capture, legal_moves};
use crate::types::*;

impl Move {
    /// Fully describe moving the piece on `from` to `to`: captured piece and move flag.
    /// Does not check legality, `apply` does.
    pub fn infer(position: &Position, from: Square, to: Square) -> Result<Move> {
        let piece = position
            .piece_at(from)
            .ok_or(ChessError::EmptySquare(from))?;
        Ok(Move::describe(position, from, piece, to))
    }

    pub(crate) fn describe(position: &Position, from: Square, piece: Piece, to: Square) -> Move {
        let mut captured = position.piece_at(to);
        let col_delta = to.col() as i8 - from.col() as i8;
        let row_delta = to.row() as i8 - from.row() as i8;

        let move_flag = match piece.piece_type {
            PieceType::King if col_delta == 2 => MoveFlag::CastleKingside,
            PieceType::King if col_delta == -2 => MoveFlag::CastleQueenside,
            PieceType::Pawn if row_delta.abs() == 2 => {
                MoveFlag::DoublePawnPush(Square::at((from.row() + to.row()) / 2, from.col()))
            }
            PieceType::Pawn if to.row() == piece.color.promotion_row() => {
                MoveFlag::Promotion(PieceType::Queen)
            }
            PieceType::Pawn if is_en_passant_capture(position, from, to, piece) => {
                captured = position.piece_at(Square::at(from.row(), to.col()));
                MoveFlag::EnPassantCapture
            }
            _ => MoveFlag::Regular,
        };

        Move {
            piece,
            from,
            to,
            captured,
            move_flag,
        }
    }
}

/// Apply `selected_move` to `position`, returning the position after it.
///
/// The move must be legal: its piece must belong to the side to move, its destination must be
/// among `legal_moves(position, from)`, and it must equal what `Move::infer` describes for
/// `from` and `to` (piece, captured piece, flag). Anything else is a caller error.
pub fn apply(position: &Position, selected_move: &Move) -> Result<Position> {
    let from = selected_move.from;
    let to = selected_move.to;
    let piece = position
        .piece_at(from)
        .ok_or(ChessError::EmptySquare(from))?;
    if piece.color != position.side_to_move()
        || !legal_moves(position, from).contains(&to)
        || *selected_move != Move::describe(position, from, piece, to)
    {
        return Err(ChessError::IllegalMove { from, to });
    }

    let next = execute_move(position, selected_move);
    debug!(%selected_move, side_to_move = %next.side_to_move(), "applied move");
    Ok(next)
}

/// Produce the next position without any legality check. Effects are derived from the piece
/// type and geometry of the move.
pub(crate) fn execute_move(position: &Position, selected_move: &Move) -> Position {
    let from = selected_move.from;
    let to = selected_move.to;
    let piece = selected_move.piece;
    let color = piece.color;

    let mut board = position.board;
    let mut castling = position.castling;
    let mut en_passant = None;

    // a capture on the opponent's rook corner takes that rook's right with it
    if let Some(side) = CastleSide::from_rook_home(to, color.other_color()) {
        castling.revoke(color.other_color(), side);
    }

    match piece.piece_type {
        PieceType::King => {
            if selected_move.move_flag.is_castle() {
                let side = if selected_move.move_flag == MoveFlag::CastleKingside {
                    CastleSide::Kingside
                } else {
                    CastleSide::Queenside
                };
                board.relocate(
                    Square::at(from.row(), side.rook_home_col()),
                    Square::at(from.row(), side.rook_target_col()),
                );
            }
            castling.revoke_all(color);
        }
        PieceType::Rook => {
            if let Some(side) = CastleSide::from_rook_home(from, color) {
                castling.revoke(color, side);
            }
        }
        PieceType::Pawn => {
            if (to.row() as i8 - from.row() as i8).abs() == 2 {
                en_passant = Some(Square::at((from.row() + to.row()) / 2, from.col()));
            }
            if is_en_passant_capture(position, from, to, piece) {
                // the passed pawn sits beside us, one row behind the destination
                board.set(Square::at(from.row(), to.col()), None);
            }
        }
        _ => {}
    }

    board.relocate(from, to);
    if piece.piece_type == PieceType::Pawn && to.row() == color.promotion_row() {
        board.set(to, Some(Piece::new(PieceType::Queen, color)));
    }

    Position {
        board,
        side_to_move: color.other_color(),
        castling,
        en_passant,
    }
}
