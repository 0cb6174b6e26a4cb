use crate::attacks::in_check;
use crate::board::Position;
use crate::movegen::{pseudo_legal_moves, GenMode};
use crate::types::*;

/// Legal destinations for the piece on `square`: its pseudo legal moves minus those that
/// leave its own king attacked. Empty when the square is empty.
pub fn legal_moves(position: &Position, square: Square) -> Vec<Square> {
    let Some(piece) = position.piece_at(square) else {
        return vec![];
    };
    pseudo_legal_moves(position, square, GenMode::Legal)
        .into_iter()
        .filter(|&to| leaves_king_safe(position, square, to, piece))
        .collect()
}

/// Every legal move available to `color`.
pub fn all_legal_moves(position: &Position, color: Color) -> Vec<Move> {
    position
        .board()
        .pieces_of(color)
        .flat_map(|(from, piece)| {
            legal_moves(position, from)
                .into_iter()
                .map(move |to| Move::describe(position, from, piece, to))
        })
        .collect()
}

/// Short circuiting version of `!all_legal_moves(..).is_empty()`.
pub fn has_legal_move(position: &Position, color: Color) -> bool {
    position
        .board()
        .pieces_of(color)
        .any(|(from, _)| !legal_moves(position, from).is_empty())
}

// Simulate the occupancy change on a scratch copy and look at the mover's king. Castling rook
// moves and promotion don't change whether the king is attacked, the en passant victim does.
fn leaves_king_safe(position: &Position, from: Square, to: Square, piece: Piece) -> bool {
    let mut scratch = *position;
    if is_en_passant_capture(position, from, to, piece) {
        scratch.board.set(Square::at(from.row(), to.col()), None);
    }
    scratch.board.relocate(from, to);
    !in_check(&scratch, piece.color)
}

pub(crate) fn is_en_passant_capture(
    position: &Position,
    from: Square,
    to: Square,
    piece: Piece,
) -> bool {
    piece.piece_type == PieceType::Pawn
        && position.en_passant() == Some(to)
        && from.col() != to.col()
}
