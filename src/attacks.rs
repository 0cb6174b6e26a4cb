use crate::board::Position;
use crate::movegen::{pseudo_legal_moves, GenMode};
use crate::types::*;

/// Is `square` attacked by any piece of color `by`?
///
/// Pawns attack their forward diagonals whether or not anything stands there, so an empty
/// square covered only by a pawn still counts.
pub fn is_attacked(position: &Position, square: Square, by: Color) -> bool {
    position
        .board()
        .pieces_of(by)
        .any(|(from, _)| pseudo_legal_moves(position, from, GenMode::Observed).contains(&square))
}

/// Squares holding pieces of color `by` that attack `square`.
pub fn attackers(position: &Position, square: Square, by: Color) -> Vec<Square> {
    position
        .board()
        .pieces_of(by)
        .filter(|(from, _)| {
            pseudo_legal_moves(position, *from, GenMode::Observed).contains(&square)
        })
        .map(|(from, _)| from)
        .collect()
}

/// Is the king of `color` attacked? A side without a king is never in check.
pub fn in_check(position: &Position, color: Color) -> bool {
    match position.board().find_king(color) {
        Some(king) => is_attacked(position, king, color.other_color()),
        None => false,
    }
}
