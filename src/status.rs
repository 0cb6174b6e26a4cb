use crate::attacks::in_check;
use crate::board::Position;
use crate::legality::has_legal_move;
use crate::types::*;

/// Status of the game for the side about to move in `position`.
pub fn evaluate(position: &Position) -> Status {
    let side = position.side_to_move();
    if has_legal_move(position, side) {
        Status::InProgress
    } else if in_check(position, side) {
        Status::Checkmate(side.other_color())
    } else {
        Status::Stalemate
    }
}

/// One line summary for a presentation layer. Has no effect on the game.
pub fn status_text(status: Status, side_to_move: Color, in_check: bool) -> String {
    match status {
        Status::Checkmate(winner) => format!("Checkmate! {} wins!", winner.to_title()),
        Status::Stalemate => "Stalemate! The game is a draw.".to_string(),
        Status::InProgress => format!(
            "{} to move{}",
            side_to_move.to_title(),
            if in_check { " (Check!)" } else { "" }
        ),
    }
}
