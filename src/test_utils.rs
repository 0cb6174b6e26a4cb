use crate::board::Position;
use crate::types::*;

/// Build a position from an 8 line diagram, row 0 first. Uppercase letters are white pieces,
/// lowercase black, `.` empty. Whitespace between cells is ignored. No castling rights and no
/// en passant target are set.
pub fn position_from_diagram(diagram: &str, side_to_move: Color) -> Position {
    let rows: Vec<Vec<char>> = diagram
        .lines()
        .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<char>>())
        .filter(|cells| !cells.is_empty())
        .collect();
    assert_eq!(rows.len(), 8, "diagram must have 8 rows");

    let mut position = Position::empty(side_to_move);
    for (row, cells) in rows.iter().enumerate() {
        assert_eq!(cells.len(), 8, "diagram row {row} must have 8 cells");
        for (col, &c) in cells.iter().enumerate() {
            if c == '.' {
                continue;
            }
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let piece_type = match c.to_ascii_lowercase() {
                'p' => PieceType::Pawn,
                'n' => PieceType::Knight,
                'b' => PieceType::Bishop,
                'r' => PieceType::Rook,
                'q' => PieceType::Queen,
                'k' => PieceType::King,
                other => panic!("Unrecognized piece type {other}."),
            };
            position = position.with_piece(
                Square::at(row as u8, col as u8),
                Piece::new(piece_type, color),
            );
        }
    }
    position
}

pub fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
    squares.sort();
    squares
}
