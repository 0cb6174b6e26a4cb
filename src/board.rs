use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::*;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The standard initial layout, white to move, all castling rights, no en passant target.
pub static STARTING_POSITION: Lazy<Position> = Lazy::new(|| {
    let mut board = Board::empty();
    for (col, piece_type) in BACK_RANK.into_iter().enumerate() {
        let col = col as u8;
        for color in [Color::White, Color::Black] {
            board.set(Square::at(color.back_row(), col), Some(Piece::new(piece_type, color)));
            board.set(
                Square::at(color.pawn_start_row(), col),
                Some(Piece::new(PieceType::Pawn, color)),
            );
        }
    }
    Position {
        board,
        side_to_move: Color::White,
        castling: CastlingRights::ALL,
        en_passant: None,
    }
});

/// 8x8 grid of optional pieces, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row() as usize][square.col() as usize] = piece;
    }

    /// Move whatever is on `from` to `to`, overwriting the destination.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        let piece = self.piece_at(from);
        self.set(from, None);
        self.set(to, piece);
    }

    /// Occupied squares together with their piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.piece_type == PieceType::King)
            .map(|(sq, _)| sq)
    }
}

/// How `Position::draw_board_with` renders the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawStyle {
    /// Letters instead of chess glyphs
    pub ascii: bool,
    /// Draw from black's side, row 7 at the top
    pub flip: bool,
}

/// A full game position: board, side to move, castling rights and en passant target.
///
/// Positions are values. Applying a move builds a new one and never touches the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl Position {
    pub fn new() -> Position {
        *STARTING_POSITION
    }

    /// No pieces, no castling rights. Use the `with_*` builders to set it up.
    pub fn empty(side_to_move: Color) -> Position {
        Position {
            board: Board::empty(),
            side_to_move,
            castling: CastlingRights::NONE,
            en_passant: None,
        }
    }

    pub fn with_piece(mut self, square: Square, piece: Piece) -> Position {
        self.board.set(square, Some(piece));
        self
    }

    pub fn with_castling(mut self, castling: CastlingRights) -> Position {
        self.castling = castling;
        self
    }

    pub fn with_en_passant(mut self, en_passant: Option<Square>) -> Position {
        self.en_passant = en_passant;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Render the board, one row per line. `marks` replaces empty squares with the given
    /// character; occupied marked squares are wrapped in brackets.
    pub fn draw_board_with(&self, style: DrawStyle, marks: &HashMap<Square, char>) -> String {
        let rows: Vec<u8> = if style.flip {
            (0..8).rev().collect()
        } else {
            (0..8).collect()
        };
        let cols: Vec<u8> = if style.flip {
            (0..8).rev().collect()
        } else {
            (0..8).collect()
        };

        let mut string = String::new();
        for &r in &rows {
            string.push_str(&format!("{} ", 8 - r));
            for &c in &cols {
                let sq = Square::at(r, c);
                let mark = marks.get(&sq);
                let cell = match (self.piece_at(sq), mark) {
                    (Some(p), Some(_)) => format!("[{}]", draw_piece(&p, style)),
                    (Some(p), None) => format!(" {} ", draw_piece(&p, style)),
                    (None, Some(m)) => format!(" {} ", m),
                    (None, None) => " . ".to_string(),
                };
                string.push_str(&cell);
            }
            string.push('\n');
        }
        string.push_str("  ");
        for &c in &cols {
            string.push_str(&format!(" {} ", (b'a' + c) as char));
        }
        string.push('\n');
        string
    }
}

fn draw_piece(piece: &Piece, style: DrawStyle) -> String {
    if style.ascii {
        piece.to_char().to_string()
    } else {
        piece.to_symbol().to_string()
    }
}
