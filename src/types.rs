use std::fmt;

use itertools::iproduct;

use crate::errors::{ChessError, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn to_title(&self) -> &str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }

    /// Row holding this side's king and rooks at the start
    pub fn back_row(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// Starting row for pawns of this color
    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Row on which this side's pawns promote
    pub fn promotion_row(&self) -> u8 {
        self.other_color().back_row()
    }

    /// Row delta of a pawn step for this color. White starts on row 6 and walks towards row 0.
    pub fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_human())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// A board coordinate. Row 0 is black's back rank, row 7 is white's.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Checked constructor, the only way to build a square from runtime input.
    pub fn new(row: u8, col: u8) -> Result<Square> {
        if row < 8 && col < 8 {
            Ok(Square { row, col })
        } else {
            Err(ChessError::SquareOutOfRange { row, col })
        }
    }

    /// Constructor for literals. Panics when off the board.
    pub const fn at(row: u8, col: u8) -> Square {
        assert!(row < 8 && col < 8, "square off the board");
        Square { row, col }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// The square `(d_row, d_col)` away, if it is still on the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// All 64 squares, row by row starting from row 0.
    pub fn all() -> impl Iterator<Item = Square> {
        iproduct!(0..8u8, 0..8u8).map(|(row, col)| Square { row, col })
    }

    /// File letter and rank digit, eg `e4` for `(4, 4)`.
    pub fn name(&self) -> String {
        format!(
            "{}{}",
            (b'a' + self.col) as char,
            (b'0' + 8 - self.row) as char
        )
    }

    pub fn from_name(s: &str) -> Result<Square> {
        let invalid = || ChessError::InvalidSquareName(s.to_string());
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Square::new(8 - (rank - b'0'), file - b'a')
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece { piece_type, color }
    }

    pub fn to_symbol(&self) -> &str {
        let is_white = self.color == Color::White;
        match (self.piece_type, is_white) {
            (PieceType::Pawn, true) => "♙",
            (PieceType::Pawn, false) => "♟",
            (PieceType::Rook, true) => "♖",
            (PieceType::Rook, false) => "♜",
            (PieceType::Knight, true) => "♘",
            (PieceType::Knight, false) => "♞",
            (PieceType::Bishop, true) => "♗",
            (PieceType::Bishop, false) => "♝",
            (PieceType::Queen, true) => "♕",
            (PieceType::Queen, false) => "♛",
            (PieceType::King, true) => "♔",
            (PieceType::King, false) => "♚",
        }
    }

    /// Uppercase letter for white, lowercase for black
    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color.to_human(), self.piece_type.to_human())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub fn rook_home_col(&self) -> u8 {
        match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        }
    }

    pub fn king_target_col(&self) -> u8 {
        match self {
            Self::Kingside => 6,
            Self::Queenside => 2,
        }
    }

    pub fn rook_target_col(&self) -> u8 {
        match self {
            Self::Kingside => 5,
            Self::Queenside => 3,
        }
    }

    /// Columns between king and rook, all of which must be empty
    pub fn between_cols(&self) -> &'static [u8] {
        match self {
            Self::Kingside => &[5, 6],
            Self::Queenside => &[1, 2, 3],
        }
    }

    /// Columns the king crosses or lands on, none of which may be attacked
    pub fn king_path_cols(&self) -> &'static [u8] {
        match self {
            Self::Kingside => &[5, 6],
            Self::Queenside => &[3, 2],
        }
    }

    /// The side whose rook starts on `square` for `color`, if any.
    pub fn from_rook_home(square: Square, color: Color) -> Option<CastleSide> {
        if square.row() != color.back_row() {
            return None;
        }
        CastleSide::ALL
            .into_iter()
            .find(|side| side.rook_home_col() == square.col())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SideRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl SideRights {
    pub fn allows(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside,
            CastleSide::Queenside => self.queenside,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CastlingRights {
    pub white: SideRights,
    pub black: SideRights,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white: SideRights {
            kingside: true,
            queenside: true,
        },
        black: SideRights {
            kingside: true,
            queenside: true,
        },
    };

    pub const NONE: CastlingRights = CastlingRights {
        white: SideRights {
            kingside: false,
            queenside: false,
        },
        black: SideRights {
            kingside: false,
            queenside: false,
        },
    };

    pub fn for_color(&self, color: Color) -> SideRights {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn for_color_mut(&mut self, color: Color) -> &mut SideRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        self.for_color(color).allows(side)
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        let rights = self.for_color_mut(color);
        match side {
            CastleSide::Kingside => rights.kingside = false,
            CastleSide::Queenside => rights.queenside = false,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        *self.for_color_mut(color) = SideRights {
            kingside: false,
            queenside: false,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    /// Contains the winner
    Checkmate(Color),
    Stalemate,
}

impl Status {
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFlag {
    Regular,
    CastleKingside,
    CastleQueenside,
    /// Pawn promotion. Contains the piece promoted to
    Promotion(PieceType),
    /// Double pawn push at first pawn move. Contains the en passant square
    DoublePawnPush(Square),
    EnPassantCapture,
}

impl MoveFlag {
    pub fn is_castle(&self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// For en passant this is the pawn removed from beside the destination
    pub captured: Option<Piece>,
    pub move_flag: MoveFlag,
}

impl Move {
    pub fn to_human(&self) -> String {
        match self.move_flag {
            MoveFlag::CastleKingside => {
                return format!("{} castles kingside", self.piece.color.to_human())
            }
            MoveFlag::CastleQueenside => {
                return format!("{} castles queenside", self.piece.color.to_human())
            }
            _ => {}
        }
        let maybe_capture_str = match self.captured {
            Some(p) => format!(" capturing {}", p),
            None => "".to_string(),
        };
        let maybe_special_str = match self.move_flag {
            MoveFlag::Promotion(promoted_to) => {
                format!(" promoting to {}", promoted_to.to_human())
            }
            MoveFlag::EnPassantCapture => " en passant".to_string(),
            _ => "".to_string(),
        };
        format!(
            "{} {}-{}{}{}",
            self.piece, self.from, self.to, maybe_capture_str, maybe_special_str,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_human())
    }
}
