use crate::attacks;
use crate::board::Position;
use crate::types::*;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// Which destinations a generation run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Moves the piece could make, castling included. King safety is not checked here.
    Legal,
    /// Squares the piece attacks or defends. No castling, no pushes, pawns report both
    /// diagonals whatever is on them, and friendly occupied squares count as defended.
    Observed,
}

/// One generation rule per piece type
type Rule = fn(&Position, Square, Piece, GenMode) -> Vec<Square>;

fn rule_for(piece_type: PieceType) -> Rule {
    match piece_type {
        PieceType::Pawn => pawn_moves,
        PieceType::Knight => knight_moves,
        PieceType::Bishop => bishop_moves,
        PieceType::Rook => rook_moves,
        PieceType::Queen => queen_moves,
        PieceType::King => king_moves,
    }
}

/// Destinations for the piece on `square` obeying its movement pattern and board occupancy,
/// without regard to whether its own king is left in check. An empty square has none.
pub fn pseudo_legal_moves(position: &Position, square: Square, mode: GenMode) -> Vec<Square> {
    match position.piece_at(square) {
        Some(piece) => rule_for(piece.piece_type)(position, square, piece, mode),
        None => vec![],
    }
}

/// Potential move, either valid, in which case it carries the occupant of the target square
enum PotentialMove {
    Valid(Option<Piece>),
    Invalid,
}

impl PotentialMove {
    fn continue_search_in_direction(&self) -> bool {
        matches!(self, PotentialMove::Valid(None))
    }
}

// Can `piece` land on `candidate`? Friendly pieces block, except in observed mode where the
// square is reported as defended.
fn check_move_target(
    position: &Position,
    piece: Piece,
    candidate: Square,
    mode: GenMode,
) -> PotentialMove {
    match position.piece_at(candidate) {
        Some(other) if other.color == piece.color && mode == GenMode::Legal => {
            PotentialMove::Invalid
        }
        occupant => PotentialMove::Valid(occupant),
    }
}

fn leaper_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    mode: GenMode,
    offsets: &[(i8, i8)],
) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| {
            matches!(
                check_move_target(position, piece, to, mode),
                PotentialMove::Valid(_)
            )
        })
        .collect()
}

fn slider_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    mode: GenMode,
    directions: &[(i8, i8)],
) -> Vec<Square> {
    let mut moves = vec![];
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(candidate) = current.offset(d_row, d_col) {
            let potential_move = check_move_target(position, piece, candidate, mode);
            if let PotentialMove::Valid(_) = potential_move {
                moves.push(candidate);
            }
            if !potential_move.continue_search_in_direction() {
                break;
            }
            current = candidate;
        }
    }
    moves
}

fn pawn_moves(position: &Position, from: Square, piece: Piece, mode: GenMode) -> Vec<Square> {
    let mut moves = vec![];
    let forward = piece.color.forward();
    let board = position.board();

    if mode == GenMode::Legal {
        // move one square forward, requires no piece there
        if let Some(one_step) = from.offset(forward, 0).filter(|sq| board.is_empty(*sq)) {
            moves.push(one_step);
            // from the starting rank both squares in front must be free
            if from.row() == piece.color.pawn_start_row() {
                if let Some(two_step) = one_step
                    .offset(forward, 0)
                    .filter(|sq| board.is_empty(*sq))
                {
                    moves.push(two_step);
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(diagonal) = from.offset(forward, d_col) else {
            continue;
        };
        match mode {
            GenMode::Observed => moves.push(diagonal),
            GenMode::Legal => {
                let is_capture = board
                    .piece_at(diagonal)
                    .is_some_and(|p| p.color != piece.color);
                // the target only exists for the side to move
                let is_en_passant = position.en_passant() == Some(diagonal)
                    && position.side_to_move() == piece.color;
                if is_capture || is_en_passant {
                    moves.push(diagonal);
                }
            }
        }
    }
    moves
}

fn knight_moves(position: &Position, from: Square, piece: Piece, mode: GenMode) -> Vec<Square> {
    leaper_moves(position, from, piece, mode, &KNIGHT_OFFSETS)
}

fn bishop_moves(position: &Position, from: Square, piece: Piece, mode: GenMode) -> Vec<Square> {
    slider_moves(position, from, piece, mode, &BISHOP_DIRECTIONS)
}

fn rook_moves(position: &Position, from: Square, piece: Piece, mode: GenMode) -> Vec<Square> {
    slider_moves(position, from, piece, mode, &ROOK_DIRECTIONS)
}

fn queen_moves(position: &Position, from: Square, piece: Piece, mode: GenMode) -> Vec<Square> {
    slider_moves(position, from, piece, mode, &QUEEN_DIRECTIONS)
}

fn king_moves(position: &Position, from: Square, piece: Piece, mode: GenMode) -> Vec<Square> {
    let mut moves = leaper_moves(position, from, piece, mode, &KING_OFFSETS);
    if mode == GenMode::Legal {
        moves.extend(castling_moves(position, from, piece));
    }
    moves
}

/// King hops for each side where castling is still possible.
fn castling_moves(position: &Position, from: Square, king: Piece) -> Vec<Square> {
    let color = king.color;
    let row = color.back_row();
    if from != Square::at(row, 4) {
        return vec![];
    }

    let board = position.board();
    let rook = Piece::new(PieceType::Rook, color);
    let opponent = color.other_color();

    let candidates: Vec<CastleSide> = CastleSide::ALL
        .into_iter()
        .filter(|side| position.castling().allows(color, *side))
        .filter(|side| board.piece_at(Square::at(row, side.rook_home_col())) == Some(rook))
        .filter(|side| {
            side.between_cols()
                .iter()
                .all(|&col| board.is_empty(Square::at(row, col)))
        })
        .collect();

    // Can't castle while in check
    if candidates.is_empty() || attacks::is_attacked(position, from, opponent) {
        return vec![];
    }

    candidates
        .into_iter()
        .filter(|side| {
            side.king_path_cols()
                .iter()
                .all(|&col| !attacks::is_attacked(position, Square::at(row, col), opponent))
        })
        .map(|side| Square::at(row, side.king_target_col()))
        .collect()
}
