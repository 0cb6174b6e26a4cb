use rayon::prelude::*;

use crate::board::Position;
use crate::executor::execute_move;
use crate::legality::all_legal_moves;

/// Count the leaf nodes of the legal move tree `depth` plies deep. Root moves are searched
/// in parallel.
///
/// Promotions only ever produce a queen here, so counts differ from published perft numbers
/// in positions where a pawn can promote within `depth` plies.
pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = all_legal_moves(position, position.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .par_iter()
        .map(|m| run_perft(&execute_move(position, m), depth - 1))
        .sum()
}

fn run_perft(position: &Position, depth: u8) -> u64 {
    let moves = all_legal_moves(position, position.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|m| run_perft(&execute_move(position, m), depth - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::position_from_diagram;
    use crate::types::{CastlingRights, Color};

    /// Perft from starting position
    ///
    /// https://www.chessprogramming.org/Perft_Results
    ///
    /// | Depth | Nodes | Captures | Checks |
    /// | ----- | ----- | -------- | ------ |
    /// | 1     | 20    | 0        | 0      |
    /// | 2     | 400   | 0        | 0      |
    /// | 3     | 8,902 | 34       | 12     |
    #[test]
    fn perft_start() {
        let position = Position::new();
        let expected = [1, 20, 400, 8_902];
        for (depth, &nodes) in expected.iter().enumerate() {
            assert_eq!(perft(&position, depth as u8), nodes, "depth {depth}");
        }
    }

    /// "Kiwipete", position 2 on the perft results page. Exercises castling, en passant and
    /// pins; no promotions are reachable in two plies.
    #[test]
    fn perft_kiwipete() {
        let position = position_from_diagram(
            "
            r . . . k . . r
            p . p p q p b .
            b n . . p n p .
            . . . P N . . .
            . p . . P . . .
            . . N . . Q . p
            P P P B B P P P
            R . . . K . . R
            ",
            Color::White,
        )
        .with_castling(CastlingRights::ALL);
        assert_eq!(perft(&position, 1), 48);
        assert_eq!(perft(&position, 2), 2_039);
    }

    /// Position 3 on the perft results page: en passant captures that expose the king along
    /// the rank, checks from pawns.
    #[test]
    fn perft_pos_3() {
        let position = position_from_diagram(
            "
            . . . . . . . .
            . . p . . . . .
            . . . p . . . .
            K P . . . . . r
            . R . . . p . k
            . . . . . . . .
            . . . . P . P .
            . . . . . . . .
            ",
            Color::White,
        );
        let expected = [1, 14, 191, 2_812];
        for (depth, &nodes) in expected.iter().enumerate() {
            assert_eq!(perft(&position, depth as u8), nodes, "depth {depth}");
        }
    }
}
