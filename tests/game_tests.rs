//! Full games driven through the public controller API.
//!
//! Run with: cargo test --test game_tests

use chess_rules::board::Position;
use chess_rules::types::{CastleSide, Color, Move, MoveFlag, Piece, PieceType, Square, Status};
use chess_rules::{GameController, Selection, Transition};
use pretty_assertions::assert_eq;

/// Feed (row, col) clicks to the controller, returning the last transition.
fn click_all(game: &mut GameController, clicks: &[(u8, u8)]) -> Transition {
    let mut last = Transition::Ignored;
    for &(row, col) in clicks {
        last = game.select_or_move(Square::at(row, col));
    }
    last
}

fn moved(transition: Transition) -> Move {
    match transition {
        Transition::Moved(m) => m,
        other => panic!("expected a move, got {other:?}"),
    }
}

#[test]
fn double_push_sets_en_passant_target() {
    let mut game = GameController::new();
    let m = moved(click_all(&mut game, &[(6, 4), (4, 4)]));

    let position = game.position();
    assert_eq!(m.move_flag, MoveFlag::DoublePawnPush(Square::at(5, 4)));
    assert_eq!(position.en_passant(), Some(Square::at(5, 4)));
    assert_eq!(position.side_to_move(), Color::Black);
    assert_eq!(position.piece_at(Square::at(6, 4)), None);
    assert_eq!(
        position.piece_at(Square::at(4, 4)),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
}

#[test]
fn scholars_mate() {
    let mut game = GameController::new();
    let last = click_all(
        &mut game,
        &[
            (6, 4), (4, 4), // e2-e4
            (1, 4), (3, 4), // e7-e5
            (7, 5), (4, 2), // Bf1-c4
            (0, 1), (2, 2), // Nb8-c6
            (7, 3), (3, 7), // Qd1-h5
            (0, 6), (2, 5), // Ng8-f6
            (3, 7), (1, 5), // Qh5xf7
        ],
    );

    let m = moved(last);
    assert_eq!(m.captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
    assert_eq!(game.status(), Status::Checkmate(Color::White));
    assert_eq!(game.status_text(), "Checkmate! White wins!");
    assert_eq!(game.record().len(), 7);

    // nothing moves once the game is over
    let frozen = *game.position();
    assert_eq!(game.select_or_move(Square::at(0, 4)), Transition::Ignored);
    assert_eq!(game.select_or_move(Square::at(6, 0)), Transition::Ignored);
    assert_eq!(*game.position(), frozen);
}

#[test]
fn king_cannot_step_into_attack() {
    // white king e1, black rook on the second rank
    let position = Position::empty(Color::White)
        .with_piece(Square::at(7, 4), Piece::new(PieceType::King, Color::White))
        .with_piece(Square::at(6, 0), Piece::new(PieceType::Rook, Color::Black))
        .with_piece(Square::at(0, 4), Piece::new(PieceType::King, Color::Black));
    let mut game = GameController::from_position(position);

    let mut destinations = game.legal_destinations(Square::at(7, 4));
    destinations.sort();
    assert_eq!(destinations, vec![Square::at(7, 3), Square::at(7, 5)]);

    game.select_or_move(Square::at(7, 4));
    assert_eq!(
        game.select_or_move(Square::at(6, 4)),
        Transition::Rejected {
            from: Square::at(7, 4),
            to: Square::at(6, 4)
        }
    );
    assert_eq!(*game.position(), position);
}

#[test]
fn queen_move_stalemates() {
    // black king a8, white queen b5 about to go to b6
    let position = Position::empty(Color::White)
        .with_piece(Square::at(0, 0), Piece::new(PieceType::King, Color::Black))
        .with_piece(Square::at(3, 1), Piece::new(PieceType::Queen, Color::White))
        .with_piece(Square::at(7, 7), Piece::new(PieceType::King, Color::White));
    let mut game = GameController::from_position(position);
    assert_eq!(game.status(), Status::InProgress);

    moved(click_all(&mut game, &[(3, 1), (2, 1)]));
    assert!(!game.in_check());
    assert_eq!(game.status(), Status::Stalemate);
    assert_eq!(game.status_text(), "Stalemate! The game is a draw.");
}

#[test]
fn reset_restores_start() {
    let mut game = GameController::new();
    click_all(&mut game, &[(6, 4), (4, 4), (1, 4), (3, 4), (7, 6)]);
    assert_eq!(game.record().len(), 2);
    assert_eq!(game.selection(), Selection::Selected(Square::at(7, 6)));

    game.reset();
    let state = game.state();
    assert_eq!(*state.position, Position::new());
    assert_eq!(state.status, Status::InProgress);
    assert_eq!(state.selection, Selection::Idle);
    assert!(state.record.is_empty());
    assert_eq!(game.status_text(), "White to move");
}

#[test]
fn castle_kingside_through_controller() {
    let mut game = GameController::new();
    click_all(
        &mut game,
        &[
            (6, 4), (4, 4), // e2-e4
            (1, 4), (3, 4), // e7-e5
            (7, 6), (5, 5), // Ng1-f3
            (0, 1), (2, 2), // Nb8-c6
            (7, 5), (4, 2), // Bf1-c4
            (0, 5), (3, 2), // Bf8-c5
        ],
    );
    let m = moved(click_all(&mut game, &[(7, 4), (7, 6)]));

    let position = game.position();
    assert_eq!(m.move_flag, MoveFlag::CastleKingside);
    assert_eq!(
        position.piece_at(Square::at(7, 6)),
        Some(Piece::new(PieceType::King, Color::White))
    );
    assert_eq!(
        position.piece_at(Square::at(7, 5)),
        Some(Piece::new(PieceType::Rook, Color::White))
    );
    assert_eq!(position.piece_at(Square::at(7, 7)), None);
    assert!(!position.castling().allows(Color::White, CastleSide::Kingside));
    assert!(!position.castling().allows(Color::White, CastleSide::Queenside));
    assert!(position.castling().allows(Color::Black, CastleSide::Kingside));
}

#[test]
fn en_passant_through_controller() {
    let mut game = GameController::new();
    click_all(
        &mut game,
        &[
            (6, 4), (4, 4), // e2-e4
            (1, 0), (2, 0), // a7-a6
            (4, 4), (3, 4), // e4-e5
            (1, 3), (3, 3), // d7-d5
        ],
    );
    assert_eq!(game.position().en_passant(), Some(Square::at(2, 3)));
    assert!(game.legal_destinations(Square::at(3, 4)).contains(&Square::at(2, 3)));

    let m = moved(click_all(&mut game, &[(3, 4), (2, 3)]));
    let position = game.position();
    assert_eq!(m.move_flag, MoveFlag::EnPassantCapture);
    assert_eq!(m.captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
    assert_eq!(position.piece_at(Square::at(3, 3)), None);
    assert_eq!(
        position.piece_at(Square::at(2, 3)),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
    assert_eq!(position.en_passant(), None);
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = GameController::new();
    click_all(
        &mut game,
        &[
            (6, 4), (4, 4), // e2-e4
            (1, 0), (2, 0), // a7-a6
            (4, 4), (3, 4), // e4-e5
            (1, 3), (3, 3), // d7-d5
            (6, 7), (5, 7), // h2-h3
            (2, 0), (3, 0), // a6-a5
        ],
    );
    assert!(!game.legal_destinations(Square::at(3, 4)).contains(&Square::at(2, 3)));
    assert!(matches!(
        click_all(&mut game, &[(3, 4), (2, 3)]),
        Transition::Rejected { .. }
    ));
}

#[test]
fn promotion_to_queen_gives_check() {
    let position = Position::empty(Color::White)
        .with_piece(Square::at(1, 0), Piece::new(PieceType::Pawn, Color::White))
        .with_piece(Square::at(7, 7), Piece::new(PieceType::King, Color::White))
        .with_piece(Square::at(0, 7), Piece::new(PieceType::King, Color::Black));
    let mut game = GameController::from_position(position);

    let m = moved(click_all(&mut game, &[(1, 0), (0, 0)]));
    assert_eq!(m.move_flag, MoveFlag::Promotion(PieceType::Queen));
    assert_eq!(
        game.position().piece_at(Square::at(0, 0)),
        Some(Piece::new(PieceType::Queen, Color::White))
    );
    assert_eq!(game.status(), Status::InProgress);
    assert_eq!(game.status_text(), "Black to move (Check!)");
}

#[test]
fn square_names_drive_the_controller() {
    let mut game = GameController::new();
    for name in ["e2", "e4", "e7", "e5"] {
        game.select_or_move(Square::from_name(name).unwrap());
    }
    assert_eq!(
        game.record().to_human(),
        "1. white pawn e2-e4, black pawn e7-e5\n"
    );
    assert!(Square::from_name("i9").is_err());
}
