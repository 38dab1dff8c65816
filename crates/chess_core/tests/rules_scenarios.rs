//! Rule-interaction scenarios: the special-case moves and terminal
//! classifications that make chess legality hard to get right.

use chess_core::{
    Board, CastlingRights, ChessError, Color, Game, GameStatus, Move, MoveType, Piece, PieceType,
    Position,
};

fn sq(notation: &str) -> Position {
    Position::from_algebraic(notation).unwrap()
}

fn play(game: &mut Game, from: &str, to: &str) -> GameStatus {
    let mv = find_move(game.board(), from, to);
    game.apply_move(&mv).unwrap()
}

fn find_move(board: &Board, from: &str, to: &str) -> Move {
    board
        .legal_moves_from(sq(from))
        .into_iter()
        .find(|m| m.to == sq(to))
        .unwrap_or_else(|| panic!("expected a legal move {from} -> {to}"))
}

#[test]
fn en_passant_removes_the_pawn_behind_the_destination() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "a7", "a6"); // unrelated reply
    play(&mut game, "e4", "e5");
    play(&mut game, "d7", "d5");
    assert_eq!(game.board().en_passant_target(), Some(sq("d6")));

    let capture = find_move(game.board(), "e5", "d6");
    assert_eq!(capture.move_type, MoveType::EnPassant);
    assert_eq!(
        capture.captured.map(|p| p.piece_type),
        Some(PieceType::Pawn)
    );
    game.apply_move(&capture).unwrap();

    assert!(game.board().get_piece(sq("d5")).is_none());
    let d6 = game.board().get_piece(sq("d6")).unwrap();
    assert_eq!(d6.piece_type, PieceType::Pawn);
    assert_eq!(d6.color, Color::White);

    // and the undo restores both pawns
    game.undo_last().unwrap();
    assert!(game.board().get_piece(sq("d6")).is_none());
    assert_eq!(
        game.board().get_piece(sq("d5")).map(|p| p.color),
        Some(Color::Black)
    );
    assert_eq!(
        game.board().get_piece(sq("e5")).map(|p| p.color),
        Some(Color::White)
    );
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "a7", "a6");
    play(&mut game, "e4", "e5");
    play(&mut game, "d7", "d5");
    // White declines the capture; the window closes
    play(&mut game, "b1", "c3");
    play(&mut game, "a6", "a5");
    assert!(game
        .board()
        .legal_moves_from(sq("e5"))
        .iter()
        .all(|m| m.move_type != MoveType::EnPassant));
}

fn kingside_castle_setup() -> Board {
    let mut board = Board::empty();
    board.set_castling_rights(CastlingRights {
        white_kingside: true,
        ..CastlingRights::none()
    });
    board.place_piece(sq("e1"), Piece::new(PieceType::King, Color::White));
    board.place_piece(sq("h1"), Piece::new(PieceType::Rook, Color::White));
    board.place_piece(sq("a8"), Piece::new(PieceType::King, Color::Black));
    board
}

#[test]
fn castling_relocates_both_king_and_rook() {
    let mut board = kingside_castle_setup();
    let castle = find_move(&board, "e1", "g1");
    assert_eq!(castle.move_type, MoveType::CastleKingside);

    let before = board.clone();
    let undo = board.apply_move(&castle).unwrap();
    assert_eq!(
        board.get_piece(sq("g1")).map(|p| p.piece_type),
        Some(PieceType::King)
    );
    assert_eq!(
        board.get_piece(sq("f1")).map(|p| p.piece_type),
        Some(PieceType::Rook)
    );
    assert!(board.get_piece(sq("e1")).is_none());
    assert!(board.get_piece(sq("h1")).is_none());
    assert!(!board.castling_rights().white_kingside);

    board.undo_move(undo);
    assert_eq!(board, before);
}

#[test]
fn castling_blocked_when_transit_square_is_attacked() {
    let mut board = kingside_castle_setup();
    // rook on f8 covers f1: squares are empty and rights are set, but the
    // king would pass through check
    board.place_piece(sq("f8"), Piece::new(PieceType::Rook, Color::Black));
    assert!(board
        .legal_moves_from(sq("e1"))
        .iter()
        .all(|m| m.move_type != MoveType::CastleKingside));
}

#[test]
fn castling_blocked_while_in_check() {
    let mut board = kingside_castle_setup();
    board.place_piece(sq("e8"), Piece::new(PieceType::Rook, Color::Black));
    assert!(board.is_in_check(Color::White));
    assert!(board
        .legal_moves_from(sq("e1"))
        .iter()
        .all(|m| m.move_type != MoveType::CastleKingside));
}

#[test]
fn castling_blocked_after_rook_has_moved() {
    let mut board = kingside_castle_setup();
    board.set_side_to_move(Color::White);
    let rook_out = find_move(&board, "h1", "h2");
    board.apply_move(&rook_out).unwrap();
    board.set_side_to_move(Color::White);
    let rook_back = find_move(&board, "h2", "h1");
    board.apply_move(&rook_back).unwrap();
    // rights are gone and the rook carries has_moved, so no castle
    assert!(board
        .legal_moves_from(sq("e1"))
        .iter()
        .all(|m| m.move_type != MoveType::CastleKingside));
}

#[test]
fn promotion_offers_all_four_pieces_and_queens_on_apply() {
    let mut board = Board::empty();
    board.place_piece(sq("e1"), Piece::new(PieceType::King, Color::White));
    board.place_piece(sq("h8"), Piece::new(PieceType::King, Color::Black));
    let mut pawn = Piece::new(PieceType::Pawn, Color::White);
    pawn.has_moved = true;
    board.place_piece(sq("a7"), pawn);

    let promotions: Vec<Move> = board
        .legal_moves_from(sq("a7"))
        .into_iter()
        .filter(|m| m.move_type == MoveType::Promotion)
        .collect();
    let kinds: Vec<PieceType> = promotions.iter().filter_map(|m| m.promotion).collect();
    assert_eq!(
        kinds,
        vec![
            PieceType::Queen,
            PieceType::Rook,
            PieceType::Bishop,
            PieceType::Knight
        ]
    );

    let before = board.clone();
    let queen = promotions[0];
    let undo = board.apply_move(&queen).unwrap();
    let promoted = board.get_piece(sq("a8")).unwrap();
    assert_eq!(promoted.piece_type, PieceType::Queen);
    assert_eq!(promoted.color, Color::White);
    assert!(board.get_piece(sq("a7")).is_none());

    board.undo_move(undo);
    assert_eq!(board, before);
}

#[test]
fn pinned_rook_may_only_slide_along_the_pin() {
    let mut board = Board::empty();
    board.place_piece(sq("e1"), Piece::new(PieceType::King, Color::White));
    board.place_piece(sq("e2"), Piece::new(PieceType::Rook, Color::White));
    board.place_piece(sq("e8"), Piece::new(PieceType::Rook, Color::Black));
    board.place_piece(sq("a8"), Piece::new(PieceType::King, Color::Black));

    let moves = board.legal_moves_from(sq("e2"));
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.to.file == sq("e2").file));
    // the pinned rook may still capture its pinner
    assert!(moves.iter().any(|m| m.to == sq("e8") && m.is_capture()));
}

#[test]
fn fools_mate_is_checkmate() {
    let mut game = Game::new();
    play(&mut game, "f2", "f3");
    play(&mut game, "e7", "e5");
    play(&mut game, "g2", "g4");
    assert_eq!(game.status(), GameStatus::Normal);
    let status = play(&mut game, "d8", "h4");
    assert_eq!(status, GameStatus::Checkmate);
    assert!(game.board().generate_legal_moves(Color::White).is_empty());

    // terminal position: every further request is rejected
    assert!(matches!(
        game.legal_moves_from(sq("e2")),
        Ok(moves) if moves.is_empty()
    ));
}

#[test]
fn stalemate_is_not_checkmate() {
    let mut board = Board::empty();
    board.place_piece(sq("a8"), Piece::new(PieceType::King, Color::Black));
    board.place_piece(sq("c7"), Piece::new(PieceType::Queen, Color::White));
    board.place_piece(sq("c6"), Piece::new(PieceType::King, Color::White));
    board.set_side_to_move(Color::Black);

    assert!(!board.is_in_check(Color::Black));
    assert!(board.generate_legal_moves(Color::Black).is_empty());
    assert_eq!(board.classify_position(Color::Black), GameStatus::Stalemate);
    assert_eq!(board.classify_position(Color::White), GameStatus::Normal);
}

#[test]
fn legal_moves_never_leave_own_king_attacked() {
    // spot-check the legality filter across a few plies of a real game
    let mut game = Game::new();
    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
        play(&mut game, from, to);
    }
    let color = game.side_to_move();
    let mut scratch = game.board().clone();
    for mv in game.board().generate_legal_moves(color) {
        let undo = scratch.apply_move(&mv).unwrap();
        assert!(
            !scratch.is_in_check(color),
            "move {} -> {} leaves the king attacked",
            mv.from,
            mv.to
        );
        scratch.undo_move(undo);
    }
    assert_eq!(scratch, *game.board());
}

#[test]
fn invalid_square_error_carries_coordinates() {
    assert_eq!(
        Position::new(9, 1),
        Err(ChessError::InvalidSquare { file: 9, rank: 1 })
    );
}
