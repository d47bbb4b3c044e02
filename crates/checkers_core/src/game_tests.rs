use super::*;

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col).unwrap()
}

fn position(diagram: &str, to_move: Color) -> GameState {
    GameState::from_board(Board::from_diagram(diagram).unwrap(), to_move, Rules::default()).unwrap()
}

/// Red man on (5,4) with Black men on (4,3) and (2,1): a two-hop chain.
fn double_jump_position() -> GameState {
    position(
        "
        .......b
        ........
        .b......
        ........
        ...b....
        ....r...
        ........
        r.......
        ",
        Color::Red,
    )
}

#[test]
fn test_fresh_game_quiet_move() {
    let mut game = GameState::new();
    assert_eq!(game.current_player(), Color::Red);

    let moves = game.select_piece(sq(5, 0)).unwrap().to_vec();
    assert_eq!(
        moves,
        vec![Move::Quiet {
            from: sq(5, 0),
            to: sq(4, 1)
        }]
    );

    let applied = game.apply_move(sq(4, 1)).unwrap();
    assert_eq!(applied, Applied::TurnPassed { next: Color::Black });
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.pieces_remaining(Color::Red), 12);
    assert_eq!(game.pieces_remaining(Color::Black), 12);

    let rec = game.history().last().unwrap();
    assert!(!rec.is_jump());
    assert_eq!(rec.chain, ChainPosition::Single);
    assert_eq!(rec.player, Color::Red);
    assert_eq!(game.turn(), 2);
}

#[test]
fn test_invalid_selections() {
    let mut game = GameState::new();
    assert!(matches!(
        game.select_piece(sq(4, 1)),
        Err(GameError::EmptySquare { .. })
    ));
    assert!(matches!(
        game.select_piece(sq(2, 1)),
        Err(GameError::NotYourPiece { .. })
    ));
    assert!(game.selected().is_none());
}

#[test]
fn test_illegal_destination_leaves_state_untouched() {
    let mut game = GameState::new();
    assert!(matches!(game.apply_move(sq(4, 1)), Err(GameError::NoSelection)));

    game.select_piece(sq(5, 2)).unwrap();
    let before = game.clone();
    let err = game.apply_move(sq(3, 2)).unwrap_err();
    assert!(matches!(err, GameError::IllegalMove { .. }));
    assert!(!err.is_invalid_selection());
    assert_eq!(game, before);
}

#[test]
fn test_double_jump_chain() {
    let mut game = double_jump_position();
    assert_eq!(game.pieces_remaining(Color::Black), 3);

    // Only the capturing man may move
    assert!(game.select_piece(sq(7, 0)).unwrap().is_empty());
    game.select_piece(sq(5, 4)).unwrap();

    let first = game.apply_move(sq(3, 2)).unwrap();
    assert_eq!(first, Applied::ChainContinues { piece: sq(3, 2) });
    assert_eq!(game.current_player(), Color::Red);
    assert!(game.in_multi_jump());
    assert_eq!(game.selected(), Some(sq(3, 2)));
    assert!(game.valid_moves().iter().all(Move::is_jump));
    assert!(matches!(
        game.select_piece(sq(7, 0)),
        Err(GameError::ChainLocked { .. })
    ));

    let second = game.apply_move(sq(1, 0)).unwrap();
    assert_eq!(second, Applied::TurnPassed { next: Color::Black });
    assert_eq!(game.current_player(), Color::Black);
    assert!(!game.in_multi_jump());
    assert_eq!(game.pieces_remaining(Color::Black), 1);

    let records = game.history().records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.chain.is_chained() && r.is_jump()));
    assert_eq!(records[0].chain, ChainPosition::Start);
    assert_eq!(records[1].chain, ChainPosition::End);
}

#[test]
fn test_undo_from_chain_end_restores_whole_chain() {
    let mut game = double_jump_position();
    let before = game.clone();

    game.select_piece(sq(5, 4)).unwrap();
    game.apply_move(sq(3, 2)).unwrap();
    game.apply_move(sq(1, 0)).unwrap();

    assert_eq!(game.undo_last_move(1), 2);
    assert_eq!(game.current_player(), Color::Red);
    assert_eq!(game, before);
}

#[test]
fn test_undo_mid_chain() {
    let mut game = double_jump_position();
    let before = game.clone();

    game.select_piece(sq(5, 4)).unwrap();
    game.apply_move(sq(3, 2)).unwrap();
    assert_eq!(game.undo_last_move(1), 1);
    assert!(!game.in_multi_jump());
    assert_eq!(game, before);
}

#[test]
fn test_apply_then_undo_round_trip() {
    let mut game = GameState::new();
    let before = game.clone();
    game.select_piece(sq(5, 2)).unwrap();
    game.apply_move(sq(4, 3)).unwrap();
    assert_eq!(game.undo_last_move(1), 1);
    assert_eq!(game, before);

    // Nothing left to undo
    assert_eq!(game.undo_last_move(1), 0);
    assert_eq!(game, before);
}

#[test]
fn test_flying_king_capture_from_selection() {
    let mut game = position(
        "
        .......b
        ........
        ...b....
        ........
        .....R..
        ........
        ........
        ........
        ",
        Color::Red,
    );
    let moves = game.select_piece(sq(4, 5)).unwrap().to_vec();
    let landings: Vec<Square> = moves.iter().map(Move::to).collect();
    assert_eq!(landings, vec![sq(1, 2), sq(0, 1)]);

    game.apply_move(sq(0, 1)).unwrap();
    assert!(game.board().is_empty(sq(2, 3)));
    assert_eq!(game.pieces_remaining(Color::Black), 1);
}

#[test]
fn test_promotion_and_undo() {
    let mut game = position(
        "
        ........
        ..r.....
        ........
        ........
        ........
        ........
        .b......
        ........
        ",
        Color::Red,
    );
    game.select_piece(sq(1, 2)).unwrap();
    game.apply_move(sq(0, 1)).unwrap();
    assert_eq!(
        game.board().piece_at(sq(0, 1)),
        Some(Piece::king(Color::Red))
    );
    assert!(game.history().last().unwrap().became_king);

    game.undo_last_move(1);
    assert_eq!(game.board().piece_at(sq(1, 2)), Some(Piece::man(Color::Red)));
}

#[test]
fn test_capturing_last_piece_ends_game() {
    let mut game = position(
        "
        ........
        ........
        ........
        ........
        ...b....
        ....r...
        ........
        ........
        ",
        Color::Red,
    );
    game.select_piece(sq(5, 4)).unwrap();
    let applied = game.apply_move(sq(3, 2)).unwrap();
    assert_eq!(applied, Applied::GameOver { winner: Color::Red });
    assert!(game.is_over());
    assert!(matches!(
        game.select_piece(sq(3, 2)),
        Err(GameError::GameOver { winner: Color::Red })
    ));
    assert!(game.legal_move_sets().is_empty());

    game.undo_last_move(1);
    assert!(!game.is_over());
    assert_eq!(game.current_player(), Color::Red);
}

#[test]
fn test_side_without_moves_loses() {
    let game = position(
        "
        ........
        ........
        ........
        ........
        ........
        ........
        .......b
        ......r.
        ",
        Color::Black,
    );
    assert_eq!(game.winner(), Some(Color::Red));
}

#[test]
fn test_rule_toggle_recomputes_selection() {
    let mut game = position(
        "
        .......b
        ........
        ........
        ........
        .b......
        r.....r.
        ........
        ........
        ",
        Color::Red,
    );
    assert!(game.select_piece(sq(5, 6)).unwrap().is_empty());
    assert_eq!(game.mandatory_jumps().len(), 1);

    game.set_rules(Rules {
        mandatory_capture: false,
        ..Rules::default()
    });
    assert_eq!(game.valid_moves().len(), 2);
    game.apply_move(sq(4, 7)).unwrap();
    assert_eq!(game.current_player(), Color::Black);
}

#[test]
fn test_new_game_keeps_rules() {
    let rules = Rules {
        flying_kings: false,
        ..Rules::default()
    };
    let mut game = GameState::with_rules(rules);
    game.select_piece(sq(5, 0)).unwrap();
    game.apply_move(sq(4, 1)).unwrap();
    game.new_game();
    assert_eq!(game.rules(), rules);
    assert!(game.history().is_empty());
    assert_eq!(game.board(), &Board::initial());
}

#[test]
fn test_from_board_rejects_light_square() {
    let mut board = Board::empty();
    board.set_piece(sq(4, 4), Some(Piece::man(Color::Red)));
    assert!(matches!(
        GameState::from_board(board, Color::Red, Rules::default()),
        Err(GameError::Inconsistent { .. })
    ));
}

#[test]
fn test_snapshot_serializes() {
    let game = GameState::new();
    let snap = game.snapshot();
    assert_eq!(snap.pieces.len(), 24);
    assert_eq!(snap.red_pieces, 12);
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"current_player\":\"red\""));
}

/// Red man on (5,4): a forward jump over (4,3) that can only continue
/// backwards over (4,1).
fn backward_chain_position() -> GameState {
    position(
        "
        .......b
        ........
        ........
        ........
        .b.b....
        ....r...
        ........
        ........
        ",
        Color::Red,
    )
}

#[test]
fn test_rule_change_waits_for_chain_end() {
    let mut game = backward_chain_position();
    game.select_piece(sq(5, 4)).unwrap();
    assert_eq!(
        game.apply_move(sq(3, 2)).unwrap(),
        Applied::ChainContinues { piece: sq(3, 2) }
    );

    let strict = Rules {
        backward_capture: false,
        ..Rules::default()
    };
    game.set_rules(strict);
    assert_eq!(game.rules(), Rules::default());
    assert_eq!(game.pending_rules(), Some(strict));
    // The locked piece keeps the jump it was promised
    assert!(!game.legal_move_sets().is_empty());
    assert_eq!(game.valid_moves().len(), 1);

    assert_eq!(
        game.apply_move(sq(5, 0)).unwrap(),
        Applied::TurnPassed { next: Color::Black }
    );
    assert_eq!(game.rules(), strict);
    assert_eq!(game.pending_rules(), None);
    assert!(game.history().records().iter().all(|rec| rec.rules == Rules::default()));
}

#[test]
fn test_undo_mid_chain_applies_pending_rules() {
    let mut game = backward_chain_position();
    game.select_piece(sq(5, 4)).unwrap();
    game.apply_move(sq(3, 2)).unwrap();

    let strict = Rules {
        backward_capture: false,
        ..Rules::default()
    };
    game.set_rules(strict);
    assert_eq!(game.undo_last_move(1), 1);
    assert_eq!(game.rules(), strict);
    assert_eq!(game.pending_rules(), None);
    assert!(!game.in_multi_jump());
}
