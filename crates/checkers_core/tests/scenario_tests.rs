//! End-to-end rule scenarios driven through the public select/apply API.
//!
//! Playable squares have odd `row + col`; Red starts on rows 5-7 and moves
//! towards row 0.

use checkers_core::{
    Applied, Board, ChainPosition, Color, GameError, GameState, Move, Rules, Square,
    parse_square, player_jumps,
};

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col).unwrap()
}

fn position(diagram: &str, to_move: Color) -> GameState {
    GameState::from_board(Board::from_diagram(diagram).unwrap(), to_move, Rules::default())
        .unwrap()
}

#[test]
fn fresh_board_single_step() {
    let mut game = GameState::new();
    game.select_piece(sq(5, 2)).unwrap();
    let applied = game.apply_move(sq(4, 1)).unwrap();

    let rec = game.history().last().unwrap();
    assert!(!rec.is_jump());
    assert_eq!(applied, Applied::TurnPassed { next: Color::Black });
    assert_eq!(game.pieces_remaining(Color::Red), 12);
    assert_eq!(game.pieces_remaining(Color::Black), 12);
}

#[test]
fn flying_king_lands_on_every_square_past_the_capture() {
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
    assert!(moves.iter().all(Move::is_jump));
    let landings: Vec<Square> = moves.iter().map(Move::to).collect();
    assert_eq!(landings, vec![sq(1, 2), sq(0, 1)]);
    assert!(moves.iter().all(|m| m.captured() == Some(sq(2, 3))));
}

#[test]
fn double_jump_switches_turn_after_last_hop() {
    let mut game = position(
        "
        .......b
        ........
        .b......
        ........
        ...b....
        ....r...
        ........
        ........
        ",
        Color::Red,
    );
    game.select_piece(sq(5, 4)).unwrap();
    game.apply_move(sq(3, 2)).unwrap();
    assert_eq!(game.current_player(), Color::Red);
    game.apply_move(sq(1, 0)).unwrap();
    assert_eq!(game.current_player(), Color::Black);

    let chain: Vec<ChainPosition> = game.history().iter().map(|r| r.chain).collect();
    assert_eq!(chain, vec![ChainPosition::Start, ChainPosition::End]);
    assert_eq!(game.pieces_remaining(Color::Black), 1);
}

#[test]
fn triple_jump_records_middle_hop_and_undoes_atomically() {
    let mut game = position(
        "
        .......b
        ..b.....
        ........
        ..b.....
        ........
        ....b...
        .....r..
        ........
        ",
        Color::Red,
    );
    let before = game.clone();

    game.select_piece(sq(6, 5)).unwrap();
    assert!(matches!(
        game.apply_move(sq(4, 3)).unwrap(),
        Applied::ChainContinues { .. }
    ));
    assert!(matches!(
        game.apply_move(sq(2, 1)).unwrap(),
        Applied::ChainContinues { .. }
    ));
    game.apply_move(sq(0, 3)).unwrap();

    let chain: Vec<ChainPosition> = game.history().iter().map(|r| r.chain).collect();
    assert_eq!(
        chain,
        vec![ChainPosition::Start, ChainPosition::Middle, ChainPosition::End]
    );
    // Crowned only once the chain is over
    assert!(game.history().records()[..2].iter().all(|r| !r.became_king));
    assert!(game.history().last().unwrap().became_king);
    assert_eq!(game.pieces_remaining(Color::Black), 1);
    assert_eq!(game.current_player(), Color::Black);

    assert_eq!(game.undo_last_move(1), 3);
    assert_eq!(game, before);
}

#[test]
fn mandatory_capture_restricts_every_piece() {
    let game = position(
        "
        .......b
        ........
        ........
        ..b.....
        ...r....
        ........
        .r...r..
        ........
        ",
        Color::Red,
    );
    let jumps = player_jumps(game.board(), Color::Red, &game.rules());
    assert!(!jumps.is_empty());
    for (from, _) in game.board().pieces_of(Color::Red) {
        let moves = game.moves_for(from);
        if jumps.iter().any(|j| j.from() == from) {
            assert!(!moves.is_empty() && moves.iter().all(Move::is_jump));
        } else {
            assert!(moves.is_empty(), "{from} should be blocked");
        }
    }
}

#[test]
fn selection_by_notation() {
    let mut game = GameState::new();
    let from = parse_square("c3").unwrap();
    assert_eq!(from, sq(5, 2));
    let moves = game.select_piece(from).unwrap().to_vec();
    let names: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    assert_eq!(names, vec!["C3-B4", "C3-D4"]);
}

#[test]
fn finished_game_rejects_moves_until_new_game() {
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
    game.apply_move(sq(3, 2)).unwrap();
    assert_eq!(game.winner(), Some(Color::Red));
    assert!(matches!(
        game.apply_move(sq(2, 1)),
        Err(GameError::GameOver { .. })
    ));

    game.new_game();
    assert!(!game.is_over());
    assert_eq!(game.pieces_remaining(Color::Black), 12);
}
