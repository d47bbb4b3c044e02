use super::*;
use checkers_core::{legal_moves, Board, Color, Rules, Square};

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col).unwrap()
}

fn position(diagram: &str, to_move: Color) -> GameState {
    GameState::from_board(Board::from_diagram(diagram).unwrap(), to_move, Rules::default())
        .unwrap()
}

#[test]
fn heuristic_engine_returns_legal_move() {
    let mut engine = HeuristicEngine::with_seed(1);
    let game = GameState::new();
    let result = engine.search(&game, SearchLimits::depth(1));

    let mv = result.best_move.unwrap();
    let legal = legal_moves(game.board(), Color::Red, &game.rules(), None);
    assert!(legal.contains(&mv));
    // Every opening move landing on row 4 in column 3 or 4 scores 20
    assert_eq!(result.score, 20);
    assert!(mv.to() == sq(4, 3));
}

#[test]
fn heuristic_engine_takes_first_jump() {
    let mut engine = HeuristicEngine::with_seed(7);
    let game = position(
        "
        .......b
        ........
        ........
        ........
        .b...b..
        r.....r.
        ........
        ........
        ",
        Color::Red,
    );
    let mv = engine.search(&game, SearchLimits::depth(1)).best_move.unwrap();
    assert!(mv.is_jump());
    assert_eq!(mv.from(), sq(5, 0));
}

#[test]
fn heuristic_engine_prefers_promotion() {
    let mut engine = HeuristicEngine::with_seed(3);
    let game = position(
        "
        ........
        ..r.....
        ........
        ........
        ........
        ........
        .......b
        r.......
        ",
        Color::Red,
    );
    let mv = engine.choose(&game).unwrap();
    assert_eq!(mv.to().row, 0);
}

#[test]
fn heuristic_engine_handles_finished_game() {
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
    game.play(checkers_core::Move::Jump {
        from: sq(5, 4),
        to: sq(3, 2),
        captured: sq(4, 3),
    })
    .unwrap();

    let mut engine = HeuristicEngine::new();
    assert!(engine.search(&game, SearchLimits::depth(1)).best_move.is_none());
}

#[test]
fn seeded_engines_agree() {
    let game = GameState::new();
    let a = HeuristicEngine::with_seed(42).choose(&game);
    let b = HeuristicEngine::with_seed(42).choose(&game);
    assert_eq!(a, b);
}
