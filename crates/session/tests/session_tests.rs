use checkers_core::{Applied, Board, Color, GameError, Move, Rules, SavedGame, Square};
use heuristic_engine::HeuristicEngine;
use minimax_engine::{Difficulty, Reason};
use session::{GameMode, MoveSource, Session, SessionConfig};

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col).unwrap()
}

fn step(from: Square, to: Square) -> Move {
    Move::Quiet { from, to }
}

fn computer_vs_computer() -> SessionConfig {
    SessionConfig {
        mode: GameMode::ComputerVsComputer,
        difficulty: Difficulty::Easy,
        ..Default::default()
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("session_tests_{}_{name}.json", std::process::id()))
}

#[test]
fn test_human_move_then_computer_reply() {
    let mut session = Session::default();
    assert!(!session.is_computer_turn());

    session.select(sq(5, 2)).unwrap();
    let applied = session.move_to(sq(4, 3)).unwrap();
    assert_eq!(applied, Applied::TurnPassed { next: Color::Black });
    assert!(session.is_computer_turn());

    let played = session.computer_turn().unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].source, MoveSource::Search);
    assert_eq!(session.game().current_player(), Color::Red);
    assert_eq!(session.analytics().moves().len(), 2);
}

#[test]
fn test_timeout_falls_back_to_heuristic() {
    let config = SessionConfig {
        ai_timeout_ms: 0,
        ..computer_vs_computer()
    };
    let mut session = Session::new(config).with_fallback(HeuristicEngine::with_seed(7));

    let cm = session.computer_move().unwrap().unwrap();
    assert_eq!(cm.source, MoveSource::Fallback);
    assert_eq!(cm.applied, Applied::TurnPassed { next: Color::Black });
    assert_eq!(session.game().history().len(), 1);
}

#[test]
fn test_computer_turn_finishes_the_chain() {
    let start = Board::from_diagram(
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
    )
    .unwrap();
    let saved = SavedGame {
        rules: Rules::default(),
        start,
        first_player: Color::Red,
        records: Vec::new(),
    };

    let mut session = Session::new(computer_vs_computer());
    session.restore(&saved).unwrap();
    assert_eq!(session.stats().black_pieces, 4);
    assert_eq!(session.stats().red_pieces, 1);

    let played = session.computer_turn().unwrap();
    let landings: Vec<Square> = played.iter().map(|cm| cm.mv.to()).collect();
    assert_eq!(landings, vec![sq(4, 3), sq(2, 1), sq(0, 3)]);
    assert!(played.iter().all(|cm| cm.source == MoveSource::Search));
    assert_eq!(session.game().current_player(), Color::Black);
    assert_eq!(session.analytics().longest_chain(), 3);

    // The whole chain comes back as one move
    assert_eq!(session.undo(1), 3);
    assert_eq!(session.game().current_player(), Color::Red);
    assert!(session.analytics().moves().is_empty());
    assert_eq!(session.analytics().longest_chain(), 0);
}

#[test]
fn test_hint_prefers_capture() {
    let mut session = Session::new(SessionConfig {
        mode: GameMode::HumanVsHuman,
        ..Default::default()
    });
    session.play(step(sq(5, 2), sq(4, 3))).unwrap();
    session.play(step(sq(2, 5), sq(3, 4))).unwrap();

    let hints = session.hint(3);
    assert!(!hints.is_empty());
    assert!(hints[0].mv.is_jump());
    assert!(hints[0].reasons.contains(&Reason::Capture));
}

#[test]
fn test_finished_game_rejects_computer_move() {
    let start = Board::from_diagram(
        "
        ........
        ........
        ........
        ........
        ........
        ........
        r.......
        ........
        ",
    )
    .unwrap();
    let saved = SavedGame {
        rules: Rules::default(),
        start,
        first_player: Color::Red,
        records: Vec::new(),
    };

    let mut session = Session::new(computer_vs_computer());
    session.restore(&saved).unwrap();
    assert_eq!(session.winner(), Some(Color::Red));
    assert!(!session.is_computer_turn());

    let err = session.computer_move().unwrap_err();
    assert!(matches!(err, GameError::GameOver { winner: Color::Red }));
    assert!(session.computer_turn().is_err());
}

#[test]
fn test_save_and_load_round_trip() {
    let path = temp_path("round_trip");
    let mut session = Session::new(SessionConfig {
        mode: GameMode::HumanVsHuman,
        ..Default::default()
    });
    session.play(step(sq(5, 2), sq(4, 3))).unwrap();
    session.play(step(sq(2, 5), sq(3, 4))).unwrap();
    session
        .play(Move::Jump {
            from: sq(4, 3),
            to: sq(2, 5),
            captured: sq(3, 4),
        })
        .unwrap();
    session.save(&path).unwrap();

    let mut loaded = Session::default();
    loaded.load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.game(), session.game());
    assert_eq!(loaded.analytics().moves().len(), 3);
    assert_eq!(loaded.analytics().captures(Color::Red), 1);
    assert_eq!(loaded.stats().black_pieces, 11);
}

#[test]
fn test_load_rejects_missing_file_and_keeps_game() {
    let mut session = Session::default();
    session.play(step(sq(5, 2), sq(4, 3))).unwrap();
    let before = session.game().clone();

    assert!(session.load(&temp_path("does_not_exist")).is_err());
    assert_eq!(session.game(), &before);
}

#[test]
fn test_playback_leaves_session_untouched() {
    let mut session = Session::new(SessionConfig {
        mode: GameMode::HumanVsHuman,
        ..Default::default()
    });
    session.play(step(sq(5, 2), sq(4, 3))).unwrap();
    session.play(step(sq(2, 5), sq(3, 4))).unwrap();

    let mut playback = session.playback();
    assert_eq!(playback.len(), 2);
    playback.go_to_start().unwrap();
    assert_eq!(playback.current().board(), &Board::initial());
    assert_eq!(session.game().history().len(), 2);
}

#[test]
fn test_settings_update_config() {
    let mut session = Session::default();
    let rules = Rules {
        flying_kings: false,
        ..Rules::default()
    };
    session.set_rules(rules);
    session.set_difficulty(Difficulty::Expert);

    assert_eq!(session.config().rules, rules);
    assert_eq!(session.game().rules(), rules);
    assert_eq!(session.config().difficulty, Difficulty::Expert);
}

#[test]
fn test_computer_vs_computer_plays_to_a_result() {
    let mut session = Session::new(computer_vs_computer());
    for _ in 0..400 {
        if session.game().is_over() {
            break;
        }
        assert!(session.is_computer_turn());
        session.computer_turn().unwrap();
    }
    if let Some(winner) = session.winner() {
        assert_eq!(session.stats().winner, Some(winner));
    }
}
