use super::*;
use heuristic_engine::HeuristicEngine;
use minimax_engine::{Difficulty, MinimaxEngine};

#[test]
fn test_self_play() {
    let mut engine1 = HeuristicEngine::with_seed(1);
    let mut engine2 = HeuristicEngine::with_seed(2);

    let config = MatchConfig {
        num_games: 2,
        depth: 1,
        max_hops: 80,
        ..Default::default()
    };

    let runner = MatchRunner::new(config);
    let result = runner.run_match(&mut engine1, &mut engine2);

    // Self-play should complete without panic
    assert_eq!(result.total_games(), 2);
}

#[test]
fn test_minimax_against_heuristic() {
    let mut minimax = MinimaxEngine::new(Difficulty::Easy);
    let mut heuristic = HeuristicEngine::with_seed(9);

    let config = MatchConfig {
        num_games: 2,
        depth: 2,
        max_hops: 200,
        ..Default::default()
    };
    let result = MatchRunner::new(config).run_match(&mut minimax, &mut heuristic);
    assert_eq!(result.total_games(), 2);
    assert!((0.0..=1.0).contains(&result.score()));
}

#[test]
fn test_result_score() {
    let result = MatchResult {
        wins: 3,
        losses: 1,
        draws: 2,
    };
    assert_eq!(result.total_games(), 6);
    assert!((result.score() - 4.0 / 6.0).abs() < 1e-9);
    assert_eq!(MatchResult::new().score(), 0.5);
    assert_eq!(GameOutcome::Win.flip(), GameOutcome::Loss);
}
