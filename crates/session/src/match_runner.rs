//! Match runner for playing games between engines

use checkers_core::{Color, Engine, GameState, Rules, SearchLimits};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Search depth for engines
    pub depth: u8,
    /// Maximum time per hop (None = no limit)
    pub time_per_move: Option<Duration>,
    /// Maximum hops per game before declaring a draw
    pub max_hops: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    pub rules: Rules,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            depth: 3,
            time_per_move: None,
            max_hops: 300,
            alternate_colors: true,
            rules: Rules::default(),
        }
    }
}

impl MatchConfig {
    /// Fresh limits for one hop (each call starts a new clock)
    fn search_limits(&self) -> SearchLimits {
        match self.time_per_move {
            Some(time) => SearchLimits::depth_and_time(self.depth, time),
            None => SearchLimits::depth(self.depth),
        }
    }
}

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

impl GameOutcome {
    fn flip(self) -> Self {
        match self {
            GameOutcome::Win => GameOutcome::Loss,
            GameOutcome::Loss => GameOutcome::Win,
            GameOutcome::Draw => GameOutcome::Draw,
        }
    }
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Points per game, counting a draw as half.
    pub fn score(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total as f64
    }

    fn add(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let engine1_red = !self.config.alternate_colors || game_num % 2 == 0;

            let outcome = if engine1_red {
                self.play_game(engine1, engine2)
            } else {
                self.play_game(engine2, engine1).flip()
            };
            result.add(outcome);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                engine1 = engine1.name(),
                engine2 = engine2.name(),
                engine1_red,
                ?outcome,
                wins = result.wins,
                losses = result.losses,
                draws = result.draws,
                "game finished"
            );
        }

        result
    }

    /// Play a single game, returns result from red's perspective
    pub fn play_game(&self, red: &mut dyn Engine, black: &mut dyn Engine) -> GameOutcome {
        let mut game = GameState::with_rules(self.config.rules);
        red.new_game();
        black.new_game();

        for _ in 0..self.config.max_hops {
            if let Some(winner) = game.winner() {
                return outcome_for_red(winner);
            }

            let to_move = game.current_player();
            let limits = self.config.search_limits();
            let result = match to_move {
                Color::Red => red.search(&game, limits),
                Color::Black => black.search(&game, limits),
            };

            let Some(mv) = result.best_move else {
                // A live game always has a move; an engine that finds none forfeits
                warn!(%to_move, "engine returned no move");
                return outcome_for_red(to_move.other());
            };
            if let Err(e) = game.play(mv) {
                warn!(%to_move, %mv, error = %e, "engine played an illegal move");
                return outcome_for_red(to_move.other());
            }
        }

        match game.winner() {
            Some(winner) => outcome_for_red(winner),
            None => GameOutcome::Draw,
        }
    }
}

fn outcome_for_red(winner: Color) -> GameOutcome {
    match winner {
        Color::Red => GameOutcome::Win,
        Color::Black => GameOutcome::Loss,
    }
}

/// Quick utility to run a single match
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
    depth: u8,
) -> MatchResult {
    let config = MatchConfig {
        num_games,
        depth,
        ..Default::default()
    };
    MatchRunner::new(config).run_match(engine1, engine2)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
