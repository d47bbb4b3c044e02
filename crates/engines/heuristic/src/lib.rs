//! Heuristic Checkers Engine
//!
//! A cheap one-ply move chooser. It never searches, so it always answers
//! immediately. Useful for:
//! - Falling back when a deeper search runs out of time
//! - Baseline comparisons (any real engine should beat this)

use checkers_core::{Engine, GameState, Move, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(test)]
mod lib_tests;

/// Takes the first available capture; otherwise scores each hop with a few
/// positional bonuses and picks uniformly among the best.
#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    rng: StdRng,
    nodes: u64,
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Deterministic tie-breaking, for tests and reproducible matches.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }

    pub fn choose(&mut self, game: &GameState) -> Option<Move> {
        let moves: Vec<Move> = game
            .legal_move_sets()
            .into_iter()
            .flat_map(|set| set.moves)
            .collect();
        self.nodes = moves.len() as u64;

        if let Some(jump) = moves.iter().find(|m| m.is_jump()) {
            return Some(*jump);
        }

        let scored: Vec<(Move, i32)> = moves.iter().map(|&mv| (mv, score_move(game, mv))).collect();
        let top = scored.iter().map(|&(_, s)| s).max()?;
        let best: Vec<Move> = scored
            .into_iter()
            .filter(|&(_, s)| s == top)
            .map(|(mv, _)| mv)
            .collect();
        best.choose(&mut self.rng).copied()
    }
}

/// +50 for reaching the promotion row, +10 each for landing on a middle row
/// (3 or 4) and a middle column (3 or 4), +5 for moving a king.
pub fn score_move(game: &GameState, mv: Move) -> i32 {
    let player = game.current_player();
    let to = mv.to();
    let mut score = 0;
    if to.row == player.promotion_row() {
        score += 50;
    }
    if to.row == 3 || to.row == 4 {
        score += 10;
    }
    if to.col == 3 || to.col == 4 {
        score += 10;
    }
    if game.board().piece_at(mv.from()).is_some_and(|pc| pc.is_king) {
        score += 5;
    }
    score
}

impl Engine for HeuristicEngine {
    fn search(&mut self, game: &GameState, _limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        if game.is_over() {
            return SearchResult::none();
        }

        let best_move = self.choose(game);
        let score = best_move.map(|mv| score_move(game, mv)).unwrap_or(0);

        SearchResult {
            best_move,
            score,
            depth: 1,
            nodes: self.nodes,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Heuristic v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
