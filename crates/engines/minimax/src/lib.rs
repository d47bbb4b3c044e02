//! Minimax Checkers Engine
//!
//! Depth-limited negamax with alpha-beta pruning over copies of the game,
//! a difficulty-tiered static evaluation and ranked move suggestions for hints.

mod difficulty;
mod eval;
mod search;
mod suggest;

use checkers_core::{Color, Engine, GameState, Move, SearchLimits, SearchResult, player_jumps};
use tracing::{debug, info, warn};

pub use difficulty::{Difficulty, Weights};
pub use eval::{advancement, count_threats, evaluate_position, formation};
pub use search::WIN;
pub use suggest::{Reason, Suggestion};

/// Checkers engine using negamax with alpha-beta pruning.
///
/// When the side to move has a capture, only captures are considered and they
/// are ranked with one hop of lookahead. Otherwise the full search runs to the
/// difficulty's depth (or the depth in the supplied limits).
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    difficulty: Difficulty,
    weights: Weights,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            weights: difficulty.weights(),
            nodes: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.weights = difficulty.weights();
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Limits matching the current difficulty, without a time budget.
    pub fn default_limits(&self) -> SearchLimits {
        SearchLimits::depth(self.difficulty.depth())
    }

    /// Best hop for `player`, searched at the difficulty's depth. `player`
    /// must be the side to move; otherwise there is nothing to choose.
    pub fn best_move(&mut self, game: &GameState, player: Color) -> Option<Move> {
        if game.current_player() != player {
            warn!(%player, to_move = %game.current_player(), "asked to move out of turn");
            return None;
        }
        self.search(game, self.default_limits()).best_move
    }

    /// Top `count` moves for `player`, each scored one hop deep.
    pub fn suggest_moves(&self, game: &GameState, player: Color, count: usize) -> Vec<Suggestion> {
        suggest::suggest_moves(game, player, count, &self.weights)
    }

    pub fn evaluate(&self, game: &GameState, player: Color) -> i32 {
        evaluate_position(game, player, &self.weights)
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, game: &GameState, limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        if game.is_over() {
            return SearchResult::none();
        }
        limits.start();

        let player = game.current_player();
        let must_capture =
            game.in_multi_jump() || !player_jumps(game.board(), player, &game.rules()).is_empty();

        let (best_move, stopped, depth) = if must_capture {
            let best = search::pick_best_jump(game, &self.weights, &mut self.nodes);
            (best, false, 1)
        } else {
            let outcome = search::pick_best_move(
                game,
                limits.depth,
                &self.weights,
                &mut self.nodes,
                &limits.clock,
            );
            (outcome.best_move, outcome.stopped, limits.depth)
        };

        if stopped {
            debug!(nodes = self.nodes, "search stopped by budget");
        }
        if let Some((mv, score)) = best_move {
            info!(%player, %mv, score, nodes = self.nodes, difficulty = %self.difficulty, "engine move");
        }

        SearchResult {
            best_move: best_move.map(|(mv, _)| mv),
            score: best_move.map(|(_, s)| s).unwrap_or(0),
            depth,
            nodes: self.nodes,
            stopped,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
