pub mod analytics;
pub mod board;
pub mod error;
pub mod game;
pub mod history;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod playback;
pub mod save;
pub mod time_control;
pub mod types;

// Re-export the rules engine (not engine-specific)
pub use analytics::{GameAnalytics, GameStats, KeyMoment, MomentKind};
pub use board::*;
pub use error::{GameError, GameResult};
pub use game::*;
pub use history::*;
pub use movegen::*;
pub use notation::*;
pub use perft::perft;
pub use playback::Playback;
pub use save::SavedGame;
pub use time_control::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by every move chooser (minimax, heuristic, ...)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen hop (None if the side to move has no legal move)
    pub best_move: Option<Move>,
    /// Evaluation from the perspective of the side to move
    pub score: i32,
    /// Search depth reached
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the search ran out of budget before finishing
    pub stopped: bool,
}

impl SearchResult {
    pub fn none() -> Self {
        SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all checkers engines implement.
///
/// `search` never mutates the caller's game; engines explore copies.
pub trait Engine: Send {
    /// Pick a move for the side to move in `game` within `limits`.
    fn search(&mut self, game: &GameState, limits: SearchLimits) -> SearchResult;

    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "ML-checkers"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
