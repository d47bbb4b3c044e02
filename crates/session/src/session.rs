//! The session owns one game and everything that acts on it.

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use checkers_core::{
    Applied, Color, Engine, GameAnalytics, GameError, GameResult, GameSnapshot, GameState,
    GameStats, Move, Playback, Rules, SavedGame, SearchLimits, Square,
};
use heuristic_engine::HeuristicEngine;
use minimax_engine::{Difficulty, MinimaxEngine, Suggestion};

use crate::config::SessionConfig;

/// Which engine produced a computer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Search,
    /// The search ran out of budget or returned nothing
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerMove {
    pub mv: Move,
    pub applied: Applied,
    pub source: MoveSource,
}

pub struct Session {
    config: SessionConfig,
    game: GameState,
    ai: MinimaxEngine,
    fallback: HeuristicEngine,
    analytics: GameAnalytics,
    move_started: Instant,
    final_stats: Option<GameStats>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            game: GameState::with_rules(config.rules),
            ai: MinimaxEngine::new(config.difficulty),
            fallback: HeuristicEngine::new(),
            analytics: GameAnalytics::new(),
            move_started: Instant::now(),
            final_stats: None,
            config,
        }
    }

    /// Replaces the fallback engine, e.g. with a seeded one.
    pub fn with_fallback(mut self, fallback: HeuristicEngine) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn analytics(&self) -> &GameAnalytics {
        &self.analytics
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
        self.ai.new_game();
        self.fallback.new_game();
        self.analytics.start();
        self.move_started = Instant::now();
        self.final_stats = None;
        info!(rules = ?self.config.rules, "new game");
    }

    pub fn select(&mut self, sq: Square) -> GameResult<Vec<Move>> {
        self.game.select_piece(sq).map(<[Move]>::to_vec)
    }

    pub fn move_to(&mut self, to: Square) -> GameResult<Applied> {
        let applied = self.game.apply_move(to)?;
        self.after_move(applied);
        Ok(applied)
    }

    pub fn play(&mut self, mv: Move) -> GameResult<Applied> {
        let applied = self.game.play(mv)?;
        self.after_move(applied);
        Ok(applied)
    }

    fn after_move(&mut self, applied: Applied) {
        if let Some(rec) = self.game.history().last() {
            self.analytics
                .record_move(rec, &self.game, self.move_started.elapsed());
        }
        self.move_started = Instant::now();
        if let Applied::GameOver { winner } = applied {
            let stats = self.analytics.finish(Some(winner));
            info!(%winner, moves = stats.total_moves, "game finished");
            self.final_stats = Some(stats);
        }
    }

    /// Takes back `count` moves (a capture chain is one move).
    pub fn undo(&mut self, count: usize) -> usize {
        let removed = self.game.undo_last_move(count);
        if removed > 0 {
            self.analytics.record_undo(removed, &self.game);
            self.final_stats = None;
        }
        removed
    }

    pub fn set_rules(&mut self, rules: Rules) {
        self.config.rules = rules;
        self.game.set_rules(rules);
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.ai.set_difficulty(difficulty);
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.game.is_over() && self.config.is_computer(self.game.current_player())
    }

    /// Plays one hop for the side to move. The search runs under the
    /// configured timeout; if it is cut short or finds nothing, the heuristic
    /// engine answers instead, so a legal move is always played when one exists.
    pub fn computer_move(&mut self) -> GameResult<Option<ComputerMove>> {
        if let Some(winner) = self.game.winner() {
            return Err(GameError::GameOver { winner });
        }
        if self.config.thinking_delay {
            std::thread::sleep(self.config.difficulty.thinking_time());
        }

        let limits =
            SearchLimits::depth_and_time(self.config.difficulty.depth(), self.config.ai_timeout());
        let result = self.ai.search(&self.game, limits);

        let (mv, source) = match result.best_move {
            Some(mv) if !result.stopped => (mv, MoveSource::Search),
            _ => {
                warn!(
                    stopped = result.stopped,
                    nodes = result.nodes,
                    "search gave no usable move, using fallback"
                );
                match self.fallback.search(&self.game, SearchLimits::depth(1)).best_move {
                    Some(mv) => (mv, MoveSource::Fallback),
                    None => return Ok(None),
                }
            }
        };

        let applied = self.play(mv)?;
        Ok(Some(ComputerMove {
            mv,
            applied,
            source,
        }))
    }

    /// Plays hops until the turn passes or the game ends.
    pub fn computer_turn(&mut self) -> GameResult<Vec<ComputerMove>> {
        let mut played = Vec::new();
        while let Some(cm) = self.computer_move()? {
            played.push(cm);
            if !matches!(cm.applied, Applied::ChainContinues { .. }) {
                break;
            }
        }
        Ok(played)
    }

    /// Ranked suggestions for the side to move.
    pub fn hint(&self, count: usize) -> Vec<Suggestion> {
        self.ai
            .suggest_moves(&self.game, self.game.current_player(), count)
    }

    pub fn stats(&self) -> GameStats {
        self.final_stats
            .clone()
            .unwrap_or_else(|| self.analytics.stats())
    }

    pub fn winner(&self) -> Option<Color> {
        self.game.winner()
    }

    pub fn save(&self, path: &Path) -> GameResult<()> {
        self.game.to_saved().save(path)?;
        info!(path = %path.display(), records = self.game.history().len(), "game saved");
        Ok(())
    }

    /// Loads a saved game, replaying every record. The current game is kept
    /// if the file is rejected.
    pub fn load(&mut self, path: &Path) -> GameResult<()> {
        let saved = SavedGame::load(path)?;
        self.restore(&saved)
    }

    pub fn restore(&mut self, saved: &SavedGame) -> GameResult<()> {
        let game = GameState::replay(saved)?;

        let mut cursor = game.origin();
        let mut analytics = GameAnalytics::from_position(&cursor);
        for rec in game.history() {
            cursor.replay_record(rec)?;
            analytics.record_move(rec, &cursor, Default::default());
        }

        self.config.rules = saved.rules;
        self.game = game;
        self.analytics = analytics;
        self.final_stats = None;
        self.move_started = Instant::now();
        info!(records = saved.records.len(), "game restored");
        Ok(())
    }

    pub fn playback(&self) -> Playback {
        self.game.playback()
    }
}
