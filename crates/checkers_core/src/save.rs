//! Persistence shapes: a saved game is its starting position, rules and the
//! record list. Loading replays every record through the rules engine.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::error;

use crate::{
    board::Board,
    error::{GameError, GameResult},
    game::GameState,
    history::MoveRecord,
    types::*,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub rules: Rules,
    pub start: Board,
    pub first_player: Color,
    pub records: Vec<MoveRecord>,
}

impl SavedGame {
    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> GameResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> GameResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl GameState {
    /// The position this game started from, obtained by undoing its history.
    pub fn origin(&self) -> GameState {
        let mut origin = self.clone();
        origin.undo_all();
        origin
    }

    pub fn to_saved(&self) -> SavedGame {
        let origin = self.origin();
        SavedGame {
            rules: self.pending_rules().unwrap_or(self.rules()),
            start: origin.board().clone(),
            first_player: origin.current_player(),
            records: self.history().records().to_vec(),
        }
    }

    /// Rebuilds a game by applying every saved record in order, each under the
    /// rules it was played with. A record the rules reject, or one whose
    /// capture, promotion or chain data differ from what the engine produces,
    /// makes the whole file inconsistent. `saved.rules` is in force afterwards.
    pub fn replay(saved: &SavedGame) -> GameResult<GameState> {
        let first_rules = saved.records.first().map_or(saved.rules, |rec| rec.rules);
        let mut game = GameState::from_board(saved.start.clone(), saved.first_player, first_rules)?;
        for (i, rec) in saved.records.iter().enumerate() {
            game.replay_record(rec).map_err(|e| {
                error!(index = i, error = %e, "saved game rejected");
                GameError::Inconsistent {
                    reason: format!("record {i} ({}): {e}", rec.mv),
                }
            })?;
        }
        game.set_rules(saved.rules);
        Ok(game)
    }

    /// Applies one recorded move under the rules it was played with and checks
    /// the engine agrees with the record.
    pub fn replay_record(&mut self, rec: &MoveRecord) -> GameResult<()> {
        if rec.player != self.current_player() {
            return Err(GameError::Inconsistent {
                reason: format!("{} recorded, {} to move", rec.player, self.current_player()),
            });
        }
        self.set_rules(rec.rules);
        self.play(rec.mv)?;
        match self.history().last() {
            Some(produced) if produced == rec => Ok(()),
            Some(produced) => Err(GameError::Inconsistent {
                reason: format!("expected {rec:?}, engine produced {produced:?}"),
            }),
            None => Err(GameError::Inconsistent {
                reason: "move left no record".to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "save_tests.rs"]
mod save_tests;
