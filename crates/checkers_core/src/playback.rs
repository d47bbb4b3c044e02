//! Step-through viewer over a finished or paused game.
//!
//! The cursor counts applied records: 0 is the starting position and `len()`
//! is the live position. Every position is rebuilt by replaying records from
//! the origin, so stepping back through a chain is one hop at a time.

use crate::{error::GameResult, game::GameState, history::MoveRecord, types::Rules};

#[derive(Clone, Debug)]
pub struct Playback {
    origin: GameState,
    records: Vec<MoveRecord>,
    cursor: usize,
    current: GameState,
    /// Rules the live game had asked for when playback started
    live_rules: Rules,
}

impl Playback {
    /// Captures `game` with the cursor at its current (last) position.
    pub fn new(game: &GameState) -> Self {
        Playback {
            origin: game.origin(),
            records: game.history().records().to_vec(),
            cursor: game.history().len(),
            current: game.clone(),
            live_rules: game.pending_rules().unwrap_or(game.rules()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// State after `cursor()` records.
    pub fn current(&self) -> &GameState {
        &self.current
    }

    /// The record that produced the current position, if any.
    pub fn record_at_cursor(&self) -> Option<&MoveRecord> {
        self.cursor.checked_sub(1).and_then(|i| self.records.get(i))
    }

    /// Moves the cursor to `index`, clamped to the record count. Each record is
    /// replayed under its own rules; the end position gets the live rules back.
    pub fn go_to(&mut self, index: usize) -> GameResult<&GameState> {
        let index = index.min(self.records.len());
        if index < self.cursor {
            self.current = self.origin.clone();
            self.cursor = 0;
        }
        while self.cursor < index {
            self.current.replay_record(&self.records[self.cursor])?;
            self.cursor += 1;
        }
        if self.cursor == self.records.len() {
            self.current.set_rules(self.live_rules);
        }
        Ok(&self.current)
    }

    /// One record forward. Returns false at the end.
    pub fn next(&mut self) -> GameResult<bool> {
        if self.cursor >= self.records.len() {
            return Ok(false);
        }
        self.go_to(self.cursor + 1)?;
        Ok(true)
    }

    /// One record back. Returns false at the start.
    pub fn previous(&mut self) -> GameResult<bool> {
        if self.cursor == 0 {
            return Ok(false);
        }
        self.go_to(self.cursor - 1)?;
        Ok(true)
    }

    pub fn go_to_start(&mut self) -> GameResult<&GameState> {
        self.go_to(0)
    }

    pub fn go_to_end(&mut self) -> GameResult<&GameState> {
        self.go_to(self.records.len())
    }

    /// Leaves playback, handing back the game at the end of its history.
    pub fn exit(mut self) -> GameResult<GameState> {
        self.go_to_end()?;
        Ok(self.current)
    }
}

impl GameState {
    pub fn playback(&self) -> Playback {
        Playback::new(self)
    }
}

#[cfg(test)]
#[path = "playback_tests.rs"]
mod playback_tests;
