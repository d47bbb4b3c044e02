//! Per-game statistics gathered from applied move records.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::{error::GameResult, game::GameState, history::MoveRecord, types::*};

/// Efficiency at or above this marks a move as brilliant.
pub const BRILLIANT_THRESHOLD: u8 = 90;
/// Piece count at which a side is considered to be in the endgame.
pub const ENDGAME_PIECES: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentKind {
    FirstCapture,
    Promotion,
    TurningPoint,
    Brilliant,
    Endgame,
    LongestChain,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMoment {
    pub kind: MomentKind,
    pub description: String,
    /// 1-based index into the analysed moves
    pub move_number: usize,
    pub player: Color,
    pub mv: Move,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysedMove {
    pub record: MoveRecord,
    pub move_number: usize,
    pub timestamp_ms: u64,
    pub time_taken_ms: u64,
    pub efficiency: u8,
    /// Red pieces minus Black pieces after the move
    pub piece_advantage: i16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub duration_secs: u64,
    pub total_moves: usize,
    pub avg_time_per_move_ms: u64,
    pub red_captures: u32,
    pub black_captures: u32,
    pub red_efficiency: u8,
    pub black_efficiency: u8,
    pub red_pieces: u8,
    pub black_pieces: u8,
    pub longest_jump_chain: u32,
    pub key_moments: usize,
    pub winner: Option<Color>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameAnalytics {
    moves: Vec<AnalysedMove>,
    key_moments: Vec<KeyMoment>,
    red_captures: u32,
    black_captures: u32,
    longest_chain: u32,
    current_chain: u32,
    pieces: [u8; 2],
    winner: Option<Color>,
    duration_secs: u64,
    #[serde(skip)]
    started: Option<Instant>,
}

impl GameAnalytics {
    pub fn new() -> Self {
        Self {
            pieces: [12, 12],
            started: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Fresh analytics for a game whose first position is `game`.
    pub fn from_position(game: &GameState) -> Self {
        Self {
            pieces: [
                game.pieces_remaining(Color::Red),
                game.pieces_remaining(Color::Black),
            ],
            ..Self::new()
        }
    }

    /// Clears everything and restarts the clock.
    pub fn start(&mut self) {
        *self = Self::new();
    }

    pub fn moves(&self) -> &[AnalysedMove] {
        &self.moves
    }

    pub fn key_moments(&self) -> &[KeyMoment] {
        &self.key_moments
    }

    pub fn longest_chain(&self) -> u32 {
        self.longest_chain
    }

    pub fn captures(&self, color: Color) -> u32 {
        match color {
            Color::Red => self.red_captures,
            Color::Black => self.black_captures,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.started
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or_default()
    }

    /// Records `rec`, which must be the move that produced `game`.
    pub fn record_move(&mut self, rec: &MoveRecord, game: &GameState, time_taken: Duration) {
        let move_number = self.moves.len() + 1;
        let red = game.pieces_remaining(Color::Red);
        let black = game.pieces_remaining(Color::Black);
        self.pieces = [red, black];
        let entry = AnalysedMove {
            record: rec.clone(),
            move_number,
            timestamp_ms: self.elapsed_ms(),
            time_taken_ms: time_taken.as_millis() as u64,
            efficiency: move_efficiency(rec),
            piece_advantage: red as i16 - black as i16,
        };

        if rec.is_jump() {
            match rec.player {
                Color::Red => self.red_captures += 1,
                Color::Black => self.black_captures += 1,
            }
            self.current_chain = if rec.chain.extends_previous() {
                self.current_chain + 1
            } else {
                1
            };
            if self.current_chain > self.longest_chain {
                self.longest_chain = self.current_chain;
                let text = format!("Longest jump chain: {} jumps", self.current_chain);
                self.add_moment(MomentKind::LongestChain, text, &entry);
            }
        } else {
            self.current_chain = 0;
        }

        self.detect_key_moments(&entry);
        self.moves.push(entry);
    }

    fn detect_key_moments(&mut self, entry: &AnalysedMove) {
        let rec = &entry.record;
        if rec.is_jump() && self.red_captures + self.black_captures == 1 {
            self.add_moment(
                MomentKind::FirstCapture,
                "First capture of the game".to_string(),
                entry,
            );
        }
        if rec.became_king {
            self.add_moment(
                MomentKind::Promotion,
                format!("{} gets a king", rec.player),
                entry,
            );
        }
        if let Some(prev) = self.moves.last() {
            let (p, c) = (prev.piece_advantage, entry.piece_advantage);
            if (p > 0 && c < 0) || (p < 0 && c > 0) {
                self.add_moment(
                    MomentKind::TurningPoint,
                    "Advantage switches sides".to_string(),
                    entry,
                );
            }
        }
        if entry.efficiency >= BRILLIANT_THRESHOLD {
            self.add_moment(MomentKind::Brilliant, "Brilliant move".to_string(), entry);
        }
        if self.pieces.iter().any(|&n| n <= ENDGAME_PIECES)
            && !self.key_moments.iter().any(|m| m.kind == MomentKind::Endgame)
        {
            self.add_moment(
                MomentKind::Endgame,
                "Entering the endgame".to_string(),
                entry,
            );
        }
    }

    fn add_moment(&mut self, kind: MomentKind, description: String, entry: &AnalysedMove) {
        self.key_moments.push(KeyMoment {
            kind,
            description,
            move_number: entry.move_number,
            player: entry.record.player,
            mv: entry.record.mv,
        });
    }

    /// Forgets the last `removed` records (as reported by `undo_last_move`)
    /// and the moments they produced. `game` is the position after the undo.
    pub fn record_undo(&mut self, removed: usize, game: &GameState) {
        let keep = self.moves.len().saturating_sub(removed);
        self.moves.truncate(keep);
        // The undone position may have been the finished one
        self.winner = None;
        self.key_moments.retain(|m| m.move_number <= keep);
        self.pieces = [
            game.pieces_remaining(Color::Red),
            game.pieces_remaining(Color::Black),
        ];

        self.red_captures = 0;
        self.black_captures = 0;
        self.longest_chain = 0;
        self.current_chain = 0;
        for m in &self.moves {
            if m.record.is_jump() {
                match m.record.player {
                    Color::Red => self.red_captures += 1,
                    Color::Black => self.black_captures += 1,
                }
                self.current_chain = if m.record.chain.extends_previous() {
                    self.current_chain + 1
                } else {
                    1
                };
                self.longest_chain = self.longest_chain.max(self.current_chain);
            } else {
                self.current_chain = 0;
            }
        }
    }

    pub fn finish(&mut self, winner: Option<Color>) -> GameStats {
        self.winner = winner;
        self.duration_secs = self.elapsed_ms() / 1000;
        self.stats()
    }

    pub fn stats(&self) -> GameStats {
        let total_time: u64 = self.moves.iter().map(|m| m.time_taken_ms).sum();
        let avg_time_per_move_ms = if self.moves.is_empty() {
            0
        } else {
            total_time / self.moves.len() as u64
        };
        GameStats {
            duration_secs: self.duration_secs.max(self.elapsed_ms() / 1000),
            total_moves: self.moves.len(),
            avg_time_per_move_ms,
            red_captures: self.red_captures,
            black_captures: self.black_captures,
            red_efficiency: self.average_efficiency(Color::Red),
            black_efficiency: self.average_efficiency(Color::Black),
            red_pieces: self.pieces[Color::Red.idx()],
            black_pieces: self.pieces[Color::Black.idx()],
            longest_jump_chain: self.longest_chain,
            key_moments: self.key_moments.len(),
            winner: self.winner,
        }
    }

    fn average_efficiency(&self, color: Color) -> u8 {
        let (sum, n) = self
            .moves
            .iter()
            .filter(|m| m.record.player == color)
            .fold((0u32, 0u32), |(s, n), m| (s + m.efficiency as u32, n + 1));
        if n == 0 {
            0
        } else {
            ((sum as f32 / n as f32).round()) as u8
        }
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 0-100 rating of a single hop.
pub fn move_efficiency(rec: &MoveRecord) -> u8 {
    let mut score: i32 = 50;
    if rec.is_jump() {
        score += 30;
    }
    if rec.became_king {
        score += 40;
    }
    if rec.to().in_center() {
        score += 15;
    }
    let is_man = !rec.was_king && !rec.became_king;
    if is_man && (rec.to().row - rec.from().row).signum() == rec.player.forward() {
        score += 10;
    }
    if rec.from().row == rec.player.home_row() {
        score -= 5;
    }
    score.clamp(0, 100) as u8
}

#[cfg(test)]
#[path = "analytics_tests.rs"]
mod analytics_tests;
