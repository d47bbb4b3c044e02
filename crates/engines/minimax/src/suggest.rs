//! Ranked hints: every legal hop scored one hop deep, best first.

use serde::{Deserialize, Serialize};
use std::fmt;

use checkers_core::{Color, GameState, Move, legal_moves};

use crate::difficulty::Weights;
use crate::eval::{count_threats, evaluate_position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Capture,
    Promotion,
    CenterControl,
    Safe,
    /// Attacked by more than one enemy after the move
    UnderThreat(u32),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Capture => f.write_str("Captures opponent piece"),
            Reason::Promotion => f.write_str("Promotes to king"),
            Reason::CenterControl => f.write_str("Controls center"),
            Reason::Safe => f.write_str("Safe position"),
            Reason::UnderThreat(n) => write!(f, "Under threat from {n} pieces"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub mv: Move,
    pub score: i32,
    pub reasons: Vec<Reason>,
}

impl Suggestion {
    pub fn explanation(&self) -> String {
        if self.reasons.is_empty() {
            return "Standard move".to_string();
        }
        self.reasons
            .iter()
            .map(Reason::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:+}): {}", self.mv, self.score, self.explanation())
    }
}

pub(crate) fn suggest_moves(
    game: &GameState,
    player: Color,
    count: usize,
    weights: &Weights,
) -> Vec<Suggestion> {
    if game.is_over() {
        return Vec::new();
    }
    // Hints for the side not on move are computed as if it were its turn
    let base = if game.current_player() == player {
        game.search_copy()
    } else {
        match GameState::from_board(game.board().clone(), player, game.rules()) {
            Ok(g) => g,
            Err(_) => return Vec::new(),
        }
    };
    let chain = base.chain_piece();

    let mut out: Vec<Suggestion> = legal_moves(base.board(), player, &base.rules(), chain)
        .into_iter()
        .filter_map(|mv| {
            let mut child = base.search_copy();
            child.play(mv).ok()?;
            let score = evaluate_position(&child, player, weights);
            Some(Suggestion {
                mv,
                score,
                reasons: explain(&base, &child, mv),
            })
        })
        .collect();

    // Stable sort keeps generation order among equal scores
    out.sort_by(|a, b| b.score.cmp(&a.score));
    out.truncate(count);
    out
}

fn explain(before: &GameState, after: &GameState, mv: Move) -> Vec<Reason> {
    let mut reasons = Vec::new();
    if mv.is_jump() {
        reasons.push(Reason::Capture);
    }
    let promotes = before
        .board()
        .piece_at(mv.from())
        .is_some_and(|pc| !pc.is_king && mv.to().row == pc.color.promotion_row());
    if promotes {
        reasons.push(Reason::Promotion);
    }
    if mv.to().in_center() {
        reasons.push(Reason::CenterControl);
    }
    match count_threats(after.board(), mv.to(), &after.rules()) {
        0 => reasons.push(Reason::Safe),
        1 => {}
        n => reasons.push(Reason::UnderThreat(n)),
    }
    reasons
}
