//! Difficulty tiers: search depth, evaluation weights and thinking time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Search depth in hops.
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => 5,
        }
    }

    /// Artificial delay before the computer answers.
    pub fn thinking_time(self) -> Duration {
        let ms = match self {
            Difficulty::Easy => 500,
            Difficulty::Medium => 1000,
            Difficulty::Hard => 1500,
            Difficulty::Expert => 2000,
        };
        Duration::from_millis(ms)
    }

    pub fn weights(self) -> Weights {
        match self {
            Difficulty::Easy => Weights {
                piece: 10,
                king: 15,
                back_row: 1,
                center: 1,
                mobility: 1,
                threat: 1,
                formation: 0,
                tempo: 0,
            },
            Difficulty::Medium | Difficulty::Hard => Weights {
                piece: 10,
                king: 20,
                back_row: 3,
                center: 2,
                mobility: 3,
                threat: 5,
                formation: 0,
                tempo: 0,
            },
            Difficulty::Expert => Weights {
                piece: 10,
                king: 30,
                back_row: 5,
                center: 3,
                mobility: 5,
                threat: 8,
                formation: 4,
                tempo: 3,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Linear evaluation weights. A zero weight switches its term off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub piece: i32,
    pub king: i32,
    pub back_row: i32,
    pub center: i32,
    pub mobility: i32,
    pub threat: i32,
    /// Per friendly diagonal neighbour
    pub formation: i32,
    /// Per row of advancement of each man
    pub tempo: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Difficulty::default().weights()
    }
}
