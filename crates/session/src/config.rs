//! Session configuration, loaded from TOML.
//!
//! ```toml
//! mode = "human-vs-computer"
//! computer_color = "black"
//! difficulty = "hard"
//! ai_timeout_ms = 5000
//! thinking_delay = false
//!
//! [rules]
//! backward_capture = true
//! flying_kings = true
//! mandatory_capture = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use checkers_core::{Color, Rules};
use minimax_engine::Difficulty;

/// Hard cap on a computer move before the fallback engine takes over.
pub const DEFAULT_AI_TIMEOUT_MS: u64 = 5000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    HumanVsHuman,
    #[default]
    HumanVsComputer,
    ComputerVsComputer,
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human-vs-human" | "hvh" => Ok(GameMode::HumanVsHuman),
            "human-vs-computer" | "hvc" => Ok(GameMode::HumanVsComputer),
            "computer-vs-computer" | "cvc" => Ok(GameMode::ComputerVsComputer),
            other => Err(format!("unknown game mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    /// Side played by the computer in `human-vs-computer`
    pub computer_color: Color,
    pub ai_timeout_ms: u64,
    /// Wait the difficulty's thinking time before each computer move
    pub thinking_delay: bool,
    pub rules: Rules,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            mode: GameMode::default(),
            computer_color: Color::Black,
            ai_timeout_ms: DEFAULT_AI_TIMEOUT_MS,
            thinking_delay: false,
            rules: Rules::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid session config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize session config")
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_millis(self.ai_timeout_ms)
    }

    /// Whether `color` is played by the computer in this mode.
    pub fn is_computer(&self, color: Color) -> bool {
        match self.mode {
            GameMode::HumanVsHuman => false,
            GameMode::HumanVsComputer => color == self.computer_color,
            GameMode::ComputerVsComputer => true,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
