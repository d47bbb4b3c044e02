//! Session layer for ML-checkers
//!
//! This crate provides:
//! - A `Session` that owns one game, the search engine, its fallback and
//!   the analytics, in place of process-wide globals
//! - TOML session configuration (rules, difficulty, game mode, AI timeout)
//! - Engine-vs-engine matches

mod config;
mod match_runner;
mod session;

pub use config::*;
pub use match_runner::*;
pub use session::*;
