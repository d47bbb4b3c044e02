//! Error types for the rules engine.
//!
//! Ordinary illegal input (clicking an empty square, choosing a destination
//! that is not legal) is reported through these values and never changes the
//! game state.

use thiserror::Error;

use crate::types::{Color, Square};

/// Errors produced by `GameState` and the persistence helpers.
#[derive(Error, Debug)]
pub enum GameError {
    /// Coordinates outside the 8x8 board
    #[error("square ({row}, {col}) is off the board")]
    OffBoard { row: i8, col: i8 },

    /// Selected square holds no piece
    #[error("no piece on {square}")]
    EmptySquare { square: Square },

    /// Selected piece belongs to the side not on move
    #[error("piece on {square} belongs to {owner}, but {to_move} is on move")]
    NotYourPiece {
        square: Square,
        owner: Color,
        to_move: Color,
    },

    /// A multi-jump is in progress and another piece was chosen
    #[error("the piece on {locked} must finish its capture chain")]
    ChainLocked { locked: Square },

    /// `apply_move` called without a selected piece
    #[error("no piece selected")]
    NoSelection,

    /// Destination is not among the selected piece's legal moves
    #[error("{from} cannot move to {to}")]
    IllegalMove { from: Square, to: Square },

    /// The game already has a winner; mutations are rejected until a new game
    #[error("game is over, {winner} won")]
    GameOver { winner: Color },

    /// External data (a saved game, a record list) disagrees with the rules engine
    #[error("inconsistent game data: {reason}")]
    Inconsistent { reason: String },

    /// Malformed board diagram or square notation
    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// True for the errors that reject a selection (as opposed to a destination).
    pub fn is_invalid_selection(&self) -> bool {
        matches!(
            self,
            GameError::OffBoard { .. }
                | GameError::EmptySquare { .. }
                | GameError::NotYourPiece { .. }
                | GameError::ChainLocked { .. }
        )
    }
}

/// Result type alias for rules engine operations
pub type GameResult<T> = Result<T, GameError>;
