//! Append-only log of applied half-moves, consumed by undo, replay and playback.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Where a record sits relative to a multi-jump chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainPosition {
    /// A complete turn on its own (a step, or a capture with no follow-up).
    Single,
    /// First hop of a chain; more hops follow.
    Start,
    /// Interior hop: follows a hop and is followed by another.
    Middle,
    /// Final hop of a chain; the turn passed after it.
    End,
}

impl ChainPosition {
    pub(crate) fn from_flags(extends_previous: bool, continues: bool) -> Self {
        match (extends_previous, continues) {
            (false, false) => ChainPosition::Single,
            (false, true) => ChainPosition::Start,
            (true, true) => ChainPosition::Middle,
            (true, false) => ChainPosition::End,
        }
    }

    /// True when the hop before this one belongs to the same chain.
    pub fn extends_previous(self) -> bool {
        matches!(self, ChainPosition::Middle | ChainPosition::End)
    }

    /// True when the same piece captured again after this hop.
    pub fn continues(self) -> bool {
        matches!(self, ChainPosition::Start | ChainPosition::Middle)
    }

    pub fn is_chained(self) -> bool {
        self != ChainPosition::Single
    }
}

/// A captured piece together with the square it was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub piece: Piece,
    pub square: Square,
}

/// Everything needed to take one half-move back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Side that played the move
    pub player: Color,
    pub mv: Move,
    /// Present exactly when `mv` is a jump
    pub capture: Option<Capture>,
    /// Mover's king status before the move
    pub was_king: bool,
    /// The move crowned the mover
    pub became_king: bool,
    pub chain: ChainPosition,
    /// Turn counter at the time of the move, starting at 1
    pub turn: u32,
    /// Rules the move was played under
    #[serde(default)]
    pub rules: Rules,
}

impl MoveRecord {
    pub fn from(&self) -> Square {
        self.mv.from()
    }

    pub fn to(&self) -> Square {
        self.mv.to()
    }

    pub fn is_jump(&self) -> bool {
        self.mv.is_jump()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord> {
        self.records.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a MoveHistory {
    type Item = &'a MoveRecord;
    type IntoIter = std::slice::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_flags_are_exhaustive() {
        assert_eq!(ChainPosition::from_flags(false, false), ChainPosition::Single);
        assert_eq!(ChainPosition::from_flags(false, true), ChainPosition::Start);
        assert_eq!(ChainPosition::from_flags(true, true), ChainPosition::Middle);
        assert_eq!(ChainPosition::from_flags(true, false), ChainPosition::End);

        assert!(!ChainPosition::Single.is_chained());
        assert!(ChainPosition::End.extends_previous());
        assert!(!ChainPosition::End.continues());
        assert!(ChainPosition::Start.continues());
        assert!(!ChainPosition::Start.extends_previous());
    }
}
