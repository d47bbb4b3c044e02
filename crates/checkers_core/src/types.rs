use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: i8 = 8;

/// The four diagonal directions as (row delta, col delta).
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Black];

    pub fn other(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }

    /// Row delta of a man's forward step. Red starts at the bottom and moves up.
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    /// Row on which a man of this colour is crowned.
    pub fn promotion_row(self) -> i8 {
        match self {
            Color::Red => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }

    /// Row this colour starts from (the opponent's promotion row).
    pub fn home_row(self) -> i8 {
        self.other().promotion_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Self {
            color,
            is_king: false,
        }
    }

    pub fn king(color: Color) -> Self {
        Self {
            color,
            is_king: true,
        }
    }

    pub fn symbol(self) -> char {
        match (self.color, self.is_king) {
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
            (Color::Black, false) => 'b',
            (Color::Black, true) => 'B',
        }
    }
}

/// A board coordinate. Row 0 is Black's home row, row 7 is Red's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    /// Returns the square if it lies on the board.
    pub fn new(row: i8, col: i8) -> Option<Square> {
        if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Dark squares are the only ones pieces ever stand on.
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        Square::new(self.row + d_row, self.col + d_col)
    }

    pub fn in_center(self) -> bool {
        (3..=4).contains(&self.row) && (2..=5).contains(&self.col)
    }

    pub(crate) fn idx(self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::notation::square_name(*self))
    }
}

/// A single half-move: one step or one capture hop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    Quiet {
        from: Square,
        to: Square,
    },
    Jump {
        from: Square,
        to: Square,
        captured: Square,
    },
}

impl Move {
    pub fn from(&self) -> Square {
        match *self {
            Move::Quiet { from, .. } | Move::Jump { from, .. } => from,
        }
    }

    pub fn to(&self) -> Square {
        match *self {
            Move::Quiet { to, .. } | Move::Jump { to, .. } => to,
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Move::Jump { .. })
    }

    pub fn captured(&self) -> Option<Square> {
        match *self {
            Move::Jump { captured, .. } => Some(captured),
            Move::Quiet { .. } => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::notation::move_name(*self))
    }
}

/// All legal moves from one origin square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSet {
    pub from: Square,
    pub moves: Vec<Move>,
}

/// Rule options. They shape move generation only, never the board itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Men may capture backwards (they still only step forwards).
    pub backward_capture: bool,
    /// Kings slide any distance and may land anywhere past the captured piece.
    pub flying_kings: bool,
    /// A capture must be played whenever one is available.
    pub mandatory_capture: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            backward_capture: true,
            flying_kings: true,
            mandatory_capture: true,
        }
    }
}
