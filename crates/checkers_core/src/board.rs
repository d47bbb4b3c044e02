use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::{GameError, GameResult},
    types::*,
};

/// 8x8 mailbox of pieces. Each piece is owned by the cell it stands on and is
/// moved by relocation, never duplicated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Twelve men per side on the dark squares: Black on rows 0-2, Red on rows 5-7.
    pub fn initial() -> Self {
        let mut b = Board::empty();
        for row in 0..BOARD_SIZE {
            let color = match row {
                0..=2 => Color::Black,
                5..=7 => Color::Red,
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                if let Some(sq) = Square::new(row, col)
                    && sq.is_playable()
                {
                    b.set_piece(sq, Some(Piece::man(color)));
                }
            }
        }
        b
    }

    /// Parses eight text rows, top row first. `.` or `-` is empty, `r`/`b` are
    /// men and `R`/`B` kings. Whitespace inside a row is ignored.
    pub fn from_diagram(diagram: &str) -> GameResult<Self> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(GameError::Parse(format!(
                "expected 8 rows, found {}",
                rows.len()
            )));
        }

        let mut b = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE as usize {
                return Err(GameError::Parse(format!(
                    "row {row} has {} cells",
                    cells.len()
                )));
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let piece = match ch {
                    '.' | '-' => continue,
                    'r' => Piece::man(Color::Red),
                    'R' => Piece::king(Color::Red),
                    'b' => Piece::man(Color::Black),
                    'B' => Piece::king(Color::Black),
                    other => {
                        return Err(GameError::Parse(format!("unknown piece '{other}'")));
                    }
                };
                let sq = Square::new(row as i8, col as i8).ok_or(GameError::OffBoard {
                    row: row as i8,
                    col: col as i8,
                })?;
                if !sq.is_playable() {
                    return Err(GameError::Parse(format!("piece on light square {sq}")));
                }
                b.set_piece(sq, Some(piece));
            }
        }
        Ok(b)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let (r, c) = sq.idx();
        self.cells[r][c]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        let (r, c) = sq.idx();
        self.cells[r][c] = pc;
    }

    /// Removes and returns the piece on `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        let (r, c) = sq.idx();
        self.cells[r][c].take()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Every occupied square with its piece, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.map(|pc| {
                    (
                        Square {
                            row: r as i8,
                            col: c as i8,
                        },
                        pc,
                    )
                })
            })
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.color == color)
    }

    pub fn count(&self, color: Color) -> u8 {
        self.pieces_of(color).count() as u8
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.map(Piece::symbol).unwrap_or('.'))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
