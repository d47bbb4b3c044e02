use crate::{
    error::{GameError, GameResult},
    types::*,
};

/// Column letter `A`..`H` followed by the rank counted from Red's side,
/// so `(5, 1)` reads `B3`.
pub fn square_name(sq: Square) -> String {
    let c = (b'A' + sq.col as u8) as char;
    let r = BOARD_SIZE - sq.row;
    format!("{c}{r}")
}

pub fn parse_square(txt: &str) -> GameResult<Square> {
    let b = txt.trim().as_bytes();
    if b.len() != 2 {
        return Err(GameError::Parse(format!("bad square '{txt}'")));
    }
    let c = b[0].to_ascii_uppercase();
    let r = b[1];
    if !(b'A'..=b'H').contains(&c) || !(b'1'..=b'8').contains(&r) {
        return Err(GameError::Parse(format!("bad square '{txt}'")));
    }
    let col = (c - b'A') as i8;
    let row = BOARD_SIZE - (r - b'0') as i8;
    Square::new(row, col).ok_or_else(|| GameError::Parse(format!("bad square '{txt}'")))
}

/// `B3-A4` for a step, `B3xD5` for a capture.
pub fn move_name(mv: Move) -> String {
    let sep = if mv.is_jump() { 'x' } else { '-' };
    format!("{}{}{}", square_name(mv.from()), sep, square_name(mv.to()))
}
