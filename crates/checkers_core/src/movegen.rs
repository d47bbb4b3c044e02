//! Move generation.
//!
//! `piece_moves_into` is the only place moves are produced. The capture scan
//! used for mandatory capture, the selection moves and the AI's branching all
//! come from it, so they can never disagree about which pieces can jump.

use crate::{board::Board, types::*};

/// Generate the moves of the piece on `from` into `out`, ignoring the
/// mandatory-capture rule. With `jumps_only` quiet moves are suppressed, which
/// is what a piece in the middle of a multi-jump chain may do.
pub fn piece_moves_into(
    board: &Board,
    from: Square,
    rules: &Rules,
    jumps_only: bool,
    out: &mut Vec<Move>,
) {
    out.clear();
    let Some(pc) = board.piece_at(from) else {
        return;
    };

    if pc.is_king {
        if rules.flying_kings {
            gen_flying_king(board, from, pc.color, jumps_only, out);
        } else {
            for (dr, dc) in DIAGONALS {
                gen_step(board, from, pc.color, (dr, dc), jumps_only, out);
            }
        }
    } else {
        let fwd = pc.color.forward();
        for dc in [-1, 1] {
            gen_step(board, from, pc.color, (fwd, dc), jumps_only, out);
        }
        if rules.backward_capture {
            for dc in [-1, 1] {
                gen_step(board, from, pc.color, (-fwd, dc), true, out);
            }
        }
    }
}

/// Convenience wrapper returning a fresh vector.
pub fn piece_moves(board: &Board, from: Square, rules: &Rules, jumps_only: bool) -> Vec<Move> {
    let mut out = Vec::with_capacity(16);
    piece_moves_into(board, from, rules, jumps_only, &mut out);
    out
}

/// One-square step or short capture along `dir`.
fn gen_step(
    board: &Board,
    from: Square,
    color: Color,
    (dr, dc): (i8, i8),
    capture_only: bool,
    out: &mut Vec<Move>,
) {
    let Some(next) = from.offset(dr, dc) else {
        return;
    };
    match board.piece_at(next) {
        None => {
            if !capture_only {
                out.push(Move::Quiet { from, to: next });
            }
        }
        Some(pc) if pc.color != color => {
            if let Some(landing) = next.offset(dr, dc)
                && board.is_empty(landing)
            {
                out.push(Move::Jump {
                    from,
                    to: landing,
                    captured: next,
                });
            }
        }
        _ => {}
    }
}

/// Flying king: slides over empty squares, captures the first enemy on the ray
/// and may land on any empty square beyond it. A friendly piece, or any second
/// piece after the enemy, ends the ray.
fn gen_flying_king(board: &Board, from: Square, color: Color, jumps_only: bool, out: &mut Vec<Move>) {
    for (dr, dc) in DIAGONALS {
        let mut enemy: Option<Square> = None;
        let mut cur = from;
        while let Some(next) = cur.offset(dr, dc) {
            cur = next;
            match (board.piece_at(next), enemy) {
                (None, None) => {
                    if !jumps_only {
                        out.push(Move::Quiet { from, to: next });
                    }
                }
                (None, Some(captured)) => out.push(Move::Jump {
                    from,
                    to: next,
                    captured,
                }),
                (Some(pc), None) if pc.color != color => enemy = Some(next),
                _ => break,
            }
        }
    }
}

/// Every capture available to `player`, flattened. This is the whole-board
/// scan behind mandatory capture and the AI's jump-first rule.
pub fn player_jumps(board: &Board, player: Color, rules: &Rules) -> Vec<Move> {
    let mut jumps = Vec::new();
    let mut buf = Vec::with_capacity(16);
    for (sq, _) in board.pieces_of(player) {
        piece_moves_into(board, sq, rules, true, &mut buf);
        jumps.extend_from_slice(&buf);
    }
    jumps
}

/// Legal moves for `player`, grouped by origin square.
///
/// `chain` is the piece locked into an unfinished multi-jump: only its
/// captures are legal. Otherwise, when mandatory capture is on and any piece
/// can jump, only jumps survive and pieces without one drop out.
pub fn legal_move_sets(
    board: &Board,
    player: Color,
    rules: &Rules,
    chain: Option<Square>,
) -> Vec<MoveSet> {
    if let Some(locked) = chain {
        let moves = piece_moves(board, locked, rules, true);
        if moves.is_empty() {
            return Vec::new();
        }
        return vec![MoveSet {
            from: locked,
            moves,
        }];
    }

    let mut sets = Vec::new();
    let mut any_jump = false;
    let mut buf = Vec::with_capacity(16);
    for (sq, _) in board.pieces_of(player) {
        piece_moves_into(board, sq, rules, false, &mut buf);
        if buf.is_empty() {
            continue;
        }
        any_jump |= buf.iter().any(Move::is_jump);
        sets.push(MoveSet {
            from: sq,
            moves: buf.clone(),
        });
    }

    if rules.mandatory_capture && any_jump {
        sets.retain_mut(|set| {
            set.moves.retain(Move::is_jump);
            !set.moves.is_empty()
        });
    }
    sets
}

/// Flattened form of `legal_move_sets`.
pub fn legal_moves(board: &Board, player: Color, rules: &Rules, chain: Option<Square>) -> Vec<Move> {
    legal_move_sets(board, player, rules, chain)
        .into_iter()
        .flat_map(|set| set.moves)
        .collect()
}

/// Number of legal moves, used for mobility and terminal detection.
pub fn count_legal_moves(board: &Board, player: Color, rules: &Rules) -> usize {
    legal_move_sets(board, player, rules, None)
        .iter()
        .map(|set| set.moves.len())
        .sum()
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
