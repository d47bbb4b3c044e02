//! Static evaluation.

use checkers_core::{Board, Color, DIAGONALS, GameState, Rules, Square, count_legal_moves};

use crate::difficulty::Weights;

/// Scores the position for `player`. Positive is good for `player`.
///
/// Material and kings count for both sides; back-row, centre and threat
/// terms only for `player`'s own pieces. Mobility compares legal move counts.
/// Formation and tempo are only active when their weight is non-zero.
pub fn evaluate_position(game: &GameState, player: Color, w: &Weights) -> i32 {
    let board = game.board();
    let rules = game.rules();
    let mut score = 0i32;

    for (sq, pc) in board.pieces() {
        let sign = if pc.color == player { 1 } else { -1 };
        score += w.piece * sign;
        if pc.is_king {
            score += w.king * sign;
        }

        if pc.color == player {
            if sq.row == player.home_row() {
                score += w.back_row;
            }
            if sq.in_center() {
                score += w.center;
            }
            score -= count_threats(board, sq, &rules) as i32 * w.threat;
        }

        if w.formation != 0 {
            score += formation(board, sq) as i32 * w.formation * sign;
        }
    }

    let mine = count_legal_moves(board, player, &rules) as i32;
    let theirs = count_legal_moves(board, player.other(), &rules) as i32;
    score += (mine - theirs) * w.mobility;

    if w.tempo != 0 {
        score += advancement(board, player) * w.tempo;
    }
    score
}

/// Number of adjacent enemies that could capture the piece on `sq` right now:
/// the enemy sits diagonally next to it, the square on the far side is empty,
/// and the enemy is allowed to capture in that direction.
pub fn count_threats(board: &Board, sq: Square, rules: &Rules) -> u32 {
    let Some(pc) = board.piece_at(sq) else {
        return 0;
    };

    let mut threats = 0;
    for (dr, dc) in DIAGONALS {
        let (Some(attacker), Some(landing)) = (sq.offset(dr, dc), sq.offset(-dr, -dc)) else {
            continue;
        };
        let Some(enemy) = board.piece_at(attacker) else {
            continue;
        };
        if enemy.color == pc.color || !board.is_empty(landing) {
            continue;
        }
        // The attacker jumps in direction (-dr, -dc)
        let forward = -dr == enemy.color.forward();
        if enemy.is_king || forward || rules.backward_capture {
            threats += 1;
        }
    }
    threats
}

/// Friendly pieces diagonally adjacent to the piece on `sq`.
pub fn formation(board: &Board, sq: Square) -> u32 {
    let Some(pc) = board.piece_at(sq) else {
        return 0;
    };
    DIAGONALS
        .iter()
        .filter_map(|&(dr, dc)| sq.offset(dr, dc))
        .filter(|&n| board.piece_at(n).is_some_and(|other| other.color == pc.color))
        .count() as u32
}

/// Sum over `player`'s men of rows travelled from the home row.
pub fn advancement(board: &Board, player: Color) -> i32 {
    board
        .pieces_of(player)
        .filter(|(_, pc)| !pc.is_king)
        .map(|(sq, _)| (sq.row - player.home_row()).abs() as i32)
        .sum()
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
