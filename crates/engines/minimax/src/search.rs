//! Negamax search with alpha-beta pruning.
//!
//! Every node is a copy of the caller's game with one more hop applied, so
//! nothing the search does is visible outside it. A hop that continues a
//! capture chain leaves the same side on move: its child is searched with
//! the same window and its score is not negated.
//!
//! Leaves are always evaluated for the root player (the evaluation is not
//! symmetric) and then signed for the side on move.

use checkers_core::{Color, GameState, Move, SearchClock, player_jumps};

use crate::difficulty::Weights;
use crate::eval::evaluate_position;

/// Score of a won position, before the depth bonus.
pub const WIN: i32 = 10_000;

/// Result from pick_best_move indicating whether search completed or was stopped.
pub struct SearchOutcome {
    /// Best move found (if any legal moves exist)
    pub best_move: Option<(Move, i32)>,
    /// True if search was stopped early by the clock
    pub stopped: bool,
}

fn legal_hops(game: &GameState) -> Vec<Move> {
    game.legal_move_sets()
        .into_iter()
        .flat_map(|set| set.moves)
        .collect()
}

/// Terminal score for the side to move. Earlier wins score higher.
fn terminal_score(winner: Color, to_move: Color, depth: u8) -> i32 {
    let score = WIN + depth as i32;
    if winner == to_move { score } else { -score }
}

/// Searches `game` for the side to move and returns the best hop with its score.
pub fn pick_best_move(
    game: &GameState,
    depth: u8,
    weights: &Weights,
    nodes: &mut u64,
    clock: &SearchClock,
) -> SearchOutcome {
    let moves = legal_hops(game);
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            stopped: false,
        };
    }

    let me = game.current_player();
    let mut best = moves[0];
    let mut best_score = i32::MIN + 1;
    let mut alpha = i32::MIN / 2;
    let beta = i32::MAX / 2;
    let mut stopped = false;

    for mv in moves {
        // Check the budget before starting each root move
        if clock.poll(*nodes) {
            stopped = true;
            break;
        }

        let mut child = game.search_copy();
        if child.play(mv).is_err() {
            continue;
        }
        *nodes += 1;

        let (score, was_stopped) = search_child(
            &child,
            me,
            me,
            depth.saturating_sub(1),
            alpha,
            beta,
            weights,
            nodes,
            clock,
        );
        if was_stopped {
            stopped = true;
            break;
        }

        if score > best_score {
            best_score = score;
            best = mv;
        }
        alpha = alpha.max(best_score);
    }

    SearchOutcome {
        best_move: Some((best, best_score)),
        stopped,
    }
}

/// Score of `child` from the point of view of `mover`, the side that just hopped.
#[allow(clippy::too_many_arguments)]
fn search_child(
    child: &GameState,
    mover: Color,
    maximizer: Color,
    depth: u8,
    alpha: i32,
    beta: i32,
    weights: &Weights,
    nodes: &mut u64,
    clock: &SearchClock,
) -> (i32, bool) {
    if child.current_player() == mover {
        negamax(child, maximizer, depth, alpha, beta, weights, nodes, clock)
    } else {
        let (score, stopped) =
            negamax(child, maximizer, depth, -beta, -alpha, weights, nodes, clock);
        (-score, stopped)
    }
}

/// Recursive negamax. Returns (score for the side to move, stopped).
#[allow(clippy::too_many_arguments)]
fn negamax(
    game: &GameState,
    maximizer: Color,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    weights: &Weights,
    nodes: &mut u64,
    clock: &SearchClock,
) -> (i32, bool) {
    if clock.poll(*nodes) {
        return (0, true);
    }

    let me = game.current_player();
    if let Some(winner) = game.winner() {
        return (terminal_score(winner, me, depth), false);
    }
    if depth == 0 {
        let eval = evaluate_position(game, maximizer, weights);
        return (if me == maximizer { eval } else { -eval }, false);
    }

    let moves = legal_hops(game);
    if moves.is_empty() {
        return (terminal_score(me.other(), me, depth), false);
    }

    let mut best = i32::MIN + 1;
    for mv in moves {
        let mut child = game.search_copy();
        if child.play(mv).is_err() {
            continue;
        }
        *nodes += 1;

        let (score, stopped) =
            search_child(&child, me, maximizer, depth - 1, alpha, beta, weights, nodes, clock);
        if stopped {
            return (best, true);
        }

        best = best.max(score);
        alpha = alpha.max(best);
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    (best, false)
}

/// Capture choice with one hop of lookahead: each available jump is applied
/// to a copy and the resulting position evaluated for `player`. A jump that
/// wins the game outright scores `WIN`. Ties keep the first jump in scan order.
pub fn pick_best_jump(game: &GameState, weights: &Weights, nodes: &mut u64) -> Option<(Move, i32)> {
    let player = game.current_player();
    let jumps = if game.in_multi_jump() {
        legal_hops(game)
    } else {
        player_jumps(game.board(), player, &game.rules())
    };

    let mut best: Option<(Move, i32)> = None;
    for mv in jumps {
        let mut child = game.search_copy();
        if child.play(mv).is_err() {
            continue;
        }
        *nodes += 1;
        let score = if child.winner() == Some(player) {
            WIN
        } else {
            evaluate_position(&child, player, weights)
        };
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
