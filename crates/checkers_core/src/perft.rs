use crate::game::GameState;

/// Leaf count of the move tree, one ply per hop. A chain continuation is a
/// ply of its own, played by the same side.
pub fn perft(game: &GameState, depth: u8) -> u64 {
    if depth == 0 || game.is_over() {
        return 1;
    }

    let mut nodes = 0u64;
    for set in game.legal_move_sets() {
        for mv in set.moves {
            let mut child = game.search_copy();
            if child.play(mv).is_ok() {
                nodes += perft(&child, depth - 1);
            }
        }
    }
    nodes
}
