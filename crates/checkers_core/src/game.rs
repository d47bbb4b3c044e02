//! The authoritative game state machine.
//!
//! Per turn: `Idle` (nothing selected) -> `Selected` (piece + legal moves) ->
//! either the turn passes or a capture chain keeps the same piece selected.
//! Once a winner is set every mutation is rejected until `new_game`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    board::Board,
    error::{GameError, GameResult},
    history::{Capture, ChainPosition, MoveHistory, MoveRecord},
    movegen::{legal_move_sets, piece_moves, player_jumps},
    types::*,
};

/// What happened after a successful `apply_move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Applied {
    /// The turn passed to `next`.
    TurnPassed { next: Color },
    /// The capturing piece, now on `piece`, must jump again. Same player.
    ChainContinues { piece: Square },
    /// The move ended the game.
    GameOver { winner: Color },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    rules: Rules,
    /// Rules requested during a chain; they apply once the chain ends
    pending_rules: Option<Rules>,
    selected: Option<Square>,
    valid_moves: Vec<Move>,
    mandatory_jumps: Vec<Move>,
    /// Piece locked into an unfinished multi-jump
    chain: Option<Square>,
    pieces: [u8; 2],
    winner: Option<Color>,
    turn: u32,
    history: MoveHistory,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    /// Fresh game from the standard layout, Red to move.
    pub fn with_rules(rules: Rules) -> Self {
        let mut g = GameState {
            board: Board::initial(),
            current_player: Color::Red,
            rules,
            pending_rules: None,
            selected: None,
            valid_moves: Vec::new(),
            mandatory_jumps: Vec::new(),
            chain: None,
            pieces: [12, 12],
            winner: None,
            turn: 1,
            history: MoveHistory::new(),
        };
        g.refresh_mandatory_jumps();
        g
    }

    /// Game starting from an arbitrary position. Piece counters are taken from
    /// the board, and a side to move without moves has already lost.
    pub fn from_board(board: Board, to_move: Color, rules: Rules) -> GameResult<Self> {
        if let Some((sq, _)) = board.pieces().find(|(sq, _)| !sq.is_playable()) {
            return Err(GameError::Inconsistent {
                reason: format!("piece on light square {sq}"),
            });
        }
        let pieces = [board.count(Color::Red), board.count(Color::Black)];
        let mut g = GameState {
            board,
            current_player: to_move,
            rules,
            pending_rules: None,
            selected: None,
            valid_moves: Vec::new(),
            mandatory_jumps: Vec::new(),
            chain: None,
            pieces,
            winner: None,
            turn: 1,
            history: MoveHistory::new(),
        };
        g.refresh_mandatory_jumps();
        g.check_game_over();
        Ok(g)
    }

    /// Back to the starting layout, keeping the current rules.
    pub fn new_game(&mut self) {
        *self = GameState::with_rules(self.pending_rules.unwrap_or(self.rules));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Rules move generation currently uses.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Rules set during an unfinished chain, waiting for the chain to end.
    pub fn pending_rules(&self) -> Option<Rules> {
        self.pending_rules
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Legal destinations for the current selection.
    pub fn valid_moves(&self) -> &[Move] {
        &self.valid_moves
    }

    /// Every capture the side to move has. Binding only under mandatory capture.
    pub fn mandatory_jumps(&self) -> &[Move] {
        &self.mandatory_jumps
    }

    pub fn in_multi_jump(&self) -> bool {
        self.chain.is_some()
    }

    /// Square of the piece that must continue capturing, if any.
    pub fn chain_piece(&self) -> Option<Square> {
        self.chain
    }

    pub fn pieces_remaining(&self, color: Color) -> u8 {
        self.pieces[color.idx()]
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Replace the rule set. Takes effect on the next move generation, which
    /// includes the moves of the current selection. During a capture chain the
    /// change waits until the chain ends, so the chain finishes under the
    /// rules it started with.
    pub fn set_rules(&mut self, rules: Rules) {
        if self.chain.is_some() {
            self.pending_rules = (rules != self.rules).then_some(rules);
            if self.pending_rules.is_some() {
                debug!(?rules, "rule change deferred until the chain ends");
            }
            return;
        }
        self.pending_rules = None;
        self.rules = rules;
        self.refresh_mandatory_jumps();
        if let Some(sq) = self.selected {
            self.valid_moves = self.moves_for(sq);
        }
    }

    /// Legal moves of the side to move, grouped by origin.
    pub fn legal_move_sets(&self) -> Vec<MoveSet> {
        if self.is_over() {
            return Vec::new();
        }
        legal_move_sets(&self.board, self.current_player, &self.rules, self.chain)
    }

    /// Legal moves of the piece on `sq` under every active rule (mandatory
    /// capture and an unfinished chain included). Pieces of the side not on
    /// move are evaluated as if it were their turn.
    pub fn moves_for(&self, sq: Square) -> Vec<Move> {
        let Some(pc) = self.board.piece_at(sq) else {
            return Vec::new();
        };
        let chain = if pc.color == self.current_player {
            self.chain
        } else {
            None
        };
        legal_move_sets(&self.board, pc.color, &self.rules, chain)
            .into_iter()
            .find(|set| set.from == sq)
            .map(|set| set.moves)
            .unwrap_or_default()
    }

    /// Selects the piece on `sq`. A piece of the side to move that is blocked
    /// by mandatory capture is still selectable and yields no moves.
    pub fn select_piece(&mut self, sq: Square) -> GameResult<&[Move]> {
        if let Some(winner) = self.winner {
            return Err(GameError::GameOver { winner });
        }
        let pc = self
            .board
            .piece_at(sq)
            .ok_or(GameError::EmptySquare { square: sq })?;
        if pc.color != self.current_player {
            return Err(GameError::NotYourPiece {
                square: sq,
                owner: pc.color,
                to_move: self.current_player,
            });
        }
        if let Some(locked) = self.chain
            && locked != sq
        {
            return Err(GameError::ChainLocked { locked });
        }

        self.selected = Some(sq);
        self.valid_moves = self.moves_for(sq);
        Ok(&self.valid_moves)
    }

    /// Moves the selected piece to `to`.
    pub fn apply_move(&mut self, to: Square) -> GameResult<Applied> {
        if let Some(winner) = self.winner {
            return Err(GameError::GameOver { winner });
        }
        let from = self.selected.ok_or(GameError::NoSelection)?;
        let mv = self
            .valid_moves
            .iter()
            .copied()
            .find(|m| m.to() == to)
            .ok_or(GameError::IllegalMove { from, to })?;
        self.execute(mv)
    }

    /// Select-and-apply in one call, for callers that already hold a `Move`.
    pub fn play(&mut self, mv: Move) -> GameResult<Applied> {
        self.select_piece(mv.from())?;
        if !self.valid_moves.contains(&mv) {
            return Err(GameError::IllegalMove {
                from: mv.from(),
                to: mv.to(),
            });
        }
        self.execute(mv)
    }

    fn execute(&mut self, mv: Move) -> GameResult<Applied> {
        let from = mv.from();
        let to = mv.to();
        let player = self.current_player;
        let mut piece = self.board.take(from).ok_or_else(|| GameError::Inconsistent {
            reason: format!("legal move {mv} starts on an empty square"),
        })?;
        let was_king = piece.is_king;
        let extends_previous = self.chain.is_some();

        let capture = match mv {
            Move::Jump { captured, .. } => {
                let taken = self.board.take(captured).ok_or_else(|| GameError::Inconsistent {
                    reason: format!("jump {mv} captures an empty square"),
                })?;
                self.pieces[taken.color.idx()] -= 1;
                Some(Capture {
                    piece: taken,
                    square: captured,
                })
            }
            Move::Quiet { .. } => None,
        };
        self.board.set_piece(to, Some(piece));

        let mut record = MoveRecord {
            player,
            mv,
            capture,
            was_king,
            became_king: false,
            chain: ChainPosition::Single,
            turn: self.turn,
            rules: self.rules,
        };

        if mv.is_jump() {
            let further = piece_moves(&self.board, to, &self.rules, true);
            if !further.is_empty() {
                record.chain = ChainPosition::from_flags(extends_previous, true);
                self.history.push(record);
                self.chain = Some(to);
                self.selected = Some(to);
                self.valid_moves = further.clone();
                self.mandatory_jumps = further;
                debug!(%player, %mv, "capture chain continues");
                return Ok(Applied::ChainContinues { piece: to });
            }
        }

        if !piece.is_king && to.row == player.promotion_row() {
            piece.is_king = true;
            self.board.set_piece(to, Some(piece));
            record.became_king = true;
        }
        record.chain = ChainPosition::from_flags(extends_previous, false);
        self.history.push(record);
        debug!(%player, %mv, "move applied");

        self.chain = None;
        if let Some(rules) = self.pending_rules.take() {
            self.rules = rules;
        }
        self.switch_turn();
        if self.check_game_over()
            && let Some(winner) = self.winner
        {
            return Ok(Applied::GameOver { winner });
        }
        Ok(Applied::TurnPassed {
            next: self.current_player,
        })
    }

    fn switch_turn(&mut self) {
        self.current_player = self.current_player.other();
        self.selected = None;
        self.valid_moves.clear();
        self.turn += 1;
        self.refresh_mandatory_jumps();
    }

    fn refresh_mandatory_jumps(&mut self) {
        self.mandatory_jumps = match self.chain {
            Some(locked) => piece_moves(&self.board, locked, &self.rules, true),
            None => player_jumps(&self.board, self.current_player, &self.rules),
        };
    }

    /// The side to move loses with no pieces or no legal moves. The result is
    /// sticky until `new_game` or an undo.
    pub fn check_game_over(&mut self) -> bool {
        if self.winner.is_some() {
            return true;
        }
        let me = self.current_player;
        let winner = if self.pieces[me.idx()] == 0 {
            Some(me.other())
        } else if self.pieces[me.other().idx()] == 0 {
            Some(me)
        } else if legal_move_sets(&self.board, me, &self.rules, self.chain).is_empty() {
            Some(me.other())
        } else {
            None
        };

        if let Some(w) = winner {
            info!(winner = %w, turn = self.turn, "game over");
            self.winner = Some(w);
            self.selected = None;
            self.valid_moves.clear();
            true
        } else {
            false
        }
    }

    /// Takes back `count` moves and returns how many records were removed.
    ///
    /// A capture chain counts as one move: popping any hop of a chain keeps
    /// popping until the hop that started it, so turn ownership is restored
    /// together with the board.
    pub fn undo_last_move(&mut self, count: usize) -> usize {
        let mut removed = 0;
        for _ in 0..count {
            let Some(mut rec) = self.history.pop() else {
                break;
            };
            self.revert(&rec);
            removed += 1;
            while rec.chain.extends_previous() {
                let Some(prev) = self.history.pop() else {
                    break;
                };
                self.revert(&prev);
                removed += 1;
                rec = prev;
            }
            self.current_player = rec.player;
            self.turn = rec.turn;
        }

        if removed > 0 {
            self.selected = None;
            self.valid_moves.clear();
            self.chain = None;
            if let Some(rules) = self.pending_rules.take() {
                self.rules = rules;
            }
            self.winner = None;
            self.refresh_mandatory_jumps();
            debug!(removed, to_move = %self.current_player, "undo");
        }
        removed
    }

    /// Undo everything, leaving the position the game started from.
    pub fn undo_all(&mut self) -> usize {
        self.undo_last_move(usize::MAX)
    }

    fn revert(&mut self, rec: &MoveRecord) {
        if let Some(mut pc) = self.board.take(rec.to()) {
            pc.is_king = rec.was_king;
            self.board.set_piece(rec.from(), Some(pc));
        }
        if let Some(cap) = rec.capture {
            self.board.set_piece(cap.square, Some(cap.piece));
            self.pieces[cap.piece.color.idx()] += 1;
        }
    }

    /// Copy for search: identical position and flags, no history.
    pub fn search_copy(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            current_player: self.current_player,
            rules: self.rules,
            pending_rules: self.pending_rules,
            selected: self.selected,
            valid_moves: self.valid_moves.clone(),
            mandatory_jumps: self.mandatory_jumps.clone(),
            chain: self.chain,
            pieces: self.pieces,
            winner: self.winner,
            turn: self.turn,
            history: MoveHistory::new(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            pieces: self
                .board
                .pieces()
                .map(|(square, pc)| PieceView {
                    square,
                    color: pc.color,
                    is_king: pc.is_king,
                })
                .collect(),
            current_player: self.current_player,
            selected: self.selected,
            valid_moves: self.valid_moves.clone(),
            mandatory_jumps: self.mandatory_jumps.clone(),
            red_pieces: self.pieces[Color::Red.idx()],
            black_pieces: self.pieces[Color::Black.idx()],
            multi_jump: self.chain.is_some(),
            winner: self.winner,
            turn: self.turn,
        }
    }
}

/// Piece as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub square: Square,
    pub color: Color,
    pub is_king: bool,
}

/// Read-only view handed to rendering, UI and analytics collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub pieces: Vec<PieceView>,
    pub current_player: Color,
    pub selected: Option<Square>,
    pub valid_moves: Vec<Move>,
    pub mandatory_jumps: Vec<Move>,
    pub red_pieces: u8,
    pub black_pieces: u8,
    pub multi_jump: bool,
    pub winner: Option<Color>,
    pub turn: u32,
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
