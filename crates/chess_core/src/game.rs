use log::debug;

use crate::board::{Board, GameStatus};
use crate::error::ChessError;
use crate::history::MoveHistory;
use crate::moves::Move;
use crate::piece::Color;
use crate::position::Position;

/// One game session: the single mutable board plus its undo history.
///
/// This is the surface the presentation layer talks to. It validates every
/// request against the current legal set before mutating anything; a search
/// component works on its own scratch board and never touches this one.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: MoveHistory,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            history: MoveHistory::new(),
        }
    }

    /// Resets to the initial position and clears the history.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.history.clear();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Classification of the current position for the side to move.
    pub fn status(&self) -> GameStatus {
        self.board.classify_position(self.board.side_to_move())
    }

    /// Legal moves of the piece on `from`, for destination highlighting.
    /// Errors when the square is empty or holds an opponent piece.
    pub fn legal_moves_from(&self, from: Position) -> Result<Vec<Move>, ChessError> {
        let Some(piece) = self.board.get_piece(from) else {
            return Err(ChessError::IllegalMove {
                from,
                to: from,
                reason: "no piece on the selected square",
            });
        };
        if piece.color != self.board.side_to_move() {
            return Err(ChessError::IllegalMove {
                from,
                to: from,
                reason: "the selected piece belongs to the opponent",
            });
        }
        Ok(self.board.legal_moves_from(from))
    }

    /// Applies a move from the current legal set and records its inverse.
    /// Returns the classification for the new side to move so the caller can
    /// stop further input on checkmate or stalemate.
    pub fn apply_move(&mut self, mv: &Move) -> Result<GameStatus, ChessError> {
        let legal = self.legal_moves_from(mv.from)?;
        if !legal.contains(mv) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
                reason: "move is not legal in this position",
            });
        }
        let undo = self.board.apply_move(mv)?;
        self.history.record(*mv, undo);
        let status = self.status();
        debug!(
            "applied {} -> {} ({:?}), position now {:?}",
            mv.from, mv.to, mv.move_type, status
        );
        Ok(status)
    }

    /// Reverses the most recently applied move.
    pub fn undo_last(&mut self) -> Result<Move, ChessError> {
        let entry = self.history.pop().ok_or(ChessError::NoHistory)?;
        self.board.undo_move(entry.undo);
        debug!("undid {} -> {}", entry.mv.from, entry.mv.to);
        Ok(entry.mv)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
