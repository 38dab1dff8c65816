use chess_core::{Board, ChessError, Color, Move};
use log::debug;

use crate::search::search_best_move;

const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 6; // deeper than this is too slow for interactive play
const DEFAULT_DEPTH: u8 = 3;

/// The computer opponent: a configured search depth wrapped around the
/// alpha-beta search. The configured difficulty maps directly to depth.
#[derive(Debug, Clone)]
pub struct EnhancedChessAI {
    depth: u8,
}

impl EnhancedChessAI {
    pub fn new(difficulty: u8) -> Self {
        Self {
            depth: difficulty.clamp(MIN_DEPTH, MAX_DEPTH),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Chooses a move for `color`. The caller's board is left untouched;
    /// the search runs on a private scratch copy. Fails with `NoLegalMove`
    /// when the game is already over for that side.
    pub fn choose_move(&self, board: &Board, color: Color) -> Result<Move, ChessError> {
        let mut scratch = board.clone();
        let mv = search_best_move(&mut scratch, color, self.depth)?;
        debug!(
            "{:?} plays {} -> {} (depth {})",
            color, mv.from, mv.to, self.depth
        );
        Ok(mv)
    }

    /// A hint for the human side is just the engine's own choice, shown
    /// instead of applied.
    pub fn hint(&self, board: &Board, color: Color) -> Result<Move, ChessError> {
        self.choose_move(board, color)
    }
}

impl Default for EnhancedChessAI {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
