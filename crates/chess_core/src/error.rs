use crate::{piece::Color, position::Position};
use thiserror::Error;

/// Unified error type for the rules engine and game session.
///
/// Every failure is local and synchronous; nothing is retried internally and
/// the engine never substitutes a "closest legal" request for an illegal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChessError {
    /// Coordinates outside the 8x8 board.
    #[error("invalid square: file {file}, rank {rank}")]
    InvalidSquare { file: i8, rank: i8 },

    /// A move (or move query) that the current position does not allow.
    #[error("illegal move {from} -> {to}: {reason}")]
    IllegalMove {
        from: Position,
        to: Position,
        reason: &'static str,
    },

    /// Search was invoked for a side with no legal moves; the caller should
    /// have checked for game over first.
    #[error("no legal move available for {0:?}")]
    NoLegalMove(Color),

    /// Undo requested with an empty move history.
    #[error("no move in history to undo")]
    NoHistory,
}
