// Core chess rules: board state, move generation, legality, termination.
pub mod board;
pub mod error;
pub mod game;
pub mod history;
pub mod moves;
pub mod piece;
pub mod position;

// Re-export main types for convenience
pub use board::{Board, CastlingRights, GameStatus, MoveUndo};
pub use error::ChessError;
pub use game::Game;
pub use history::{HistoryEntry, MoveHistory};
pub use moves::{Move, MoveType};
pub use piece::{Color, Piece, PieceType, PROMOTION_TYPES};
pub use position::Position;
