// Search-based computer opponent: evaluator plus alpha-beta move selection.
pub mod ai;
pub mod evaluation;
pub mod search;

pub use ai::EnhancedChessAI;
pub use evaluation::evaluate_position;
pub use search::{search_best_move, MATE_SCORE};
