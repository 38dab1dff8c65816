use chess_core::{Board, ChessError, Color, Move};
use log::debug;

use crate::evaluation::evaluate_position;

/// Base score of a delivered checkmate; the remaining search depth is added
/// on top so that faster mates outscore slower ones. Far above anything the
/// evaluator can produce for a non-terminal position.
pub const MATE_SCORE: i32 = 1_000_000;
const DRAW_SCORE: i32 = 0;

/// Finds the best move for `color` by depth-bounded minimax with alpha-beta
/// pruning.
///
/// The board is searched in place through strictly nested apply/undo pairs
/// and is field-for-field unchanged when this returns. Ties are broken by
/// generation order (first best move wins), so identical inputs always
/// produce the identical move.
pub fn search_best_move(board: &mut Board, color: Color, depth: u8) -> Result<Move, ChessError> {
    let depth = depth.max(1);
    let moves = board.generate_legal_moves(color);
    if moves.is_empty() {
        return Err(ChessError::NoLegalMove(color));
    }
    debug!("searching {} root moves at depth {}", moves.len(), depth);

    let mut alpha = -i32::MAX;
    let beta = i32::MAX;
    let mut best: Option<(Move, i32)> = None;
    for mv in moves {
        let undo = board.apply_move(&mv)?;
        let score = alpha_beta(board, color, depth - 1, alpha, beta, false);
        board.undo_move(undo);
        // strict improvement only, so the first best move is kept on ties
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
    }

    let (mv, score) = best.ok_or(ChessError::NoLegalMove(color))?;
    debug!("best move {} -> {} with score {}", mv.from, mv.to, score);
    Ok(mv)
}

/// One ply of the minimax recursion; `maximizing` nodes are those where
/// `root` is to move. Scores are always from `root`'s perspective.
fn alpha_beta(
    board: &mut Board,
    root: Color,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> i32 {
    let to_move = board.side_to_move();
    let moves = board.generate_legal_moves(to_move);
    if moves.is_empty() {
        // checkmate or stalemate: terminal regardless of remaining depth
        return if board.is_in_check(to_move) {
            if maximizing {
                -(MATE_SCORE + depth as i32)
            } else {
                MATE_SCORE + depth as i32
            }
        } else {
            DRAW_SCORE
        };
    }
    if depth == 0 {
        return evaluate_position(board, root);
    }

    let mut best = if maximizing { -i32::MAX } else { i32::MAX };
    for mv in moves {
        let Ok(undo) = board.apply_move(&mv) else {
            continue;
        };
        let score = alpha_beta(board, root, depth - 1, alpha, beta, !maximizing);
        board.undo_move(undo);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break; // remaining siblings cannot affect the result
        }
    }
    best
}
