use chess_core::{Board, Color, PieceType, Position};

// Standard piece values in centipawns (100 = 1 pawn)
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 20000; // losing the king means losing the game

// Positional weights per centrality step (0 at the edge corners, 6 on the
// four center squares). The king is pushed away from the center instead.
const PAWN_CENTER_WEIGHT: i32 = 2;
const MINOR_CENTER_WEIGHT: i32 = 5;
const QUEEN_CENTER_WEIGHT: i32 = 1;
const KING_CENTER_WEIGHT: i32 = -4;

const CHECK_SCORE: i32 = 50;

/// Scores a position from `perspective`'s point of view; positive favors
/// that side. Stateless and deterministic, and antisymmetric by
/// construction: `evaluate_position(b, White) == -evaluate_position(b, Black)`.
pub fn evaluate_position(board: &Board, perspective: Color) -> i32 {
    let mut score = 0;

    // material plus a small mirror-symmetric positional bonus
    for (&pos, piece) in board.pieces() {
        let value = piece_value(piece.piece_type) + position_bonus(piece.piece_type, pos);
        if piece.color == Color::White {
            score += value;
        } else {
            score -= value;
        }
    }

    // being in check is bad, giving check is good
    if board.is_in_check(Color::White) {
        score -= CHECK_SCORE;
    }
    if board.is_in_check(Color::Black) {
        score += CHECK_SCORE;
    }

    match perspective {
        Color::White => score,
        Color::Black => -score,
    }
}

fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

fn position_bonus(piece_type: PieceType, pos: Position) -> i32 {
    let weight = match piece_type {
        PieceType::Pawn => PAWN_CENTER_WEIGHT,
        PieceType::Knight | PieceType::Bishop => MINOR_CENTER_WEIGHT,
        PieceType::Rook => 0,
        PieceType::Queen => QUEEN_CENTER_WEIGHT,
        PieceType::King => KING_CENTER_WEIGHT,
    };
    weight * centrality(pos)
}

/// 6 on d4/d5/e4/e5 falling to 0 in the corners. Invariant under the board
/// mirroring that swaps the colors, which keeps the evaluation symmetric.
fn centrality(pos: Position) -> i32 {
    6 - center_distance(pos.file) - center_distance(pos.rank)
}

fn center_distance(coordinate: u8) -> i32 {
    let c = coordinate as i32;
    if c <= 3 {
        3 - c
    } else {
        c - 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centrality_peaks_in_the_middle() {
        assert_eq!(centrality(Position::from_algebraic("e4").unwrap()), 6);
        assert_eq!(centrality(Position::from_algebraic("d5").unwrap()), 6);
        assert_eq!(centrality(Position::from_algebraic("a1").unwrap()), 0);
        assert_eq!(centrality(Position::from_algebraic("h8").unwrap()), 0);
    }

    #[test]
    fn initial_position_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluate_position(&board, Color::White), 0);
        assert_eq!(evaluate_position(&board, Color::Black), 0);
    }
}
