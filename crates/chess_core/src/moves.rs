use crate::board::Board;
use crate::piece::{Piece, PieceType, PROMOTION_TYPES};
use crate::position::Position;

/// What kind of state transition a move performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Normal,
    Capture,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    Promotion,
}

/// An immutable description of a move. Applying it is a separate operation
/// on `Board`; two moves are equal iff every field matches.
///
/// `piece` and `captured` are snapshots of the pieces as they stood before
/// the move, which is what makes the inverse delta exact on undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub move_type: MoveType,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(from: Position, to: Position, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            move_type: MoveType::Normal,
            promotion: None,
        }
    }

    pub fn capture(from: Position, to: Position, piece: Piece, victim: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: Some(victim),
            move_type: MoveType::Capture,
            promotion: None,
        }
    }

    pub fn promotion(
        from: Position,
        to: Position,
        piece: Piece,
        victim: Option<Piece>,
        promotes_to: PieceType,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            captured: victim,
            move_type: MoveType::Promotion,
            promotion: Some(promotes_to),
        }
    }

    pub fn en_passant(from: Position, to: Position, piece: Piece, victim: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: Some(victim),
            move_type: MoveType::EnPassant,
            promotion: None,
        }
    }

    pub fn castle(from: Position, to: Position, piece: Piece, move_type: MoveType) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            move_type,
            promotion: None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Pseudo-legal moves for the piece on `from`: each piece kind's movement
/// rule, ignoring whether the mover's own king ends up attacked. Legality
/// filtering happens in `Board::legal_moves_from`.
pub(crate) fn pseudo_legal_moves(board: &Board, from: Position) -> Vec<Move> {
    let Some(&piece) = board.get_piece(from) else {
        return Vec::new();
    };
    let mut moves = Vec::new();
    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, from, piece, &mut moves),
        PieceType::Knight => leaper_moves(board, from, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceType::Bishop => slider_moves(board, from, piece, &BISHOP_DIRECTIONS, &mut moves),
        PieceType::Rook => slider_moves(board, from, piece, &ROOK_DIRECTIONS, &mut moves),
        PieceType::Queen => {
            slider_moves(board, from, piece, &BISHOP_DIRECTIONS, &mut moves);
            slider_moves(board, from, piece, &ROOK_DIRECTIONS, &mut moves);
        }
        PieceType::King => {
            leaper_moves(board, from, piece, &KING_OFFSETS, &mut moves);
            castle_moves(board, from, piece, &mut moves);
        }
    }
    moves
}

/// Squares the piece on `from` threatens. Differs from move generation for
/// pawns (diagonals only, even onto empty squares) and the king (no
/// castling); used by `Board::is_square_attacked`.
pub(crate) fn attack_squares(board: &Board, from: Position, piece: Piece) -> Vec<Position> {
    match piece.piece_type {
        PieceType::Pawn => {
            let dir = piece.color.pawn_direction();
            [(-1, dir), (1, dir)]
                .iter()
                .filter_map(|&(df, dr)| from.offset(df, dr))
                .collect()
        }
        PieceType::Knight => leaper_targets(from, &KNIGHT_OFFSETS),
        PieceType::Bishop => slider_targets(board, from, &BISHOP_DIRECTIONS),
        PieceType::Rook => slider_targets(board, from, &ROOK_DIRECTIONS),
        PieceType::Queen => {
            let mut targets = slider_targets(board, from, &BISHOP_DIRECTIONS);
            targets.extend(slider_targets(board, from, &ROOK_DIRECTIONS));
            targets
        }
        PieceType::King => leaper_targets(from, &KING_OFFSETS),
    }
}

fn pawn_moves(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
    let dir = piece.color.pawn_direction();

    if let Some(one) = from.offset(0, dir) {
        if board.get_piece(one).is_none() {
            push_pawn_move(from, one, piece, None, moves);
            // double step only from the start square, both squares empty
            if !piece.has_moved {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if board.get_piece(two).is_none() {
                        moves.push(Move::new(from, two, piece));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match board.get_piece(to) {
            Some(&victim) if victim.color != piece.color => {
                push_pawn_move(from, to, piece, Some(victim), moves);
            }
            None if board.en_passant_target() == Some(to) => {
                // the captured pawn sits beside us, not on the destination
                let victim_square = Position {
                    file: to.file,
                    rank: from.rank,
                };
                if let Some(&victim) = board.get_piece(victim_square) {
                    moves.push(Move::en_passant(from, to, piece, victim));
                }
            }
            _ => {}
        }
    }
}

fn push_pawn_move(
    from: Position,
    to: Position,
    piece: Piece,
    victim: Option<Piece>,
    moves: &mut Vec<Move>,
) {
    if to.rank == piece.color.promotion_rank() {
        for promotes_to in PROMOTION_TYPES {
            moves.push(Move::promotion(from, to, piece, victim, promotes_to));
        }
    } else if let Some(victim) = victim {
        moves.push(Move::capture(from, to, piece, victim));
    } else {
        moves.push(Move::new(from, to, piece));
    }
}

fn leaper_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match board.get_piece(to) {
            None => moves.push(Move::new(from, to, piece)),
            Some(&victim) if victim.color != piece.color => {
                moves.push(Move::capture(from, to, piece, victim));
            }
            Some(_) => {}
        }
    }
}

fn slider_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.get_piece(to) {
                None => moves.push(Move::new(from, to, piece)),
                Some(&victim) => {
                    if victim.color != piece.color {
                        moves.push(Move::capture(from, to, piece, victim));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn leaper_targets(from: Position, offsets: &[(i8, i8)]) -> Vec<Position> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .collect()
}

fn slider_targets(board: &Board, from: Position, directions: &[(i8, i8)]) -> Vec<Position> {
    let mut targets = Vec::new();
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            targets.push(to);
            if board.get_piece(to).is_some() {
                break;
            }
            current = to;
        }
    }
    targets
}

/// Castling candidates. Pseudo-legal here means: rights intact, king and
/// rook unmoved and in place, intervening squares empty, king not currently
/// in check. The transit-square attack test lives in the legality filter.
fn castle_moves(board: &Board, from: Position, king: Piece, moves: &mut Vec<Move>) {
    let rank = king.color.back_rank();
    if king.has_moved || from != (Position { file: 4, rank }) {
        return;
    }
    if board.is_square_attacked(from, king.color.opposite()) {
        return;
    }

    let rights = board.castling_rights();
    if rights.kingside(king.color)
        && unmoved_rook_at(board, Position { file: 7, rank }, king)
        && files_empty(board, &[5, 6], rank)
    {
        let to = Position { file: 6, rank };
        moves.push(Move::castle(from, to, king, MoveType::CastleKingside));
    }
    if rights.queenside(king.color)
        && unmoved_rook_at(board, Position { file: 0, rank }, king)
        && files_empty(board, &[1, 2, 3], rank)
    {
        let to = Position { file: 2, rank };
        moves.push(Move::castle(from, to, king, MoveType::CastleQueenside));
    }
}

fn unmoved_rook_at(board: &Board, square: Position, king: Piece) -> bool {
    matches!(
        board.get_piece(square),
        Some(rook) if rook.piece_type == PieceType::Rook
            && rook.color == king.color
            && !rook.has_moved
    )
}

fn files_empty(board: &Board, files: &[u8], rank: u8) -> bool {
    files
        .iter()
        .all(|&file| board.get_piece(Position { file, rank }).is_none())
}
