use std::collections::HashMap;

use crate::error::ChessError;
use crate::moves::{attack_squares, pseudo_legal_moves, Move, MoveType};
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
}

impl CastlingRights {
    pub const fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    fn clear(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Revokes the right tied to a rook home square; other squares are ignored.
    fn revoke_for_square(&mut self, square: Position) {
        match (square.file, square.rank) {
            (0, 0) => self.white_queenside = false,
            (7, 0) => self.white_kingside = false,
            (0, 7) => self.black_queenside = false,
            (7, 7) => self.black_kingside = false,
            _ => {}
        }
    }
}

/// Classification of a position for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Terminal states end the game; no further moves may be applied.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Inverse delta returned by `Board::apply_move`. Together with the piece
/// snapshots stored in the move itself it reverses every field the apply
/// touched.
#[derive(Debug, Clone, Copy)]
pub struct MoveUndo {
    mv: Move,
    castling_rights: CastlingRights,
    en_passant_target: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pieces: HashMap<Position, Piece>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Position>,
}

impl Board {
    /// Standard initial position: White to move, full castling rights, no
    /// en passant target.
    pub fn new() -> Self {
        let mut board = Self {
            pieces: HashMap::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::default(),
            en_passant_target: None,
        };
        board.setup_initial_position();
        board
    }

    /// An empty board for constructing positions piece by piece. Castling
    /// rights start revoked; enable them explicitly when the setup warrants.
    pub fn empty() -> Self {
        Self {
            pieces: HashMap::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
        }
    }

    fn setup_initial_position(&mut self) {
        for file in 0..8 {
            self.pieces.insert(
                Position { file, rank: 1 },
                Piece::new(PieceType::Pawn, Color::White),
            );
            self.pieces.insert(
                Position { file, rank: 6 },
                Piece::new(PieceType::Pawn, Color::Black),
            );
        }

        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &piece_type) in (0..8).zip(piece_order.iter()) {
            self.pieces.insert(
                Position { file, rank: 0 },
                Piece::new(piece_type, Color::White),
            );
            self.pieces.insert(
                Position { file, rank: 7 },
                Piece::new(piece_type, Color::Black),
            );
        }
    }

    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        self.pieces.get(&pos)
    }

    pub fn pieces(&self) -> &HashMap<Position, Piece> {
        &self.pieces
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    pub fn place_piece(&mut self, pos: Position, piece: Piece) {
        self.pieces.insert(pos, piece);
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights;
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces
            .iter()
            .find(|(_, piece)| piece.piece_type == PieceType::King && piece.color == color)
            .map(|(&pos, _)| pos)
    }

    /// True iff any piece of `by` threatens `target`. Pawns count their
    /// diagonal attack squares even when empty.
    pub fn is_square_attacked(&self, target: Position, by: Color) -> bool {
        self.pieces.iter().any(|(&from, &piece)| {
            piece.color == by && attack_squares(self, from, piece).contains(&target)
        })
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_position(color)
            .map(|king| self.is_square_attacked(king, color.opposite()))
            .unwrap_or(false)
    }

    /// All legal moves for `color`, scanning squares in a fixed file/rank
    /// order so generation order is deterministic.
    pub fn generate_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut legal = Vec::new();
        for rank in 0..8 {
            for file in 0..8 {
                let from = Position { file, rank };
                if self.get_piece(from).is_some_and(|p| p.color == color) {
                    legal.extend(self.legal_moves_from(from));
                }
            }
        }
        legal
    }

    /// Legal moves of the piece on `from` (empty if the square is empty).
    ///
    /// Each pseudo-legal move is tried on a scratch copy; any move leaving
    /// the mover's own king attacked is discarded. That single filter also
    /// covers pins, discovered checks and castling into check.
    pub fn legal_moves_from(&self, from: Position) -> Vec<Move> {
        let Some(&piece) = self.get_piece(from) else {
            return Vec::new();
        };
        let mut scratch = self.clone();
        pseudo_legal_moves(self, from)
            .into_iter()
            .filter(|mv| move_is_legal(&mut scratch, mv, piece.color))
            .collect()
    }

    /// Mutates the board and returns the state needed to exactly undo.
    ///
    /// The move must come from the current legal set; only a cheap origin
    /// check is done here, and nothing is mutated when it fails. Full
    /// legal-set validation is `Game::apply_move`'s job.
    pub fn apply_move(&mut self, mv: &Move) -> Result<MoveUndo, ChessError> {
        match self.pieces.get(&mv.from) {
            Some(piece) if *piece == mv.piece => {}
            _ => {
                return Err(ChessError::IllegalMove {
                    from: mv.from,
                    to: mv.to,
                    reason: "the moved piece is not on its origin square",
                })
            }
        }
        let undo = MoveUndo {
            mv: *mv,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
        };

        self.pieces.remove(&mv.from);
        let mut piece = mv.piece;
        piece.has_moved = true;

        match mv.move_type {
            MoveType::Normal | MoveType::Capture => {}
            MoveType::Promotion => {
                piece.piece_type = mv.promotion.unwrap_or(PieceType::Queen);
            }
            MoveType::EnPassant => {
                // the captured pawn stands behind the destination square
                self.pieces.remove(&Position {
                    file: mv.to.file,
                    rank: mv.from.rank,
                });
            }
            MoveType::CastleKingside => self.move_castling_rook(mv.from.rank, 7, 5),
            MoveType::CastleQueenside => self.move_castling_rook(mv.from.rank, 0, 3),
        }

        self.pieces.insert(mv.to, piece);

        // a double step opens an en passant capture for exactly one reply
        self.en_passant_target = if mv.piece.piece_type == PieceType::Pawn
            && (mv.to.rank as i8 - mv.from.rank as i8).abs() == 2
        {
            Some(Position {
                file: mv.from.file,
                rank: (mv.from.rank + mv.to.rank) / 2,
            })
        } else {
            None
        };

        self.update_castling_rights(mv);
        self.side_to_move = mv.piece.color.opposite();
        Ok(undo)
    }

    /// Exact inverse of `apply_move`. Search correctness depends on an
    /// apply/undo pair leaving no residual mutation.
    pub fn undo_move(&mut self, undo: MoveUndo) {
        let MoveUndo {
            mv,
            castling_rights,
            en_passant_target,
        } = undo;

        self.pieces.remove(&mv.to);
        self.pieces.insert(mv.from, mv.piece);

        match mv.move_type {
            MoveType::EnPassant => {
                if let Some(victim) = mv.captured {
                    self.pieces.insert(
                        Position {
                            file: mv.to.file,
                            rank: mv.from.rank,
                        },
                        victim,
                    );
                }
            }
            // castling only ever involved an unmoved rook
            MoveType::CastleKingside => self.unmove_castling_rook(mv.from.rank, 5, 7),
            MoveType::CastleQueenside => self.unmove_castling_rook(mv.from.rank, 3, 0),
            MoveType::Normal | MoveType::Capture | MoveType::Promotion => {
                if let Some(victim) = mv.captured {
                    self.pieces.insert(mv.to, victim);
                }
            }
        }

        self.castling_rights = castling_rights;
        self.en_passant_target = en_passant_target;
        self.side_to_move = mv.piece.color;
    }

    fn move_castling_rook(&mut self, rank: u8, from_file: u8, to_file: u8) {
        if let Some(mut rook) = self.pieces.remove(&Position {
            file: from_file,
            rank,
        }) {
            rook.has_moved = true;
            self.pieces.insert(Position { file: to_file, rank }, rook);
        }
    }

    fn unmove_castling_rook(&mut self, rank: u8, from_file: u8, to_file: u8) {
        if let Some(mut rook) = self.pieces.remove(&Position {
            file: from_file,
            rank,
        }) {
            rook.has_moved = false;
            self.pieces.insert(Position { file: to_file, rank }, rook);
        }
    }

    /// Castling rights are lost permanently when the king or a rook moves,
    /// or when a rook is captured on its home square.
    fn update_castling_rights(&mut self, mv: &Move) {
        match mv.piece.piece_type {
            PieceType::King => self.castling_rights.clear(mv.piece.color),
            PieceType::Rook => self.castling_rights.revoke_for_square(mv.from),
            _ => {}
        }
        if let Some(captured) = mv.captured {
            if captured.piece_type == PieceType::Rook {
                // en passant never captures a rook, so `to` is the victim square
                self.castling_rights.revoke_for_square(mv.to);
            }
        }
    }

    pub fn classify_position(&self, color: Color) -> GameStatus {
        let in_check = self.is_in_check(color);
        let has_moves = !self.generate_legal_moves(color).is_empty();
        match (in_check, has_moves) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Normal,
        }
    }

    /// Neither side can force mate: K vs K, K+minor vs K, or KB vs KB with
    /// both bishops on the same square color.
    pub fn has_insufficient_material(&self) -> bool {
        let mut minors: Vec<(Color, PieceType, Position)> = Vec::new();
        for (&pos, piece) in &self.pieces {
            match piece.piece_type {
                PieceType::King => {}
                PieceType::Bishop | PieceType::Knight => {
                    minors.push((piece.color, piece.piece_type, pos));
                }
                _ => return false,
            }
        }
        match minors.as_slice() {
            [] | [_] => true,
            [a, b] if a.0 != b.0 && a.1 == PieceType::Bishop && b.1 == PieceType::Bishop => {
                (a.2.file + a.2.rank) % 2 == (b.2.file + b.2.rank) % 2
            }
            _ => false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn move_is_legal(scratch: &mut Board, mv: &Move, color: Color) -> bool {
    // the king may not castle across an attacked square
    let transit = match mv.move_type {
        MoveType::CastleKingside => Some(Position {
            file: 5,
            rank: mv.from.rank,
        }),
        MoveType::CastleQueenside => Some(Position {
            file: 3,
            rank: mv.from.rank,
        }),
        _ => None,
    };
    if let Some(square) = transit {
        if scratch.is_square_attacked(square, color.opposite()) {
            return false;
        }
    }

    let Ok(undo) = scratch.apply_move(mv) else {
        return false;
    };
    let safe = !scratch.is_in_check(color);
    scratch.undo_move(undo);
    safe
}
