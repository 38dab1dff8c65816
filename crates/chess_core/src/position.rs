use crate::error::ChessError;
use std::fmt;

/// A square on the board. Files run a-h as 0-7, ranks 1-8 as 0-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub file: u8,
    pub rank: u8,
}

impl Position {
    pub fn new(file: u8, rank: u8) -> Result<Self, ChessError> {
        if file < 8 && rank < 8 {
            Ok(Self { file, rank })
        } else {
            Err(ChessError::InvalidSquare {
                file: file as i8,
                rank: rank as i8,
            })
        }
    }

    /// The square `df` files and `dr` ranks away, or `None` off the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Self {
            file: file as u8 - b'a',
            rank: rank as u8 - b'1',
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}
