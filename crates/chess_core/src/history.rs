use crate::board::MoveUndo;
use crate::moves::Move;

/// One applied move together with its inverse delta.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub mv: Move,
    pub(crate) undo: MoveUndo,
}

/// Ordered record of the moves applied to one game session. Grows by one
/// entry per applied move, shrinks by one on undo, cleared on restart.
/// Search's internal apply/undo pairs are never recorded here.
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mv: Move, undo: MoveUndo) {
        self.entries.push(HistoryEntry { mv, undo });
    }

    pub(crate) fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The applied moves, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.entries.iter().map(|entry| &entry.mv)
    }
}
