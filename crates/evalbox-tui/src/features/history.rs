//! History table view state: selection and expanded rows.
//!
//! Expanded rows are tracked by `EntryId`, so deleting an entry never
//! shifts the expansion onto a neighbour.

use std::collections::HashSet;

use evalbox_core::state::{EntryId, HistoryEntry};

#[derive(Debug, Default, Clone)]
pub struct HistoryView {
    pub selected: usize,
    pub expanded: HashSet<EntryId>,
}

impl HistoryView {
    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle(&mut self, id: EntryId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Drops view state for entries that no longer exist and keeps the
    /// selection in range.
    pub fn sync(&mut self, entries: &[HistoryEntry]) {
        self.expanded
            .retain(|id| entries.iter().any(|entry| entry.id == *id));
        self.selected = self.selected.min(entries.len().saturating_sub(1));
    }
}
