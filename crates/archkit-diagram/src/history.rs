//! Edit history (reserved)
//!
//! The orchestrator records a label per mutation so the plumbing for an
//! undo stack already exists, but undo/redo themselves are deliberately
//! unimplemented: they always return `None`. Hosts should hide or
//! disable the corresponding controls.

use chrono::{DateTime, Utc};

/// Maximum recorded entries before the oldest are dropped
const HISTORY_LIMIT: usize = 200;

/// One recorded edit
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Human-readable edit label, e.g. `"add node"`
    pub label: String,
    /// When the edit happened
    pub at: DateTime<Utc>,
}

/// Bounded log of edits
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit label
    pub fn record(&mut self, label: impl Into<String>) {
        self.entries.push(HistoryEntry {
            label: label.into(),
            at: Utc::now(),
        });
        if self.entries.len() > HISTORY_LIMIT {
            let excess = self.entries.len() - HISTORY_LIMIT;
            self.entries.drain(..excess);
        }
    }

    /// Undo is not implemented; always `None`
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        tracing::debug!("undo requested, history engine not implemented");
        None
    }

    /// Redo is not implemented; always `None`
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        tracing::debug!("redo requested, history engine not implemented");
        None
    }

    pub fn can_undo(&self) -> bool {
        false
    }

    pub fn can_redo(&self) -> bool {
        false
    }

    /// Recorded entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_labels_in_order() {
        let mut history = History::new();
        history.record("add node");
        history.record("move node");
        let labels: Vec<_> = history.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["add node", "move node"]);
    }

    #[test]
    fn undo_redo_are_stubs() {
        let mut history = History::new();
        history.record("add node");
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        // recording is unaffected
        assert_eq!(history.entries().len(), 1);
    }

    #[test]
    fn history_is_bounded() {
        let mut history = History::new();
        for i in 0..(HISTORY_LIMIT + 25) {
            history.record(format!("edit {i}"));
        }
        assert_eq!(history.entries().len(), HISTORY_LIMIT);
        assert_eq!(history.entries()[0].label, "edit 25");
    }
}
