//! Linear undo/redo history of element snapshots.

use crate::shapes::Element;

/// Default number of snapshots kept.
pub const MAX_HISTORY: usize = 100;

/// A snapshot-based history with a cursor.
///
/// Always holds at least one entry; `step` indexes the entry matching the
/// live element sequence. Entries past `step` are redo entries and are
/// dropped by the next commit.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<Element>>,
    step: usize,
    max_len: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: &[Element]) -> Self {
        Self::with_capacity(initial, MAX_HISTORY)
    }

    /// Start a history keeping at most `max_len` entries (at least one).
    pub fn with_capacity(initial: &[Element], max_len: usize) -> Self {
        Self {
            entries: vec![initial.to_vec()],
            step: 0,
            max_len: max_len.max(1),
        }
    }

    /// Discard everything and start again from `initial`.
    pub fn reset(&mut self, initial: &[Element]) {
        self.entries.clear();
        self.entries.push(initial.to_vec());
        self.step = 0;
    }

    /// Record `elements` as the newest entry, dropping any redo entries.
    pub fn commit(&mut self, elements: &[Element]) {
        self.entries.truncate(self.step + 1);
        self.entries.push(elements.to_vec());
        self.step += 1;

        // Limit history size
        if self.entries.len() > self.max_len {
            let excess = self.entries.len() - self.max_len;
            self.entries.drain(..excess);
            self.step -= excess;
        }
        log::debug!("History commit: step {} of {}", self.step, self.entries.len());
    }

    /// Step back one entry, returning a copy of it.
    /// Returns `None` if already at the oldest entry.
    pub fn undo(&mut self) -> Option<Vec<Element>> {
        if !self.can_undo() {
            return None;
        }
        self.step -= 1;
        Some(self.entries[self.step].clone())
    }

    /// Step forward one entry, returning a copy of it.
    /// Returns `None` if already at the newest entry.
    pub fn redo(&mut self) -> Option<Vec<Element>> {
        if !self.can_redo() {
            return None;
        }
        self.step += 1;
        Some(self.entries[self.step].clone())
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.step > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.step + 1 < self.entries.len()
    }

    /// Index of the current entry.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a history always has its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at the cursor.
    pub fn current(&self) -> &[Element] {
        &self.entries[self.step]
    }
}
