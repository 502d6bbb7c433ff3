//! In-session recently copied entries, most recent first.

use crate::interface::Entry;

pub const DEFAULT_RECENT_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
pub struct RecencyTracker {
    capacity: usize,
    items: Vec<Entry>,
}

impl Default for RecencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

impl RecencyTracker {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Move `entry` to the front, dropping any older copy with the same glyph
    /// and anything past capacity.
    pub fn record(&mut self, entry: Entry) {
        self.items.retain(|e| e.glyph != entry.glyph);
        self.items.insert(0, entry);
        self.items.truncate(self.capacity);
    }

    pub fn items(&self) -> &[Entry] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
