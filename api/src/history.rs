//! Bounded, timestamp-ordered log of completed sends.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::history::{EntryId, HistoryEntry};

pub const MIN_CAPACITY: usize = 1;
pub const MAX_CAPACITY: usize = 100;
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared(usize),
    AlreadyEmpty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    capacity: usize,
    /// A reference only. It may point at an entry that has since been trimmed,
    /// in which case [`HistoryLog::selected`] yields nothing.
    selected: Option<EntryId>,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HistoryLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: clamp_capacity(capacity),
            selected: None,
        }
    }

    /// Rebuilds a log from persisted entries, ordered by timestamp and trimmed
    /// to `capacity`.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        entries.sort_by_key(|entry| entry.timestamp);
        let mut log = Self {
            entries,
            capacity: clamp_capacity(capacity),
            selected: None,
        };
        log.trim();
        log
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.selected = Some(entry.id);
        self.entries.push(entry);
        self.trim();
    }

    pub fn trim(&mut self) {
        if self.entries.len() <= self.capacity {
            return;
        }
        // stable: equal timestamps keep append order
        self.entries.sort_by_key(|entry| entry.timestamp);
        let excess = self.entries.len() - self.capacity;
        self.entries.drain(..excess);
        debug!("trimmed {} history entries, capacity {}", excess, self.capacity);
    }

    /// Clamps to [1, 100] and trims right away when shrinking.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = clamp_capacity(capacity);
        self.trim();
        self.capacity
    }

    pub fn clear(&mut self) -> ClearOutcome {
        self.selected = None;
        if self.entries.is_empty() {
            return ClearOutcome::AlreadyEmpty;
        }
        let removed = self.entries.len();
        self.entries.clear();
        ClearOutcome::Cleared(removed)
    }

    /// Selects an entry when it exists; unknown ids leave the selection alone.
    pub fn select(&mut self, id: EntryId) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected_id(&self) -> Option<EntryId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&HistoryEntry> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Newest first, the order the history list is shown in.
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn clamp_capacity(capacity: usize) -> usize {
    capacity.clamp(MIN_CAPACITY, MAX_CAPACITY)
}
