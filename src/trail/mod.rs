// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking.
//!
//! The trail records every state change as an undo entry. Backtracking
//! rewinds the trail to an earlier position, handing each discarded entry
//! back to the owner of the state so it can restore the old value.
//! Restoration cost is proportional to the number of changes undone, never
//! to the size of the state.
//!
//! The trail is generic over its entry type: it only orders undo records,
//! the [`SearchContext`](crate::context::SearchContext) knows what they mean.

/// Undo log.
///
/// # Memory Model
///
/// - DYNAMIC: the trail is mutable state that changes during search
/// - Each SearchContext owns its own trail, so independent searches never
///   share one
#[derive(Debug)]
pub struct Trail<T> {
    /// Live undo entries, oldest first
    entries: Vec<T>,
    /// Entries beyond this indicate a runaway search
    max_size: usize,
}

impl<T> Trail<T> {
    /// Create a new empty trail with no size limit.
    pub fn new() -> Self {
        Self::with_max_size(usize::MAX)
    }

    /// Create a trail that holds at most `max_size` live entries.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
        }
    }

    /// Rewind to an absolute position, undoing each entry newest first.
    pub fn rewind_to<F: FnMut(T)>(&mut self, position: usize, mut undo: F) {
        while self.entries.len() > position {
            if let Some(entry) = self.entries.pop() {
                undo(entry);
            }
        }
    }

    /// Record an undo entry.
    ///
    /// # Panics
    ///
    /// Panics if the trail exceeds its maximum size (indicates a bug in the
    /// search algorithm).
    pub fn record(&mut self, entry: T) {
        if self.entries.len() >= self.max_size {
            panic!("Trail overflow: exceeded {} entries", self.max_size);
        }
        self.entries.push(entry);
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Self::new()
    }
}
