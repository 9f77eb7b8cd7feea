//! Bounded undo history.
//!
//! A LIFO stack of session snapshots with a fixed capacity. Pushing past
//! capacity evicts the oldest entry (FIFO eviction), so the stack always
//! holds the most recent `capacity` states.
//!
//! Backed by `im::Vector`, which gives O(1) push/pop at both ends and cheap
//! clones of the whole stack.

use im::Vector;

use crate::persistence::SessionSnapshot;

/// Bounded snapshot stack for undo.
#[derive(Clone, Debug)]
pub struct HistoryStack {
    entries: Vector<SessionSnapshot>,
    capacity: usize,
}

impl HistoryStack {
    /// Create an empty stack holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    /// Push a snapshot, evicting the oldest if over capacity.
    pub fn push(&mut self, snapshot: SessionSnapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<SessionSnapshot> {
        self.entries.pop_back()
    }

    /// The most recent snapshot, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&SessionSnapshot> {
        self.entries.back()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
