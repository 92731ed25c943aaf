//! Bounded FIFO of pending toast requests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::request::{ToastId, ToastRequest};

/// Maximum number of pending requests kept by default
pub const MAX_LIMIT: usize = 5;

/// Thread-safe, multi-producer / single-consumer request queue.
///
/// Pushing past the capacity evicts the oldest pending entry.
pub struct RequestQueue {
    entries: Mutex<VecDeque<ToastRequest>>,
    capacity: usize,
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new(MAX_LIMIT)
    }
}

impl RequestQueue {
    /// Create an empty queue holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<ToastRequest>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a request, returning the entry evicted to stay within capacity.
    pub fn push(&self, request: ToastRequest) -> Option<ToastRequest> {
        let mut entries = self.lock();
        entries.push_back(request);
        if entries.len() > self.capacity {
            entries.pop_front()
        } else {
            None
        }
    }

    /// Take the oldest pending request without blocking.
    pub fn poll(&self) -> Option<ToastRequest> {
        self.lock().pop_front()
    }

    /// Remove a pending request by id. Returns whether anything was removed.
    pub fn remove(&self, id: ToastId) -> bool {
        let mut entries = self.lock();
        if let Some(idx) = entries.iter().position(|r| r.id() == id) {
            entries.remove(idx);
            true
        } else {
            false
        }
    }

    /// Drop every pending request, returning how many were discarded.
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let n = entries.len();
        entries.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
