//! Timer service: single-shot registrations ordered by due time
//!
//! Nothing here calls back. The run loop asks for the next due handle and
//! delivers it as an event, so a "repeating" timer is a handler that
//! registers again while handling its own fire.

use std::collections::{BTreeSet, HashMap};

use crate::types::TimerHandle;

/// Register/cancel contract the alarm controller schedules through
pub trait TimerService {
    /// Schedule a single fire `delay_ms` from now
    fn register(&mut self, delay_ms: u64) -> TimerHandle;

    /// Drop a registration. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Timer queue on a millisecond clock owned by the run loop
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    /// (due_ms, handle), earliest first; handle breaks ties in registration order
    queue: BTreeSet<(u64, TimerHandle)>,
    due_by_handle: HashMap<TimerHandle, u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Due time of the earliest registration
    pub fn next_due(&self) -> Option<u64> {
        self.queue.first().map(|&(due, _)| due)
    }

    /// Remove and return the earliest registration due at or before `until_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerHandle> {
        let &(due, handle) = self.queue.first()?;
        if due > until_ms {
            return None;
        }
        self.queue.remove(&(due, handle));
        self.due_by_handle.remove(&handle);
        self.now_ms = self.now_ms.max(due);
        Some(handle)
    }

    /// Move the clock forward. Never moves backwards.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.due_by_handle.contains_key(&handle)
    }

    /// Number of outstanding registrations
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}

impl TimerService for TimerQueue {
    fn register(&mut self, delay_ms: u64) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let due = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((due, handle));
        self.due_by_handle.insert(handle, due);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(due) = self.due_by_handle.remove(&handle) {
            self.queue.remove(&(due, handle));
        }
    }
}
