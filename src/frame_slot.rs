//! Single-slot handoff between a capture thread and the processing thread.
//!
//! The slot holds at most one frame. Publishing over an unconsumed frame
//! replaces it, so the consumer always sees the most recent frame and never
//! works through a backlog.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

struct SlotState<T> {
    frame: Option<T>,
    closed: bool,
    dropped: u64,
}

/// Capacity-one mailbox that favours recency over completeness
pub struct FrameSlot<T> {
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

impl<T> FrameSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                frame: None,
                closed: false,
                dropped: 0,
            }),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Offer a frame, replacing any frame not yet taken.
    ///
    /// Returns `true` if a stale frame was dropped. Frames published after
    /// [`close`](Self::close) are discarded.
    pub fn publish(&self, frame: T) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        let replaced = state.frame.replace(frame).is_some();
        if replaced {
            state.dropped += 1;
        }
        drop(state);
        self.ready.notify_one();
        replaced
    }

    /// Wait for the next frame. Returns `None` once closed and drained.
    pub fn take(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(frame) = state.frame.take() {
                return Some(frame);
            }
            if state.closed {
                return None;
            }
            state = self.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Stop accepting frames and wake the consumer
    pub fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }

    /// Number of frames replaced before they were consumed
    pub fn dropped(&self) -> u64 {
        self.lock().dropped
    }
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
