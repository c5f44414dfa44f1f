//! The single hand-off point between the poller and the foreground
//! loop: a mutex-guarded text buffer plus a dirty flag.

use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub(crate) struct Mailbox {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    pending: String,
    dirty: bool,
}

impl Mailbox {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `text` and mark the mailbox dirty, under lock.
    pub(crate) fn publish(&self, text: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.pending.push_str(text);
        inner.dirty = true;
    }

    /// Take the pending text and clear the dirty flag in one critical
    /// section, or `None` when nothing is pending. No write published
    /// before the lock was acquired can be missed.
    pub(crate) fn drain(&self) -> Option<String> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if !inner.dirty {
            return None;
        }
        inner.dirty = false;
        Some(std::mem::take(&mut inner.pending))
    }
}
