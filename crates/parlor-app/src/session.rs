//! Shared application context.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::mailbox::Mailbox;

/// Owns everything shared between the foreground loop and the poller:
/// the mailbox, the running flag, and the active room. Handed to both
/// at construction; nothing here lives in process globals.
#[derive(Debug)]
pub(crate) struct AppContext {
    pub(crate) mailbox: Arc<Mailbox>,
    running: Arc<AtomicBool>,
    pub(crate) room: String,
}

impl AppContext {
    pub(crate) fn new(room: impl Into<String>) -> Self {
        Self {
            mailbox: Arc::new(Mailbox::new()),
            running: Arc::new(AtomicBool::new(true)),
            room: room.into(),
        }
    }

    /// Handle for the poller to observe shutdown.
    pub(crate) fn running_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// The only cancellation primitive: both loops observe the flag at
    /// the top of their iteration and exit.
    pub(crate) fn shutdown(&self) {
        self.running.store(false, Ordering::Release);
    }
}
