//! Background fetch task: one thread, one room, a fixed period.

use std::fmt::Write as _;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use parlor_client::ChatTransport;
use tracing::debug;

use crate::mailbox::Mailbox;

pub(crate) const POLL_PERIOD: Duration = Duration::from_millis(100);

/// Count of messages already consumed for one room.
///
/// Owned exclusively by the poller; advanced only after a successful
/// fetch, never decremented, reset only by process restart.
#[derive(Debug, Default)]
pub(crate) struct RoomCursor {
    count: usize,
}

impl RoomCursor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    fn advance(&mut self, new_messages: usize) {
        self.count += new_messages;
    }
}

/// One poll: fetch past the cursor, advance it by the returned count,
/// publish the rendered lines. A failed fetch leaves the cursor and
/// the mailbox untouched; the next tick retries.
fn poll_once<T: ChatTransport>(
    transport: &T,
    room: &str,
    cursor: &mut RoomCursor,
    mailbox: &Mailbox,
) {
    match transport.fetch_messages(room, cursor.count()) {
        Ok(messages) => {
            cursor.advance(messages.len());
            if messages.is_empty() {
                return;
            }
            let mut text = String::new();
            for message in &messages {
                let _ = writeln!(text, "{}", message.render_line());
            }
            mailbox.publish(&text);
        }
        Err(err) => debug!(%err, room, "fetch failed; retrying next tick"),
    }
}

/// Spawn the poller thread. It never touches the screen or keyboard;
/// its only output is the mailbox. Cleared `running` stops it at the
/// top of the next iteration.
pub(crate) fn spawn<T>(
    transport: T,
    room: String,
    mailbox: Arc<Mailbox>,
    running: Arc<AtomicBool>,
) -> io::Result<thread::JoinHandle<()>>
where
    T: ChatTransport + 'static,
{
    thread::Builder::new()
        .name("parlor-poll".to_owned())
        .spawn(move || {
            let mut cursor = RoomCursor::new();
            while running.load(Ordering::Acquire) {
                poll_once(&transport, &room, &mut cursor, &mailbox);
                thread::sleep(POLL_PERIOD);
            }
            debug!(fetched = cursor.count(), "poller stopped");
        })
}
