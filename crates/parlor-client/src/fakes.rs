//! Fake transport for testing.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::client::{ChatTransport, TransportError};
use crate::types::Message;

/// Scripted transport: fetches pop from a queue, sends are recorded.
#[derive(Debug, Default)]
pub struct FakeTransport {
    pub credential_ok: bool,
    pub rooms: Vec<String>,
    pub fetches: Mutex<VecDeque<Result<Vec<Message>, TransportError>>>,
    pub fail_sends: bool,
    pub sent: Mutex<Vec<(String, String)>>,
    pub created_rooms: Mutex<Vec<String>>,
    pub created_users: Mutex<Vec<(String, String)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            credential_ok: true,
            ..Self::default()
        }
    }

    /// Queue the result of the next `fetch_messages` call.
    pub fn push_fetch(&self, result: Result<Vec<Message>, TransportError>) {
        self.fetches.lock().unwrap().push_back(result);
    }

    pub fn take_sent(&self) -> Vec<(String, String)> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    /// Shorthand for building a well-formed message.
    pub fn message(author: &str, content: &str) -> Message {
        Message {
            author: author.to_owned(),
            content: content.to_owned(),
            timestamp: "2024-01-01T00:00:00Z".to_owned(),
            id: format!("{author}-{content}"),
        }
    }
}

impl ChatTransport for FakeTransport {
    fn check_credential(&self) -> bool {
        self.credential_ok
    }

    fn list_rooms(&self) -> Result<Vec<String>, TransportError> {
        if !self.credential_ok {
            return Err(TransportError::Rejected("bad credential".to_owned()));
        }
        Ok(self.rooms.clone())
    }

    fn fetch_messages(&self, _room: &str, _since: usize) -> Result<Vec<Message>, TransportError> {
        self.fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn send_message(&self, room: &str, text: &str) -> Result<(), TransportError> {
        if self.fail_sends {
            return Err(TransportError::Network("connection reset".to_owned()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((room.to_owned(), text.to_owned()));
        Ok(())
    }

    fn create_room(&self, name: &str) -> Result<(), TransportError> {
        self.created_rooms.lock().unwrap().push(name.to_owned());
        Ok(())
    }

    fn create_user(&self, username: &str, password: &str) -> Result<(), TransportError> {
        self.created_users
            .lock()
            .unwrap()
            .push((username.to_owned(), password.to_owned()));
        Ok(())
    }
}
