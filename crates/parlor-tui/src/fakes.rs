//! Fake screen and keypad for testing.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::input::Key;
use crate::screen::{Keypad, Screen};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drawn {
    MessageBox(String),
    List(Vec<String>, usize),
    TerminalView(Vec<String>),
    Prompt(String),
}

/// Screen that records every draw call.
#[derive(Debug, Default)]
pub struct FakeScreen {
    pub calls: Vec<Drawn>,
}

impl FakeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent terminal view, if any was drawn.
    pub fn last_terminal_view(&self) -> Option<&[String]> {
        self.calls.iter().rev().find_map(|call| match call {
            Drawn::TerminalView(lines) => Some(lines.as_slice()),
            _ => None,
        })
    }

    /// The most recent prompt row, if any was drawn.
    pub fn last_prompt(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            Drawn::Prompt(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Screen for FakeScreen {
    fn message_box(&mut self, text: &str) -> io::Result<()> {
        self.calls.push(Drawn::MessageBox(text.to_owned()));
        Ok(())
    }

    fn list(&mut self, items: &[String], selected: usize) -> io::Result<()> {
        self.calls.push(Drawn::List(items.to_vec(), selected));
        Ok(())
    }

    fn terminal_view(&mut self, lines: &[String]) -> io::Result<()> {
        self.calls.push(Drawn::TerminalView(lines.to_vec()));
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.calls.push(Drawn::Prompt(text.to_owned()));
        Ok(())
    }
}

/// Keypad that replays a scripted key sequence, then goes idle.
#[derive(Debug, Default)]
pub struct FakeKeypad {
    keys: VecDeque<Key>,
}

impl FakeKeypad {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Script a whole line of printable keys.
    pub fn type_str(&mut self, text: &str) {
        self.keys.extend(text.chars().map(Key::Char));
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn is_drained(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Keypad for FakeKeypad {
    fn poll(&mut self, _timeout: Duration) -> io::Result<Key> {
        Ok(self.keys.pop_front().unwrap_or(Key::None))
    }
}
