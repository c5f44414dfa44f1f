//! Terminal presentation for the parlor client.
//!
//! The buffer and input state machine are pure; the physical surfaces
//! (display rows, key matrix) sit behind the [`Screen`] and [`Keypad`]
//! traits with crossterm implementations for desktop terminals and
//! fakes for tests.

pub mod fakes;
pub mod input;
pub mod screen;
pub mod terminal;

pub use input::{Composer, Event, InputMode, Key, ListSelect, TextPrompt};
pub use screen::{CrosstermKeypad, CrosstermScreen, Keypad, Screen};
pub use terminal::{TerminalBuffer, Viewport, wrap};
