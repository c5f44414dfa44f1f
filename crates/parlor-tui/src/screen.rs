//! Physical display and keyboard collaborators.
//!
//! The core only produces lines to show and reads abstract keys; these
//! traits are the boundary. The crossterm implementations stand in for
//! the handheld's LCD and key matrix on a desktop terminal.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use unicode_width::UnicodeWidthChar;

use crate::input::Key;
use crate::terminal::Viewport;

/// Fixed-width text surface: terminal rows plus one prompt row.
pub trait Screen {
    /// Blocking full-screen notice (startup progress, fatal states).
    fn message_box(&mut self, text: &str) -> io::Result<()>;

    /// Selection list with a cursor on `selected`.
    fn list(&mut self, items: &[String], selected: usize) -> io::Result<()>;

    /// The terminal view: up to `Viewport::height` prepared lines.
    fn terminal_view(&mut self, lines: &[String]) -> io::Result<()>;

    /// The prompt row showing the in-progress compose buffer.
    fn prompt(&mut self, text: &str) -> io::Result<()>;
}

/// Discrete key source.
pub trait Keypad {
    /// Wait up to `timeout` for one key; [`Key::None`] if none arrived.
    fn poll(&mut self, timeout: Duration) -> io::Result<Key>;
}

/// Crossterm-backed screen: alternate screen, raw mode, a viewport
/// anchored at the top-left corner.
pub struct CrosstermScreen {
    out: Stdout,
    viewport: Viewport,
}

impl std::fmt::Debug for CrosstermScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrosstermScreen")
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl CrosstermScreen {
    pub fn new(viewport: Viewport) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self { out, viewport })
    }

    fn clear_all(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn row(&mut self, row: usize, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, row as u16),
            Clear(ClearType::CurrentLine),
            Print(head_fit(text, self.viewport.width)),
        )
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Screen for CrosstermScreen {
    fn message_box(&mut self, text: &str) -> io::Result<()> {
        self.clear_all()?;
        let mid = self.viewport.height / 2;
        let border = "-".repeat(self.viewport.width.min(text.chars().count() + 4));
        self.row(mid.saturating_sub(1), &border)?;
        self.row(mid, &format!("  {text}"))?;
        self.row(mid + 1, &border)?;
        self.out.flush()
    }

    fn list(&mut self, items: &[String], selected: usize) -> io::Result<()> {
        self.clear_all()?;
        // Keep the cursor visible when the list outgrows the viewport.
        let height = self.viewport.height + 1;
        let start = (selected + 1).saturating_sub(height);
        for (row, (idx, item)) in items.iter().enumerate().skip(start).take(height).enumerate() {
            let marker = if idx == selected { "> " } else { "  " };
            self.row(row, &format!("{marker}{item}"))?;
        }
        self.out.flush()
    }

    fn terminal_view(&mut self, lines: &[String]) -> io::Result<()> {
        for row in 0..self.viewport.height {
            let text = lines.get(row).map_or("", String::as_str);
            self.row(row, text)?;
        }
        self.out.flush()
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        // The prompt keeps the tail of the buffer when it overflows.
        let budget = self.viewport.width.saturating_sub(3);
        let line = format!(" > {}", tail_fit(text, budget));
        self.row(self.viewport.height, &line)?;
        self.out.flush()
    }
}

/// Leading slice of `text` that fits `max_width` columns.
fn head_fit(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Trailing slice of `text` that fits `max_width` columns.
fn tail_fit(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

/// Crossterm-backed keypad.
#[derive(Debug, Default)]
pub struct CrosstermKeypad;

impl Keypad for CrosstermKeypad {
    fn poll(&mut self, timeout: Duration) -> io::Result<Key> {
        if !event::poll(timeout)? {
            return Ok(Key::None);
        }
        match event::read()? {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(key)),
            _ => Ok(Key::None),
        }
    }
}

/// Map a crossterm key event onto the abstract symbol set.
fn map_key(key: KeyEvent) -> Key {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Key::Break,
        (_, KeyCode::Enter) => Key::Ok,
        (_, KeyCode::Backspace | KeyCode::Delete) => Key::Del,
        (_, KeyCode::Up) => Key::ArrowUp,
        (_, KeyCode::Down) => Key::ArrowDown,
        (_, KeyCode::Left) => Key::ArrowLeft,
        (_, KeyCode::Right) => Key::ArrowRight,
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => Key::Char(c),
        _ => Key::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn maps_control_keys() {
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Key::Break
        );
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE)), Key::Ok);
        assert_eq!(map_key(key(KeyCode::Backspace, KeyModifiers::NONE)), Key::Del);
        assert_eq!(map_key(key(KeyCode::Up, KeyModifiers::NONE)), Key::ArrowUp);
    }

    #[test]
    fn maps_printables_including_shifted() {
        assert_eq!(
            map_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Key::Char('a')
        );
        assert_eq!(
            map_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Key::Char('A')
        );
        // Other chords are ignored rather than typed.
        assert_eq!(
            map_key(key(KeyCode::Char('a'), KeyModifiers::ALT)),
            Key::None
        );
    }

    #[test]
    fn tail_fit_keeps_most_recent_text() {
        assert_eq!(tail_fit("hello world", 5), "world");
        assert_eq!(tail_fit("hi", 5), "hi");
        assert_eq!(tail_fit("", 5), "");
    }

    #[test]
    fn head_fit_truncates() {
        assert_eq!(head_fit("hello world", 5), "hello");
        assert_eq!(head_fit("hi", 5), "hi");
    }
}
