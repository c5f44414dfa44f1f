//! Scrollback buffer with fixed-width line wrapping.

/// Character dimensions of the target display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Columns per terminal line.
    pub width: usize,
    /// Terminal rows, excluding the prompt row.
    pub height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 34,
            height: 12,
        }
    }
}

/// Split `text` on newlines, then greedily wrap each segment at
/// `width` characters. Pure: concatenating the result (ignoring the
/// injected breaks) reproduces the input minus its newlines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;

    for c in text.chars() {
        if c == '\n' {
            lines.push(std::mem::take(&mut current));
            count = 0;
            continue;
        }
        current.push(c);
        count += 1;
        if count >= width {
            lines.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Ordered display lines plus a scroll offset into the trailing window.
///
/// Offset 0 is "most recent"; growing the offset reveals older lines.
#[derive(Debug)]
pub struct TerminalBuffer {
    width: usize,
    lines: Vec<String>,
    scroll: usize,
}

impl TerminalBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            scroll: 0,
        }
    }

    /// Wrap `raw` and append the resulting lines in order.
    pub fn append(&mut self, raw: &str) {
        self.lines.extend(wrap(raw, self.width));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scroll one line back into history. Returns whether the offset
    /// moved (it is capped at the total line count).
    pub fn scroll_up(&mut self) -> bool {
        if self.scroll < self.lines.len() {
            self.scroll += 1;
            true
        } else {
            false
        }
    }

    /// Scroll one line toward the most recent, floored at 0.
    pub fn scroll_down(&mut self) -> bool {
        if self.scroll > 0 {
            self.scroll -= 1;
            true
        } else {
            false
        }
    }

    /// The window of up to `height` lines at the current offset.
    pub fn visible(&self, height: usize) -> &[String] {
        self.window(self.scroll, height)
    }

    /// The window of up to `height` lines, `offset` lines back from the
    /// tail. The start is clamped so the window never runs off either
    /// end of the buffer.
    pub fn window(&self, offset: usize, height: usize) -> &[String] {
        let total = self.lines.len();
        let base = total.saturating_sub(height);
        let start = base.saturating_sub(offset);
        let end = (start + height).min(total);
        &self.lines[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_bounds_line_length() {
        let text = "the quick brown fox jumps over the lazy dog";
        for line in wrap(text, 7) {
            assert!(line.chars().count() <= 7, "line too wide: {line:?}");
        }
    }

    #[test]
    fn wrap_loses_no_characters() {
        let text = "alpha beta\ngamma delta epsilon\n\nzeta";
        let rejoined: String = wrap(text, 5).concat();
        assert_eq!(rejoined, text.replace('\n', ""));
    }

    #[test]
    fn wrap_short_segment_is_one_line() {
        assert_eq!(wrap("hi", 34), vec!["hi"]);
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn wrap_is_idempotent_over_wrapped_output() {
        let once = wrap("abcdefghij", 4);
        let again: Vec<String> = once.iter().flat_map(|l| wrap(l, 4)).collect();
        assert_eq!(once, again);
    }

    #[test]
    fn zero_offset_shows_most_recent() {
        let mut buf = TerminalBuffer::new(10);
        for i in 0..20 {
            buf.append(&format!("line {i}\n"));
        }
        let window = buf.window(0, 5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[4], "line 19");
        assert_eq!(window[0], "line 15");
    }

    #[test]
    fn offset_clamps_at_earliest_full_window() {
        // 15 lines, height 12, offset 3: the earliest full window.
        let mut buf = TerminalBuffer::new(10);
        for i in 0..15 {
            buf.append(&format!("l{i}\n"));
        }
        let window = buf.window(3, 12);
        assert_eq!(window.first().map(String::as_str), Some("l0"));
        assert_eq!(window.last().map(String::as_str), Some("l11"));

        // Larger offsets clamp to the same view.
        assert_eq!(buf.window(100, 12), window);
    }

    #[test]
    fn window_smaller_than_height() {
        let mut buf = TerminalBuffer::new(10);
        buf.append("only\n");
        assert_eq!(buf.window(0, 12).len(), 1);
        assert_eq!(buf.window(5, 12).len(), 1);
    }

    #[test]
    fn scroll_is_floored_and_capped() {
        let mut buf = TerminalBuffer::new(10);
        assert!(!buf.scroll_down());
        assert!(!buf.scroll_up()); // nothing buffered yet

        buf.append("a\nb\nc\n");
        assert!(buf.scroll_up());
        assert!(buf.scroll_up());
        assert!(buf.scroll_up());
        assert!(!buf.scroll_up()); // capped at total
        assert_eq!(buf.scroll(), 3);

        assert!(buf.scroll_down());
        assert_eq!(buf.scroll(), 2);
    }
}
