//! The foreground loop: one tick reads a key, applies its effect,
//! drains the mailbox, and redraws only what changed.

use std::time::Duration;

use anyhow::Result;
use parlor_client::ChatTransport;
use parlor_tui::{Composer, Event, InputMode, Keypad, Screen, TerminalBuffer, Viewport};
use tracing::warn;

use crate::session::AppContext;

const TICK: Duration = Duration::from_millis(100);

pub(crate) fn run<T, S, K>(
    ctx: &AppContext,
    transport: &T,
    screen: &mut S,
    keypad: &mut K,
    viewport: Viewport,
) -> Result<()>
where
    T: ChatTransport,
    S: Screen,
    K: Keypad,
{
    let mut buffer = TerminalBuffer::new(viewport.width);
    let mut mode = InputMode::Terminal(Composer::new());
    let mut redraw = true;
    let mut prompt_len: Option<usize> = None;

    while ctx.is_running() {
        let key = keypad.poll(TICK)?;
        match mode.handle(key) {
            Event::Send(text) => {
                // A stray OK with nothing composed is not a send.
                if !text.is_empty() {
                    if let Err(err) = transport.send_message(&ctx.room, &text) {
                        warn!(%err, room = %ctx.room, "send failed; keeping composed text");
                        buffer.append("[!] send failed\n");
                        redraw = true;
                        if let InputMode::Terminal(composer) = &mut mode {
                            composer.restore(text);
                        }
                    }
                }
            }
            Event::ScrollUp => redraw |= buffer.scroll_up(),
            Event::ScrollDown => redraw |= buffer.scroll_down(),
            Event::Quit => ctx.shutdown(),
            Event::None | Event::Redraw | Event::Selected(_) | Event::Entered(_) => {}
        }

        if let Some(text) = ctx.mailbox.drain() {
            buffer.append(&text);
            redraw = true;
        }

        // Prompt row repaints only when the compose buffer changed.
        if let InputMode::Terminal(composer) = &mode {
            let len = composer.buffer().chars().count();
            if prompt_len != Some(len) {
                screen.prompt(composer.buffer())?;
                prompt_len = Some(len);
            }
        }

        if redraw {
            screen.terminal_view(buffer.visible(viewport.height))?;
            redraw = false;
        }
    }

    Ok(())
}
