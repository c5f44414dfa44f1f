//! Startup flow: room discovery, selection, and creation.
//!
//! These runners drive the modal input states; the modes themselves
//! never switch modes, the flow here does.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use parlor_client::ChatTransport;
use parlor_tui::{Event, InputMode, Keypad, ListSelect, Screen, TextPrompt};

const TICK: Duration = Duration::from_millis(100);

/// The synthetic list entry that opens the room-creation prompt.
const CREATE_ROOM_ENTRY: &str = "+ Create new room";

/// Drive list-selection until the user picks an entry.
/// `None` means a shutdown request arrived instead.
pub(crate) fn select_from_list<S: Screen, K: Keypad>(
    screen: &mut S,
    keypad: &mut K,
    items: Vec<String>,
) -> Result<Option<usize>> {
    let mut mode = InputMode::ListSelect(ListSelect::new(items));
    loop {
        let key = keypad.poll(TICK)?;
        match mode.handle(key) {
            Event::Redraw => {
                if let InputMode::ListSelect(list) = &mode {
                    screen.list(list.items(), list.index())?;
                }
            }
            Event::Selected(index) => return Ok(Some(index)),
            Event::Quit => return Ok(None),
            _ => {}
        }
    }
}

/// Drive the free-text prompt until the user submits a line.
/// `None` means a shutdown request arrived instead.
pub(crate) fn prompt_line<S: Screen, K: Keypad>(
    screen: &mut S,
    keypad: &mut K,
    seed: &str,
) -> Result<Option<String>> {
    let mut mode = InputMode::TextPrompt(TextPrompt::new(seed));
    screen.prompt(seed)?;
    loop {
        let key = keypad.poll(TICK)?;
        match mode.handle(key) {
            Event::Redraw => {
                if let InputMode::TextPrompt(prompt) = &mode {
                    screen.prompt(prompt.buffer())?;
                }
            }
            Event::Entered(text) => return Ok(Some(text)),
            Event::Quit => return Ok(None),
            _ => {}
        }
    }
}

/// Resolve the room to join: the configured one, an existing one
/// picked from the server list, or a freshly created one.
pub(crate) fn choose_room<S, K, T>(
    screen: &mut S,
    keypad: &mut K,
    transport: &T,
    preset: Option<String>,
) -> Result<Option<String>>
where
    S: Screen,
    K: Keypad,
    T: ChatTransport,
{
    if let Some(room) = preset {
        return Ok(Some(room));
    }

    screen.message_box("Getting rooms...")?;
    let mut items = transport.list_rooms().context("listing rooms")?;
    items.push(CREATE_ROOM_ENTRY.to_owned());

    let Some(choice) = select_from_list(screen, keypad, items.clone())? else {
        return Ok(None);
    };

    if choice + 1 == items.len() {
        let Some(name) = prompt_line(screen, keypad, "")? else {
            return Ok(None);
        };
        let name = name.trim().to_owned();
        if name.is_empty() {
            bail!("room name must not be empty");
        }
        transport
            .create_room(&name)
            .with_context(|| format!("creating room {name:?}"))?;
        Ok(Some(name))
    } else {
        Ok(Some(items.swap_remove(choice)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_client::fakes::FakeTransport;
    use parlor_tui::Key;
    use parlor_tui::fakes::{Drawn, FakeKeypad, FakeScreen};

    #[test]
    fn preset_room_skips_selection() {
        let transport = FakeTransport::new();
        let mut screen = FakeScreen::new();
        let mut keypad = FakeKeypad::default();

        let room = choose_room(&mut screen, &mut keypad, &transport, Some("lobby".to_owned()))
            .expect("flow succeeds");
        assert_eq!(room.as_deref(), Some("lobby"));
        assert!(screen.calls.is_empty());
    }

    #[test]
    fn picks_an_existing_room() {
        let mut transport = FakeTransport::new();
        transport.rooms = vec!["general".to_owned(), "random".to_owned()];
        let mut screen = FakeScreen::new();
        // Idle tick paints, then move down once and confirm.
        let mut keypad = FakeKeypad::new([Key::None, Key::ArrowDown, Key::Ok]);

        let room = choose_room(&mut screen, &mut keypad, &transport, None)
            .expect("flow succeeds");
        assert_eq!(room.as_deref(), Some("random"));

        // The create entry was offered as the last item.
        let listed = screen
            .calls
            .iter()
            .find_map(|call| match call {
                Drawn::List(items, _) => Some(items.clone()),
                _ => None,
            })
            .expect("list drawn");
        assert_eq!(listed.last().map(String::as_str), Some(CREATE_ROOM_ENTRY));
    }

    #[test]
    fn creates_a_new_room_via_prompt() {
        let mut transport = FakeTransport::new();
        transport.rooms = vec!["general".to_owned()];
        let mut screen = FakeScreen::new();
        let mut keypad = FakeKeypad::new([Key::ArrowDown, Key::Ok]);
        keypad.type_str("den");
        keypad.push(Key::Ok);

        let room = choose_room(&mut screen, &mut keypad, &transport, None)
            .expect("flow succeeds");
        assert_eq!(room.as_deref(), Some("den"));
        assert_eq!(
            *transport.created_rooms.lock().expect("lock"),
            vec!["den".to_owned()]
        );
    }

    #[test]
    fn rejected_credential_fails_the_flow() {
        let mut transport = FakeTransport::new();
        transport.credential_ok = false;
        let mut screen = FakeScreen::new();
        let mut keypad = FakeKeypad::default();

        // The server rejects the room listing; startup halts with an
        // error instead of entering the chat loop.
        assert!(choose_room(&mut screen, &mut keypad, &transport, None).is_err());
    }

    #[test]
    fn shutdown_during_selection_backs_out() {
        let mut transport = FakeTransport::new();
        transport.rooms = vec!["general".to_owned()];
        let mut screen = FakeScreen::new();
        let mut keypad = FakeKeypad::new([Key::Break]);

        let room = choose_room(&mut screen, &mut keypad, &transport, None)
            .expect("flow succeeds");
        assert_eq!(room, None);
    }

    #[test]
    fn held_over_ok_cannot_submit_an_empty_room_name() {
        let mut screen = FakeScreen::new();
        // First OK is a key-repeat from the selection screen; it only
        // arms the prompt. Real input follows.
        let mut keypad = FakeKeypad::new([Key::Ok, Key::Char('a'), Key::Ok]);

        let name = prompt_line(&mut screen, &mut keypad, "").expect("prompt runs");
        assert_eq!(name.as_deref(), Some("a"));
    }
}
