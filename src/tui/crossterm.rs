use ::crossterm::event as ct;

use crate::core::event::{InputEvent, KeyCode, KeyEvent, KeyModifiers, PointerClick};

/// Converts a crossterm event; anything the engine does not handle maps to
/// `None` (releases, drags, scrolls, focus and paste).
pub fn into_input_event(event: ct::Event) -> Option<InputEvent> {
    match event {
        ct::Event::Key(key) => into_key_event(key).map(InputEvent::Key),
        ct::Event::Mouse(mouse) => into_click(mouse).map(InputEvent::Click),
        ct::Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
        _ => None,
    }
}

pub fn into_key_event(event: ct::KeyEvent) -> Option<KeyEvent> {
    if event.kind == ct::KeyEventKind::Release {
        return None;
    }
    Some(KeyEvent::new(
        into_key_code(event.code),
        into_key_modifiers(event.modifiers),
    ))
}

const MODIFIERS: [(ct::KeyModifiers, KeyModifiers); 3] = [
    (ct::KeyModifiers::SHIFT, KeyModifiers::SHIFT),
    (ct::KeyModifiers::CONTROL, KeyModifiers::CONTROL),
    (ct::KeyModifiers::ALT, KeyModifiers::ALT),
];

fn into_key_modifiers(mods: ct::KeyModifiers) -> KeyModifiers {
    MODIFIERS
        .iter()
        .filter(|(theirs, _)| mods.contains(*theirs))
        .fold(KeyModifiers::NONE, |acc, (_, ours)| acc | *ours)
}

fn into_key_code(code: ct::KeyCode) -> KeyCode {
    match code {
        ct::KeyCode::Char(ch) => KeyCode::Char(ch),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        _ => KeyCode::Unknown,
    }
}

/// Left-button presses become clicks at the mouse cell.
pub fn into_click(event: ct::MouseEvent) -> Option<PointerClick> {
    match event.kind {
        ct::MouseEventKind::Down(ct::MouseButton::Left) => Some(
            PointerClick::new(event.column as i32, event.row as i32),
        ),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;
