use super::*;
use crossterm::event::{
    Event, KeyEvent as CKeyEvent, KeyEventKind as CKind, KeyEventState, MouseButton,
    MouseEvent as CMouseEvent, MouseEventKind,
};

fn mouse(kind: MouseEventKind) -> CMouseEvent {
    CMouseEvent {
        kind,
        column: 12,
        row: 4,
        modifiers: crossterm::event::KeyModifiers::NONE,
    }
}

#[test]
fn left_press_becomes_click() {
    let event = Event::Mouse(mouse(MouseEventKind::Down(MouseButton::Left)));
    assert_eq!(
        into_input_event(event),
        Some(InputEvent::Click(PointerClick::new(12, 4)))
    );
}

#[test]
fn other_mouse_activity_is_dropped() {
    for kind in [
        MouseEventKind::Up(MouseButton::Left),
        MouseEventKind::Down(MouseButton::Right),
        MouseEventKind::Moved,
        MouseEventKind::ScrollDown,
    ] {
        assert_eq!(into_input_event(Event::Mouse(mouse(kind))), None);
    }
}

#[test]
fn key_release_is_dropped() {
    let release = CKeyEvent {
        code: crossterm::event::KeyCode::Char('q'),
        modifiers: crossterm::event::KeyModifiers::NONE,
        kind: CKind::Release,
        state: KeyEventState::NONE,
    };
    assert_eq!(into_key_event(release), None);
}

#[test]
fn ctrl_c_keeps_modifier() {
    let event = CKeyEvent::new(
        crossterm::event::KeyCode::Char('c'),
        crossterm::event::KeyModifiers::CONTROL,
    );
    let converted = into_key_event(event);
    assert!(converted.is_some_and(|k| k.is_quit()));
}

#[test]
fn resize_passes_through() {
    assert_eq!(
        into_input_event(Event::Resize(80, 24)),
        Some(InputEvent::Resize(80, 24))
    );
}
