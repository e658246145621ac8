//! Input events as the widget engine sees them, independent of the terminal
//! crate that produced them.

use std::ops::{BitOr, BitOrAssign};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Click(PointerClick),
    Resize(u16, u16),
}

impl InputEvent {
    pub fn as_click(&self) -> Option<PointerClick> {
        match self {
            InputEvent::Click(click) => Some(*click),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            InputEvent::Key(e) => Some(e),
            _ => None,
        }
    }
}

/// A primary-button press in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerClick {
    pub x: i32,
    pub y: i32,
}

impl PointerClick {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The same click relative to `origin`.
    pub fn relative_to(self, origin: (i32, i32)) -> Self {
        Self::new(self.x - origin.0, self.y - origin.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Tab,
    Backspace,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for KeyModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for KeyModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// `q`, Esc or Ctrl-C.
    pub fn is_quit(&self) -> bool {
        match self.code {
            KeyCode::Esc => true,
            KeyCode::Char('q') => self.modifiers == KeyModifiers::NONE,
            KeyCode::Char('c') => self.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
