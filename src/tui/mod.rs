//! Terminal integration: crossterm input conversion and screen mode setup.
//!
//! Only the binary and this module know about crossterm; the widget engine
//! sees `core::InputEvent` and a `Backend`.

pub mod crossterm;
pub mod terminal_guard;
