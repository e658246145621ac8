//! UI layer.
//!
//! Widgets paint through the `Surface` trait and never see `ratatui`; the
//! terminal backend is the only place that does.

pub mod core;

pub mod backend;

pub mod sequencer;

pub mod widgets;
