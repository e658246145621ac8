//! Rendering backends.
//!
//! Widgets paint into [`Canvas`] layers; a backend only ever sees the
//! composited result, so the rest of the crate does not mention `ratatui`.

use std::io;

pub mod canvas;

pub use canvas::{Canvas, Cell};

pub trait Backend {
    fn size(&self) -> io::Result<(u16, u16)>;

    fn present(&mut self, frame: &Canvas) -> io::Result<()>;
}

#[cfg(feature = "tui")]
pub mod terminal;

/// Keeps the last presented frame in memory.
#[derive(Debug)]
pub struct HeadlessBackend {
    width: u16,
    height: u16,
    last: Option<Canvas>,
    frames: usize,
}

impl HeadlessBackend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            last: None,
            frames: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&Canvas> {
        self.last.as_ref()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Backend for HeadlessBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn present(&mut self, frame: &Canvas) -> io::Result<()> {
        self.last = Some(frame.clone());
        self.frames += 1;
        Ok(())
    }
}
