//! Per-frame drawing.
//!
//! The base layer is repainted from scratch every frame (FPS indicator and
//! status line). The overlay layer is retained between frames and only
//! touched through the scene's dirty regions. The backend sees the two
//! layers composited.

use std::any::Any;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use crate::ui::backend::{Backend, Canvas};
use crate::ui::core::painter::{Painter, Surface};
use crate::ui::core::style::Color;

const FPS_AT: (i32, i32) = (1, 0);
const ERROR_AT: (i32, i32) = (1, 1);

/// What the frame loop draws onto the overlay layer.
pub trait Scene {
    fn draw(&mut self, overlay: &mut dyn Surface);

    fn status(&self) -> &str {
        ""
    }

    /// Called when the overlay was lost and everything must be repainted.
    fn invalidate(&mut self) {}
}

#[derive(Debug)]
pub enum DrawError {
    Surface(String),
    Io(io::Error),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(msg) => write!(f, "render failed: {msg}"),
            Self::Io(e) => write!(f, "present failed: {e}"),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(_) => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for DrawError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub fn fps_from_delta(delta: Duration) -> u32 {
    let secs = delta.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    (1.0 / secs).round().min(u32::MAX as f64) as u32
}

/// Turns monotonically increasing timestamps into a frame rate.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: Duration) -> u32 {
        let delta = now.saturating_sub(self.last);
        self.last = now;
        fps_from_delta(delta)
    }
}

pub struct FrameLoop {
    base: Canvas,
    overlay: Canvas,
    clock: FrameClock,
    painter: Painter,
    halted: bool,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            base: Canvas::new(0, 0),
            overlay: Canvas::new(0, 0),
            clock: FrameClock::new(),
            painter: Painter::new(),
            halted: false,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn base(&self) -> &Canvas {
        &self.base
    }

    pub fn overlay(&self) -> &Canvas {
        &self.overlay
    }

    /// Draws and presents one frame. After a render failure the loop is
    /// halted and later calls draw nothing.
    pub fn frame(
        &mut self,
        scene: &mut dyn Scene,
        now: Duration,
        backend: &mut dyn Backend,
    ) -> Result<(), DrawError> {
        if self.halted {
            return Ok(());
        }

        let (width, height) = backend.size()?;
        if (width, height) != (self.overlay.width(), self.overlay.height()) {
            self.base.resize(width, height);
            self.overlay.resize(width, height);
            scene.invalidate();
        }

        let fps = self.clock.tick(now);
        self.base.reset();
        self.painter.clear();
        draw_fps(&mut self.painter, fps, Color::GRAY);
        let status = scene.status();
        if !status.is_empty() {
            self.painter
                .fill_text(status, 1, i32::from(height) - 1, Color::GRAY);
        }
        self.base.apply(self.painter.cmds());

        self.painter.clear();
        let painter = &mut self.painter;
        let drawn = panic::catch_unwind(AssertUnwindSafe(|| scene.draw(painter)));
        if let Err(payload) = drawn {
            let msg = panic_message(payload.as_ref());
            tracing::error!(error = %msg, "render pass failed");
            self.halt(&msg, backend)?;
            return Err(DrawError::Surface(msg));
        }
        self.overlay.apply(self.painter.cmds());

        self.present(backend)?;
        Ok(())
    }

    fn halt(&mut self, msg: &str, backend: &mut dyn Backend) -> io::Result<()> {
        self.halted = true;
        self.base.reset();
        self.painter.clear();
        draw_fps(&mut self.painter, fps_from_delta(Duration::MAX), Color::RED);
        self.painter.fill_text(
            &format!("Error occurred! {msg}"),
            ERROR_AT.0,
            ERROR_AT.1,
            Color::RED,
        );
        self.base.apply(self.painter.cmds());
        self.present(backend)
    }

    fn present(&self, backend: &mut dyn Backend) -> io::Result<()> {
        let mut frame = self.base.clone();
        frame.composite(&self.overlay);
        backend.present(&frame)
    }
}

fn draw_fps(surface: &mut dyn Surface, fps: u32, color: Color) {
    surface.fill_text(&format!("FPS: {fps}"), FPS_AT.0, FPS_AT.1, color);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "unknown panic".to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/app/frame.rs"]
mod tests;
