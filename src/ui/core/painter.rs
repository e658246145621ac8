use super::geom::Aabb;
use super::style::Color;
use unicode_width::UnicodeWidthStr;

/// The drawing surface the widget tree paints onto.
///
/// Coordinates are relative to the current translation. A component may only
/// clear or draw the rectangle it owns (its own box, or a child's box at its
/// known offset); nothing enforces this at runtime.
pub trait Surface {
    fn clear_rect(&mut self, rect: Aabb);
    fn fill_rect(&mut self, rect: Aabb, color: Color);
    fn stroke_rect(&mut self, rect: Aabb, color: Color);
    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Color);
    fn measure_text(&self, text: &str) -> i32;
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: i32, dy: i32);
}

/// Runs `f` between `save`/`restore`.
pub fn isolate<R>(surface: &mut dyn Surface, f: impl FnOnce(&mut dyn Surface) -> R) -> R {
    surface.save();
    let out = f(surface);
    surface.restore();
    out
}

/// Runs `f` with the surface translated by `(x, y)`, restoring afterwards.
pub fn draw_at<R>(
    surface: &mut dyn Surface,
    x: i32,
    y: i32,
    f: impl FnOnce(&mut dyn Surface) -> R,
) -> R {
    isolate(surface, |s| {
        s.translate(x, y);
        f(s)
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaintCmd {
    Clear { rect: Aabb },
    FillRect { rect: Aabb, color: Color },
    StrokeRect { rect: Aabb, color: Color },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
    },
}

/// A `Surface` that records commands in absolute coordinates.
#[derive(Debug, Default)]
pub struct Painter {
    cmds: Vec<PaintCmd>,
    offset: (i32, i32),
    saved: Vec<(i32, i32)>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn cmds(&self) -> &[PaintCmd] {
        &self.cmds
    }

    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    fn absolute(&self, rect: Aabb) -> Aabb {
        rect.translate(self.offset.0, self.offset.1)
    }
}

impl Surface for Painter {
    fn clear_rect(&mut self, rect: Aabb) {
        let rect = self.absolute(rect);
        self.cmds.push(PaintCmd::Clear { rect });
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        let rect = self.absolute(rect);
        self.cmds.push(PaintCmd::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Aabb, color: Color) {
        let rect = self.absolute(rect);
        self.cmds.push(PaintCmd::StrokeRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.cmds.push(PaintCmd::Text {
            x: x + self.offset.0,
            y: y + self.offset.1,
            text: text.to_string(),
            color,
        });
    }

    fn measure_text(&self, text: &str) -> i32 {
        text.width().min(i32::MAX as usize) as i32
    }

    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, as a canvas context does.
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.offset = (self.offset.0 + dx, self.offset.1 + dy);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/painter.rs"]
mod tests;
