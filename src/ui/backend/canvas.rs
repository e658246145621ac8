//! Retained cell grid that `PaintCmd`s are applied to.
//!
//! Cells may be transparent (`None`), which is what `Clear` produces; layers
//! are composited top over bottom before they reach a terminal.

use crate::ui::core::geom::Aabb;
use crate::ui::core::painter::PaintCmd;
use crate::ui::core::style::{Color, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub symbol: String,
    pub style: Style,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self {
            symbol: " ".to_string(),
            style: Style::default().bg(bg),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Option<Cell>>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Aabb {
        Aabb::sized(self.width as i32, self.height as i32)
    }

    /// Resizes to `width x height`, dropping all content when the size changes.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        let idx = self.idx(x, y)?;
        self.cells.get(idx)?.as_ref()
    }

    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_none()
    }

    /// Symbols of row `y` with transparent cells as spaces.
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width as i32)
            .map(|x| self.cell(x, y).map_or(" ", |c| c.symbol.as_str()))
            .collect()
    }

    fn slot_mut(&mut self, x: i32, y: i32) -> Option<&mut Option<Cell>> {
        let idx = self.idx(x, y)?;
        self.cells.get_mut(idx)
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn apply(&mut self, cmds: &[PaintCmd]) {
        for cmd in cmds {
            match cmd {
                PaintCmd::Clear { rect } => clear_rect(self, *rect),
                PaintCmd::FillRect { rect, color } => fill_rect(self, *rect, *color),
                PaintCmd::StrokeRect { rect, color } => stroke_rect(self, *rect, *color),
                PaintCmd::Text { x, y, text, color } => draw_text(self, *x, *y, text, *color),
            }
        }
    }

    /// Copies every opaque cell of `top` over `self`. Background colors not
    /// set on the upper cell show through from below.
    pub fn composite(&mut self, top: &Canvas) {
        let width = self.width.min(top.width) as i32;
        let height = self.height.min(top.height) as i32;
        for y in 0..height {
            for x in 0..width {
                let Some(upper) = top.cell(x, y) else {
                    continue;
                };
                let Some(slot) = self.slot_mut(x, y) else {
                    continue;
                };
                let style = match slot {
                    Some(lower) => lower.style.patch(upper.style),
                    None => upper.style,
                };
                *slot = Some(Cell {
                    symbol: upper.symbol.clone(),
                    style,
                });
            }
        }
    }
}

/// `rect` clipped to the canvas as half-open cell ranges.
fn clip(canvas: &Canvas, rect: Aabb) -> Option<(std::ops::Range<i32>, std::ops::Range<i32>)> {
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.right().min(canvas.width as i32);
    let y1 = rect.bottom().min(canvas.height as i32);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0..x1, y0..y1))
}

fn clear_rect(canvas: &mut Canvas, rect: Aabb) {
    let Some((xs, ys)) = clip(canvas, rect) else {
        return;
    };
    for y in ys {
        for x in xs.clone() {
            if let Some(slot) = canvas.slot_mut(x, y) {
                *slot = None;
            }
        }
    }
}

fn fill_rect(canvas: &mut Canvas, rect: Aabb, color: Color) {
    let Some((xs, ys)) = clip(canvas, rect) else {
        return;
    };
    for y in ys {
        for x in xs.clone() {
            if let Some(slot) = canvas.slot_mut(x, y) {
                *slot = Some(Cell::blank(color));
            }
        }
    }
}

/// Writes `symbol` in `color`, keeping the background already at `(x, y)`.
fn put(canvas: &mut Canvas, x: i32, y: i32, symbol: &str, color: Color) {
    let Some(slot) = canvas.slot_mut(x, y) else {
        return;
    };
    let bg = slot.as_ref().and_then(|c| c.style.bg);
    let mut style = Style::default().fg(color);
    style.bg = bg;
    *slot = Some(Cell {
        symbol: symbol.to_string(),
        style,
    });
}

fn stroke_rect(canvas: &mut Canvas, rect: Aabb, color: Color) {
    if rect.width <= 0 || rect.height <= 0 {
        return;
    }
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    if rect.height == 1 {
        for x in rect.x..=right {
            put(canvas, x, rect.y, "─", color);
        }
        return;
    }
    if rect.width == 1 {
        for y in rect.y..=bottom {
            put(canvas, rect.x, y, "│", color);
        }
        return;
    }

    for x in rect.x + 1..right {
        put(canvas, x, rect.y, "─", color);
        put(canvas, x, bottom, "─", color);
    }
    for y in rect.y + 1..bottom {
        put(canvas, rect.x, y, "│", color);
        put(canvas, right, y, "│", color);
    }
    put(canvas, rect.x, rect.y, "┌", color);
    put(canvas, right, rect.y, "┐", color);
    put(canvas, rect.x, bottom, "└", color);
    put(canvas, right, bottom, "┘", color);
}

fn draw_text(canvas: &mut Canvas, x: i32, y: i32, text: &str, color: Color) {
    if y < 0 || y >= canvas.height as i32 {
        return;
    }
    let mut x = x;
    for g in text.graphemes(true) {
        let w = UnicodeWidthStr::width(g) as i32;
        if w == 0 {
            continue;
        }
        if x >= canvas.width as i32 {
            break;
        }
        // Wide glyphs are never split at the right edge.
        if w > 1 && x + w > canvas.width as i32 {
            break;
        }
        if x >= 0 {
            put(canvas, x, y, g, color);
            for dx in 1..w {
                put(canvas, x + dx, y, " ", color);
            }
        }
        x += w;
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/backend/canvas.rs"]
mod tests;
