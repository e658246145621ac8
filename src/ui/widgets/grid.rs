//! Addressable cell grids and the data provider behind them.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ui::core::geom::{Aabb, AabbCollection};
use crate::ui::core::painter::{draw_at, Surface};
use crate::ui::core::style::Color;
use crate::ui::core::widget::{clear_base_area, Clickable, Node, Widget, WidgetBase};

use super::menu::MenuItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub col: u16,
    pub row: u16,
}

impl GridPos {
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell<T> {
    pub value: T,
    pub label: String,
    pub category: Color,
    pub phase: Color,
}

/// Point lookup over a sparse `columns x rows` grid.
pub trait GridProvider<T> {
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
    fn cell(&self, pos: GridPos) -> Option<GridCell<T>>;
}

/// In-memory provider backed by a map of occupied cells.
#[derive(Clone, Debug)]
pub struct SparseGrid<T> {
    columns: u16,
    rows: u16,
    cells: HashMap<GridPos, GridCell<T>>,
}

impl<T> SparseGrid<T> {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            cells: HashMap::new(),
        }
    }

    /// Stores `cell` at `pos`; positions outside the grid are ignored.
    pub fn insert(&mut self, pos: GridPos, cell: GridCell<T>) {
        if pos.col < self.columns && pos.row < self.rows {
            self.cells.insert(pos, cell);
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<T: Clone> GridProvider<T> for SparseGrid<T> {
    fn columns(&self) -> u16 {
        self.columns
    }

    fn rows(&self) -> u16 {
        self.rows
    }

    fn cell(&self, pos: GridPos) -> Option<GridCell<T>> {
        self.cells.get(&pos).cloned()
    }
}

/// Cell size plus the gap between neighbouring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridMetrics {
    pub cell_width: i32,
    pub cell_height: i32,
    pub gap: i32,
}

impl GridMetrics {
    pub fn pitch(&self) -> (i32, i32) {
        (self.cell_width + self.gap, self.cell_height + self.gap)
    }

    pub fn cell_origin(&self, pos: GridPos) -> (i32, i32) {
        let (px, py) = self.pitch();
        (pos.col as i32 * px, pos.row as i32 * py)
    }

    pub fn cell_rect(&self, pos: GridPos) -> Aabb {
        let (x, y) = self.cell_origin(pos);
        Aabb::new(x, y, self.cell_width, self.cell_height)
    }

    /// The cell slot under `(x, y)`, gap included; `None` left of or above
    /// the origin.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<GridPos> {
        if x < 0 || y < 0 {
            return None;
        }
        let (px, py) = self.pitch();
        if px <= 0 || py <= 0 {
            return None;
        }
        let col = u16::try_from(x / px).ok()?;
        let row = u16::try_from(y / py).ok()?;
        Some(GridPos::new(col, row))
    }

    pub fn size(&self, columns: u16, rows: u16) -> (i32, i32) {
        let (px, py) = self.pitch();
        (columns as i32 * px, rows as i32 * py)
    }
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            cell_width: 3,
            cell_height: 1,
            gap: 1,
        }
    }
}

pub fn draw_grid<T>(surface: &mut dyn Surface, provider: &dyn GridProvider<T>, metrics: GridMetrics) {
    for row in 0..provider.rows() {
        for col in 0..provider.columns() {
            let pos = GridPos::new(col, row);
            let Some(cell) = provider.cell(pos) else {
                continue;
            };
            let rect = metrics.cell_rect(pos);
            surface.fill_rect(rect, cell.category);
            let text_x = rect.x + (rect.width - surface.measure_text(&cell.label)) / 2;
            surface.fill_text(&cell.label, text_x, rect.y + rect.height / 2, cell.phase);
        }
    }
}

pub fn highlight_cell(surface: &mut dyn Surface, metrics: GridMetrics, pos: GridPos, color: Color) {
    surface.stroke_rect(metrics.cell_rect(pos).outset(1), color);
}

/// A menu item that shows a read-only preview of the grid while active.
pub struct GridPreviewItem<T> {
    item: MenuItem,
    provider: Rc<dyn GridProvider<T>>,
    metrics: GridMetrics,
    origin: (i32, i32),
}

impl<T> GridPreviewItem<T> {
    pub fn new(
        item: MenuItem,
        provider: Rc<dyn GridProvider<T>>,
        metrics: GridMetrics,
        origin: (i32, i32),
    ) -> Self {
        Self {
            item,
            provider,
            metrics,
            origin,
        }
    }

    /// Preview rectangle in the item's coordinate space.
    pub fn preview_rect(&self) -> Aabb {
        let (w, h) = self
            .metrics
            .size(self.provider.columns(), self.provider.rows());
        Aabb::new(self.origin.0, self.origin.1, w, h)
    }
}

impl<T> Node for GridPreviewItem<T> {
    fn base(&self) -> &WidgetBase {
        self.item.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.item.base_mut()
    }
}

impl<T> Clickable for GridPreviewItem<T> {
    fn store_active(&mut self, active: bool) {
        self.item.store_active(active);
    }

    fn on_active_change(&mut self, old: bool, new: bool) -> bool {
        self.item.on_active_change(old, new)
    }
}

impl<T> Widget for GridPreviewItem<T> {
    fn render_area(&self) -> AabbCollection {
        self.item.render_area().with_box(self.preview_rect().outset(1))
    }

    fn clear_render_area(&self, surface: &mut dyn Surface) {
        clear_base_area(self.item.base(), surface);
        surface.clear_rect(self.preview_rect().outset(1));
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        if self.is_active() {
            let provider = self.provider.as_ref();
            let metrics = self.metrics;
            draw_at(surface, self.origin.0, self.origin.1, |s| {
                draw_grid(s, provider, metrics)
            });
        }
        self.item.render(surface);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/grid.rs"]
mod tests;
