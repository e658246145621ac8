//! Modal grid selection.
//!
//! A [`SelectDialog`] shows a [`GridProvider`] with Ok and Cancel buttons
//! below it. It owns the resolving half of a oneshot channel: Ok sends the
//! chosen value, Cancel sends [`SelectionError::Cancelled`]. Whoever holds
//! the receiver decides what happens next.

use std::fmt;
use std::rc::Rc;

use tokio::sync::oneshot;

use crate::ui::core::geom::{Aabb, AabbCollection};
use crate::ui::core::painter::{draw_at, Surface};
use crate::ui::core::style::Color;
use crate::ui::core::widget::{clear_base_area, toggle_active, Clickable, Node, Widget, WidgetBase};

use super::button::{Button, ButtonColors};
use super::grid::{draw_grid, highlight_cell, GridMetrics, GridPos, GridProvider};

pub const CANCEL_REASON: &str = "canceled";

#[derive(Debug)]
pub enum SelectionError {
    /// The dialog was rejected; carries an opaque reason.
    Cancelled(String),
    /// The resolving side went away without settling.
    Abandoned,
}

impl SelectionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(reason) => write!(f, "selection cancelled: {reason}"),
            Self::Abandoned => write!(f, "selection abandoned"),
        }
    }
}

impl std::error::Error for SelectionError {}

pub type SelectionResult<T> = Result<T, SelectionError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogLabels {
    pub ok: String,
    pub cancel: String,
}

impl DialogLabels {
    pub fn new(ok: impl Into<String>, cancel: impl Into<String>) -> Self {
        Self {
            ok: ok.into(),
            cancel: cancel.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogColors {
    pub highlight: Color,
    pub buttons: ButtonColors,
}

impl Default for DialogColors {
    fn default() -> Self {
        Self {
            highlight: Color::Rgb(0x22, 0xaa, 0x99),
            buttons: ButtonColors::default(),
        }
    }
}

/// Everything a dialog needs except its labels; one template builds every
/// dialog a sequencer shows.
pub struct DialogTemplate<T> {
    pub provider: Rc<dyn GridProvider<T>>,
    pub metrics: GridMetrics,
    pub button_size: (i32, i32),
    pub colors: DialogColors,
}

impl<T> Clone for DialogTemplate<T> {
    fn clone(&self) -> Self {
        Self {
            provider: Rc::clone(&self.provider),
            metrics: self.metrics,
            button_size: self.button_size,
            colors: self.colors,
        }
    }
}

impl<T: Clone> DialogTemplate<T> {
    pub fn new(provider: Rc<dyn GridProvider<T>>) -> Self {
        Self {
            provider,
            metrics: GridMetrics::default(),
            button_size: (10, 3),
            colors: DialogColors::default(),
        }
    }

    pub fn build(
        &self,
        labels: DialogLabels,
        settle: oneshot::Sender<SelectionResult<T>>,
    ) -> SelectDialog<T> {
        SelectDialog::new(self, labels, settle)
    }
}

pub struct SelectDialog<T> {
    base: WidgetBase,
    provider: Rc<dyn GridProvider<T>>,
    metrics: GridMetrics,
    highlight: Color,
    labels: DialogLabels,
    ok: Button,
    ok_at: (i32, i32),
    cancel: Button,
    cancel_at: (i32, i32),
    selected: Option<(GridPos, T)>,
    settle: Option<oneshot::Sender<SelectionResult<T>>>,
}

impl<T: Clone> SelectDialog<T> {
    fn new(
        template: &DialogTemplate<T>,
        labels: DialogLabels,
        settle: oneshot::Sender<SelectionResult<T>>,
    ) -> Self {
        let metrics = template.metrics;
        let provider = Rc::clone(&template.provider);
        let (grid_w, grid_h) = metrics.size(provider.columns(), provider.rows());
        let (bw, bh) = template.button_size;
        let buttons = template.colors.buttons;

        let cancel_at = (0, grid_h + 1);
        let ok_at = (bw + 2, grid_h + 1);

        Self {
            base: WidgetBase::new(grid_w, grid_h),
            provider,
            metrics,
            highlight: template.colors.highlight,
            ok: Button::new(bw, bh, labels.ok.clone(), buttons).disabled(),
            ok_at,
            cancel: Button::new(bw, bh, labels.cancel.clone(), buttons),
            cancel_at,
            labels,
            selected: None,
            settle: Some(settle),
        }
    }

    pub fn labels(&self) -> &DialogLabels {
        &self.labels
    }

    pub fn selected(&self) -> Option<&(GridPos, T)> {
        self.selected.as_ref()
    }

    pub fn take_selected(&mut self) -> Option<T> {
        self.selected.take().map(|(_, value)| value)
    }

    pub fn is_settled(&self) -> bool {
        self.settle.is_none()
    }

    pub fn ok_button(&self) -> &Button {
        &self.ok
    }

    pub fn cancel_button(&self) -> &Button {
        &self.cancel
    }

    /// Ok button box in dialog coordinates.
    pub fn ok_rect(&self) -> Aabb {
        Aabb::new(self.ok_at.0, self.ok_at.1, self.ok.width(), self.ok.height())
    }

    pub fn cancel_rect(&self) -> Aabb {
        Aabb::new(
            self.cancel_at.0,
            self.cancel_at.1,
            self.cancel.width(),
            self.cancel.height(),
        )
    }

    /// Center of a grid cell in dialog coordinates.
    pub fn cell_center(&self, pos: GridPos) -> (i32, i32) {
        let rect = self.metrics.cell_rect(pos);
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    /// Records the cell under `(x, y)` as the pending choice. Empty cells and
    /// points outside the grid are ignored.
    pub fn select_at(&mut self, x: i32, y: i32) -> bool {
        if !self.base.aabb().contains(x, y) {
            return false;
        }
        let Some(pos) = self.metrics.cell_at(x, y) else {
            return false;
        };
        let Some(cell) = self.provider.cell(pos) else {
            return false;
        };
        self.selected = Some((pos, cell.value));
        self.ok.set_enabled(true);
        self.set_dirty(true);
        true
    }

    fn resolve(&mut self) -> bool {
        let Some((_, value)) = self.selected.as_ref() else {
            return false;
        };
        let Some(tx) = self.settle.take() else {
            return false;
        };
        tracing::debug!(label = %self.labels.ok, "selection dialog resolved");
        let _ = tx.send(Ok(value.clone()));
        true
    }

    fn reject(&mut self, reason: &str) -> bool {
        let Some(tx) = self.settle.take() else {
            return false;
        };
        tracing::debug!(label = %self.labels.cancel, reason, "selection dialog rejected");
        let _ = tx.send(Err(SelectionError::Cancelled(reason.to_string())));
        true
    }
}

impl<T> Node for SelectDialog<T> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl<T> Clickable for SelectDialog<T> {}

impl<T: Clone> Widget for SelectDialog<T> {
    fn hit_region(&self) -> AabbCollection {
        AabbCollection::from(self.base.aabb())
            .with_box(self.ok_rect())
            .with_box(self.cancel_rect())
    }

    fn is_dirty(&self) -> bool {
        self.base.dirty() || self.ok.is_dirty() || self.cancel.is_dirty()
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.base.set_dirty_flag(dirty);
        self.ok.set_dirty(dirty);
        self.cancel.set_dirty(dirty);
    }

    fn on_click(&mut self, x: i32, y: i32) -> bool {
        if self.select_at(x, y) {
            return true;
        }
        let ok = self.ok_rect();
        if ok.contains(x, y) {
            return self.ok.on_click(x - ok.x, y - ok.y) && self.resolve();
        }
        let cancel = self.cancel_rect();
        if cancel.contains(x, y) {
            return self.cancel.on_click(x - cancel.x, y - cancel.y) && self.reject(CANCEL_REASON);
        }
        toggle_active(self)
    }

    fn clear_render_area(&self, surface: &mut dyn Surface) {
        clear_base_area(&self.base, surface);
        draw_at(surface, self.ok_at.0, self.ok_at.1, |s| self.ok.clear_render_area(s));
        draw_at(surface, self.cancel_at.0, self.cancel_at.1, |s| {
            self.cancel.clear_render_area(s)
        });
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        draw_grid(surface, self.provider.as_ref(), self.metrics);
        if let Some((pos, _)) = &self.selected {
            highlight_cell(surface, self.metrics, *pos, self.highlight);
        }
        let ok = &mut self.ok;
        draw_at(surface, self.ok_at.0, self.ok_at.1, |s| ok.render(s));
        let cancel = &mut self.cancel;
        draw_at(surface, self.cancel_at.0, self.cancel_at.1, |s| cancel.render(s));
        self.base.set_dirty_flag(false);
    }
}

/// Takes a settled dialog's place until its pixels are erased.
pub struct ClearingStandIn {
    delegate: Box<dyn Widget>,
    cleared: bool,
}

impl ClearingStandIn {
    pub fn new(delegate: Box<dyn Widget>) -> Self {
        Self {
            delegate,
            cleared: false,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Clears the delegate's area the first time; later calls do nothing.
    pub fn clear_once(&mut self, surface: &mut dyn Surface) -> bool {
        if self.cleared {
            return false;
        }
        self.delegate.clear_render_area(surface);
        self.cleared = true;
        true
    }
}

impl Node for ClearingStandIn {
    fn base(&self) -> &WidgetBase {
        self.delegate.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.delegate.base_mut()
    }
}

impl Clickable for ClearingStandIn {}

impl Widget for ClearingStandIn {
    fn hit_region(&self) -> AabbCollection {
        AabbCollection::new()
    }

    fn is_dirty(&self) -> bool {
        !self.cleared
    }

    fn set_dirty(&mut self, _dirty: bool) {}

    fn on_click(&mut self, _x: i32, _y: i32) -> bool {
        false
    }

    fn clear_render_area(&self, surface: &mut dyn Surface) {
        if !self.cleared {
            self.delegate.clear_render_area(surface);
        }
    }

    fn render(&mut self, _surface: &mut dyn Surface) {
        self.cleared = true;
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/select_dialog.rs"]
mod tests;
