//! Retained widget tree: ownership, hit-testing and click dispatch.
//!
//! Every widget owns a [`WidgetBase`] (its box, its positioned children and a
//! lazily cached hit-region). Behavior is layered through three traits:
//!
//! - [`Node`] gives access to the base.
//! - [`Clickable`] is the active-state capability. `store_active` writes the
//!   state together with any subtype side effects; `set_active` additionally
//!   fires `on_active_change` when the value actually changed.
//! - [`Widget`] adds hit-testing, dirty tracking, dispatch and painting.
//!
//! Overriding widgets call the free functions in this module to reuse the
//! default behavior explicitly.

use std::cell::OnceCell;

use super::geom::{Aabb, AabbCollection};
use super::painter::{draw_at, Surface};

/// A child positioned at `(x, y)` in its parent's coordinate space.
pub struct Child {
    pub x: i32,
    pub y: i32,
    pub widget: Box<dyn Widget>,
}

pub struct WidgetBase {
    aabb: Aabb,
    children: Vec<Child>,
    region: OnceCell<AabbCollection>,
    active: bool,
    dirty: bool,
}

impl WidgetBase {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_aabb(Aabb::sized(width, height))
    }

    pub fn with_aabb(aabb: Aabb) -> Self {
        Self {
            aabb,
            children: Vec::new(),
            region: OnceCell::new(),
            active: false,
            dirty: true,
        }
    }

    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    /// Grows the own box to enclose `other`; drops the cached region.
    pub fn expand_to_contain(&mut self, other: &Aabb) {
        self.aabb.expand_to_contain_aabb(other);
        self.invalidate_region();
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Child] {
        &mut self.children
    }

    pub fn add_child(&mut self, x: i32, y: i32, widget: Box<dyn Widget>) -> usize {
        self.children.push(Child { x, y, widget });
        self.invalidate_region();
        self.children.len() - 1
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Child> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        self.invalidate_region();
        Some(child)
    }

    /// Own box unioned with every child's region at its offset.
    ///
    /// Cached until the child list changes. A child whose own shape changes
    /// later does not refresh this cache.
    pub fn hit_region(&self) -> &AabbCollection {
        self.region.get_or_init(|| {
            let mut region = AabbCollection::from(self.aabb);
            for child in &self.children {
                let translated = child.widget.hit_region().translate(child.x, child.y);
                region = region.with_collection(&translated);
            }
            region
        })
    }

    pub fn is_region_cached(&self) -> bool {
        self.region.get().is_some()
    }

    pub fn invalidate_region(&mut self) {
        self.region.take();
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active_flag(&mut self, active: bool) {
        self.active = active;
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty_flag(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

pub trait Node {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;
}

pub trait Clickable: Node {
    fn is_active(&self) -> bool {
        self.base().active()
    }

    /// Writes the state and applies subtype side effects (colors, cascades)
    /// without firing the change hook.
    fn store_active(&mut self, active: bool) {
        self.base_mut().set_active_flag(active);
    }

    /// Called by `set_active` after a real transition. Returns whether the
    /// caller should treat the transition as consuming the click.
    fn on_active_change(&mut self, _old: bool, _new: bool) -> bool {
        false
    }

    fn set_active(&mut self, active: bool) -> bool {
        let old = self.is_active();
        self.store_active(active);
        if old != active {
            self.on_active_change(old, active)
        } else {
            false
        }
    }
}

pub trait Widget: Clickable {
    fn width(&self) -> i32 {
        self.base().aabb().width
    }

    fn height(&self) -> i32 {
        self.base().aabb().height
    }

    fn hit_region(&self) -> AabbCollection {
        self.base().hit_region().clone()
    }

    fn is_dirty(&self) -> bool {
        self.base().dirty()
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.base_mut().set_dirty_flag(dirty);
    }

    /// Handles a click in local coordinates; returns whether it was consumed.
    fn on_click(&mut self, x: i32, y: i32) -> bool {
        dispatch_click(self, x, y)
    }

    /// Everything `clear_render_area` may erase.
    fn render_area(&self) -> AabbCollection {
        AabbCollection::from(self.base().aabb().outset(1))
    }

    fn clear_render_area(&self, surface: &mut dyn Surface) {
        clear_base_area(self.base(), surface);
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        render_children(self.base_mut(), surface);
    }
}

/// Default dispatch: children first (insertion order, first consumer wins),
/// otherwise toggle the widget's own state.
pub fn dispatch_click<W: Widget + ?Sized>(widget: &mut W, x: i32, y: i32) -> bool {
    if dispatch_to_children(widget.base_mut(), x, y) {
        return true;
    }
    toggle_active(widget)
}

pub fn dispatch_to_children(base: &mut WidgetBase, x: i32, y: i32) -> bool {
    for child in base.children_mut() {
        let (cx, cy) = (x - child.x, y - child.y);
        if child.widget.hit_region().contains(cx, cy) && child.widget.on_click(cx, cy) {
            return true;
        }
    }
    false
}

pub fn toggle_active<W: Clickable + ?Sized>(widget: &mut W) -> bool {
    let next = !widget.is_active();
    widget.set_active(next)
}

/// Clears the own box with a one-unit margin, then every child at its offset.
pub fn clear_base_area(base: &WidgetBase, surface: &mut dyn Surface) {
    surface.clear_rect(base.aabb().outset(1));
    for child in base.children() {
        draw_at(surface, child.x, child.y, |s| child.widget.clear_render_area(s));
    }
}

pub fn render_children(base: &mut WidgetBase, surface: &mut dyn Surface) {
    for child in base.children_mut() {
        let (x, y) = (child.x, child.y);
        draw_at(surface, x, y, |s| child.widget.render(s));
    }
}

/// A plain container with no behavior of its own.
pub struct Panel {
    base: WidgetBase,
}

impl Panel {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            base: WidgetBase::new(width, height),
        }
    }

    pub fn add_child(&mut self, x: i32, y: i32, widget: Box<dyn Widget>) -> usize {
        self.base.add_child(x, y, widget)
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Child> {
        self.base.remove_child(index)
    }
}

impl Node for Panel {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl Clickable for Panel {}

impl Widget for Panel {}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/widget.rs"]
mod tests;
