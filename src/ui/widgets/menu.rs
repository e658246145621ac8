//! Vertical menus.
//!
//! A [`Menu`] stacks items at `(0, i * item_height)`. At most one item is
//! active at a time: when a click activates an item, every sibling is forced
//! inactive before the click is reported as consumed. The menu's dirty flag
//! is derived from its items.

use crate::ui::core::geom::{Aabb, AabbCollection};
use crate::ui::core::painter::{draw_at, Surface};
use crate::ui::core::style::Color;
use crate::ui::core::widget::{clear_base_area, dispatch_click, Clickable, Node, Widget, WidgetBase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuColors {
    pub idle: Color,
    pub active: Color,
    pub border: Color,
    pub text: Color,
}

impl Default for MenuColors {
    fn default() -> Self {
        Self {
            idle: Color::WHITE,
            active: Color::Rgb(0x18, 0xe7, 0xe7),
            border: Color::BLACK,
            text: Color::BLACK,
        }
    }
}

type ActivateFn = Box<dyn FnMut() -> bool>;

pub struct MenuItem {
    base: WidgetBase,
    label: String,
    colors: MenuColors,
    render_color: Color,
    on_activate: Option<ActivateFn>,
}

impl MenuItem {
    pub fn new(width: i32, height: i32, label: impl Into<String>, colors: MenuColors) -> Self {
        Self {
            base: WidgetBase::new(width, height),
            label: label.into(),
            colors,
            render_color: colors.idle,
            on_activate: None,
        }
    }

    /// Runs `f` each time the item becomes active; its result decides whether
    /// the activating click is consumed.
    pub fn on_activate(mut self, f: impl FnMut() -> bool + 'static) -> Self {
        self.on_activate = Some(Box::new(f));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn render_color(&self) -> Color {
        self.render_color
    }
}

impl Node for MenuItem {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl Clickable for MenuItem {
    fn store_active(&mut self, active: bool) {
        if self.is_active() != active {
            self.render_color = if active {
                self.colors.active
            } else {
                self.colors.idle
            };
            self.set_dirty(true);
        }
        self.base.set_active_flag(active);
    }

    fn on_active_change(&mut self, _old: bool, new: bool) -> bool {
        match (&mut self.on_activate, new) {
            (Some(f), true) => f(),
            _ => true,
        }
    }
}

impl Widget for MenuItem {
    fn render(&mut self, surface: &mut dyn Surface) {
        let (w, h) = (self.width(), self.height());
        let rect = Aabb::sized(w, h);
        surface.fill_rect(rect, self.render_color);
        surface.stroke_rect(rect, self.colors.border);
        let x = (w - surface.measure_text(&self.label)) / 2;
        surface.fill_text(&self.label, x, h / 2, self.colors.text);
    }
}

pub struct Menu {
    base: WidgetBase,
    item_width: i32,
    item_height: i32,
}

impl Menu {
    pub fn new(item_width: i32, item_height: i32) -> Self {
        Self {
            base: WidgetBase::new(0, 0),
            item_width,
            item_height,
        }
    }

    pub fn item_width(&self) -> i32 {
        self.item_width
    }

    pub fn item_height(&self) -> i32 {
        self.item_height
    }

    pub fn item_position(&self, index: usize) -> (i32, i32) {
        (0, index as i32 * self.item_height)
    }

    /// A plain item sized for this menu.
    pub fn item(&self, label: impl Into<String>, colors: MenuColors) -> MenuItem {
        MenuItem::new(self.item_width, self.item_height, label, colors)
    }

    pub fn add_item(&mut self, item: impl Widget + 'static) -> usize {
        let (x, y) = self.item_position(self.base.children().len());
        self.base
            .expand_to_contain(&Aabb::new(x, y, item.width(), item.height()));
        self.base.add_child(x, y, Box::new(item))
    }

    pub fn len(&self) -> usize {
        self.base.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.children().is_empty()
    }

    pub fn item_at(&self, index: usize) -> Option<&dyn Widget> {
        self.base.children().get(index).map(|c| c.widget.as_ref())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.base
            .children()
            .iter()
            .position(|c| c.widget.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.base
            .children()
            .iter()
            .filter(|c| c.widget.is_active())
            .count()
    }

    /// Deactivates the menu and every item, firing their hooks.
    pub fn set_nothing_active(&mut self) {
        self.set_active(false);
        self.set_items_active(false);
    }

    fn set_items_active(&mut self, active: bool) {
        for child in self.base.children_mut() {
            child.widget.set_active(active);
        }
    }
}

impl Node for Menu {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl Clickable for Menu {
    fn on_active_change(&mut self, _old: bool, new: bool) -> bool {
        if !new {
            self.set_items_active(false);
            return true;
        }
        false
    }
}

impl Widget for Menu {
    // Items may change shape with their state (dropdowns), so the region is
    // rebuilt on every query instead of cached.
    fn hit_region(&self) -> AabbCollection {
        let mut region = AabbCollection::from(self.base.aabb());
        for child in self.base.children() {
            region = region.with_collection(&child.widget.hit_region().translate(child.x, child.y));
        }
        region
    }

    fn is_dirty(&self) -> bool {
        self.base.children().iter().any(|c| c.widget.is_dirty())
    }

    fn set_dirty(&mut self, dirty: bool) {
        for child in self.base.children_mut() {
            child.widget.set_dirty(dirty);
        }
    }

    fn on_click(&mut self, x: i32, y: i32) -> bool {
        let children = self.base.children_mut();
        for i in 0..children.len() {
            let (cx, cy) = (x - children[i].x, y - children[i].y);
            let item = &mut children[i].widget;
            if !item.hit_region().contains(cx, cy) || !item.on_click(cx, cy) {
                continue;
            }
            if item.is_active() {
                for (j, sibling) in children.iter_mut().enumerate() {
                    if j != i {
                        sibling.widget.store_active(false);
                    }
                }
            }
            return true;
        }
        false
    }

    fn clear_render_area(&self, surface: &mut dyn Surface) {
        for child in self.base.children() {
            if child.widget.is_dirty() {
                draw_at(surface, child.x, child.y, |s| child.widget.clear_render_area(s));
            }
        }
    }

    /// Repaints dirty items, plus clean items whose box overlaps an area the
    /// dirty ones cleared.
    fn render(&mut self, surface: &mut dyn Surface) {
        let children = self.base.children_mut();
        let cleared = children
            .iter()
            .filter(|c| c.widget.is_dirty())
            .fold(AabbCollection::new(), |acc, c| {
                acc.with_collection(&c.widget.render_area().translate(c.x, c.y))
            });
        if cleared.is_empty() {
            return;
        }
        for child in children.iter_mut() {
            let own = child.widget.base().aabb().translate(child.x, child.y);
            if !child.widget.is_dirty() && !cleared.intersects(&own) {
                continue;
            }
            let (x, y) = (child.x, child.y);
            draw_at(surface, x, y, |s| child.widget.render(s));
            child.widget.set_dirty(false);
        }
    }
}

/// A menu item owning a nested menu shown to its right while active.
pub struct DropdownMenuItem {
    item: MenuItem,
    menu: Menu,
}

impl DropdownMenuItem {
    pub fn new(item: MenuItem) -> Self {
        let menu = Menu::new(item.width(), item.height());
        Self { item, menu }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        &mut self.menu
    }

    fn submenu_origin(&self) -> (i32, i32) {
        (self.item.width(), 0)
    }
}

impl Node for DropdownMenuItem {
    fn base(&self) -> &WidgetBase {
        self.item.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.item.base_mut()
    }
}

impl Clickable for DropdownMenuItem {
    fn store_active(&mut self, active: bool) {
        let changed = self.is_active() != active;
        self.item.store_active(active);
        if changed {
            self.menu.set_dirty(true);
        }
        if !active {
            self.menu.set_nothing_active();
        }
    }

    fn on_active_change(&mut self, old: bool, new: bool) -> bool {
        self.item.on_active_change(old, new)
    }
}

impl Widget for DropdownMenuItem {
    fn hit_region(&self) -> AabbCollection {
        let own = self.item.hit_region();
        if !self.is_active() {
            return own;
        }
        let (mx, my) = self.submenu_origin();
        own.with_collection(&self.menu.hit_region().translate(mx, my))
    }

    fn is_dirty(&self) -> bool {
        self.item.is_dirty() || self.menu.is_dirty()
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.item.set_dirty(dirty);
        self.menu.set_dirty(dirty);
    }

    fn on_click(&mut self, x: i32, y: i32) -> bool {
        if self.is_active() {
            let (mx, my) = self.submenu_origin();
            let (sx, sy) = (x - mx, y - my);
            if self.menu.hit_region().contains(sx, sy) && self.menu.on_click(sx, sy) {
                self.store_active(false);
                return true;
            }
        }
        dispatch_click(self, x, y)
    }

    fn render_area(&self) -> AabbCollection {
        let (mx, my) = self.submenu_origin();
        self.item
            .render_area()
            .with_collection(&self.menu.render_area().translate(mx, my))
    }

    fn clear_render_area(&self, surface: &mut dyn Surface) {
        clear_base_area(self.item.base(), surface);
        let (mx, my) = self.submenu_origin();
        draw_at(surface, mx, my, |s| self.menu.clear_render_area(s));
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        self.item.render(surface);
        if self.is_active() {
            let (mx, my) = self.submenu_origin();
            let menu = &mut self.menu;
            draw_at(surface, mx, my, |s| menu.render(s));
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/menu.rs"]
mod tests;
