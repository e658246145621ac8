use crate::ui::core::geom::Aabb;
use crate::ui::core::painter::Surface;
use crate::ui::core::style::Color;
use crate::ui::core::widget::{Clickable, Node, Widget, WidgetBase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonColors {
    pub on: Color,
    pub off: Color,
    pub disabled: Color,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            on: Color::Rgb(0x2d, 0xff, 0xb3),
            off: Color::WHITE,
            disabled: Color::GRAY,
        }
    }
}

/// A labelled, momentary push button.
///
/// A click on an enabled button is consumed and counted as a press; a
/// disabled button lets the click through untouched.
pub struct Button {
    base: WidgetBase,
    label: String,
    colors: ButtonColors,
    enabled: bool,
}

impl Button {
    pub fn new(width: i32, height: i32, label: impl Into<String>, colors: ButtonColors) -> Self {
        Self {
            base: WidgetBase::new(width, height),
            label: label.into(),
            colors,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.set_dirty(true);
        }
    }

    pub fn color(&self) -> Color {
        if self.is_active() {
            self.colors.on
        } else if self.enabled {
            self.colors.off
        } else {
            self.colors.disabled
        }
    }
}

impl Node for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl Clickable for Button {
    fn store_active(&mut self, active: bool) {
        if self.is_active() != active {
            self.set_dirty(true);
        }
        self.base.set_active_flag(active);
    }
}

impl Widget for Button {
    fn on_click(&mut self, _x: i32, _y: i32) -> bool {
        self.enabled
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        let color = self.color();
        let (w, h) = (self.width(), self.height());
        surface.stroke_rect(Aabb::sized(w, h), color);
        let x = (w - surface.measure_text(&self.label)) / 2;
        surface.fill_text(&self.label, x, h / 2, color);
        self.set_dirty(false);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/button.rs"]
mod tests;
