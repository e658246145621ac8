//! Hit-testing geometry, the painting surface and the widget tree.

pub mod geom;
pub mod painter;
pub mod style;
pub mod widget;
