//! 数据模型层

pub mod element;

pub use element::{category_color, phase_color, Element, PeriodicTable};
