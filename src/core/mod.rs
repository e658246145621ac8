//! 核心框架模块
//!
//! - Event: 与前端无关的输入事件定义

pub mod event;

pub use event::{InputEvent, KeyCode, KeyEvent, KeyModifiers, PointerClick};
