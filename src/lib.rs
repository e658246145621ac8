//! chemdraw - 终端化学绘图工具库
//!
//! 模块结构：
//! - ui: 控件引擎（命中测试、控件树、菜单、选择对话框、序列器）
//! - models: 数据模型（PeriodicTable）
//! - services: 服务层（配置、路径）
//! - core: 与前端无关的输入事件
//! - app: 应用层（App, FrameLoop）
//! - tui: 终端集成（crossterm）

pub mod app;
pub mod core;
pub mod models;
pub mod services;
#[cfg(feature = "tui")]
pub mod tui;
pub mod ui;
