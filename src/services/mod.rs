//! 服务层模块
//!
//! - paths: 日志/配置目录
//! - settings: 用户配置（settings.json）

pub mod paths;
pub mod settings;

pub use paths::{ensure_log_dir, get_log_dir};
pub use settings::{
    ensure_settings_file, get_settings_path, load_settings, load_settings_from, Settings,
    SettingsError,
};
