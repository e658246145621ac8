//! 用户配置：`<cache>/.chemdraw/settings.json`
//!
//! Every field has a default, so a partial file only overrides what it names.
//! Colors are names or `#rrggbb`; anything unparsable keeps the default.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::get_cache_dir;
use crate::ui::core::style::Color;
use crate::ui::sequencer::SequenceLabels;
use crate::ui::widgets::button::ButtonColors;
use crate::ui::widgets::grid::GridMetrics;
use crate::ui::widgets::menu::MenuColors;
use crate::ui::widgets::select_dialog::DialogColors;

const SETTINGS_DIR: &str = ".chemdraw";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings io error: {e}"),
            Self::Parse(e) => write!(f, "settings parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub labels: SequenceLabels,
    #[serde(default)]
    pub colors: ColorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub menu_origin: (i32, i32),
    pub menu_item_width: i32,
    pub menu_item_height: i32,
    pub dialog_origin: (i32, i32),
    /// Table preview position relative to its menu item.
    pub preview_offset: (i32, i32),
    pub cell_width: i32,
    pub cell_height: i32,
    pub cell_gap: i32,
    pub button_width: i32,
    pub button_height: i32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            menu_origin: (0, 2),
            menu_item_width: 16,
            menu_item_height: 3,
            dialog_origin: (36, 2),
            preview_offset: (36, -3),
            cell_width: 3,
            cell_height: 1,
            cell_gap: 1,
            button_width: 10,
            button_height: 3,
        }
    }
}

impl LayoutSettings {
    pub fn grid_metrics(&self) -> GridMetrics {
        GridMetrics {
            cell_width: self.cell_width.max(1),
            cell_height: self.cell_height.max(1),
            gap: self.cell_gap.max(0),
        }
    }

    pub fn button_size(&self) -> (i32, i32) {
        (self.button_width.max(1), self.button_height.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_idle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_active: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_off: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_disabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            menu_idle: Some("white".to_string()),
            menu_active: Some("#18e7e7".to_string()),
            menu_border: Some("black".to_string()),
            button_on: Some("#2dffb3".to_string()),
            button_off: Some("white".to_string()),
            button_disabled: Some("gray".to_string()),
            highlight: Some("#22aa99".to_string()),
        }
    }
}

fn pick(value: &Option<String>, fallback: Color) -> Color {
    value.as_deref().and_then(Color::parse).unwrap_or(fallback)
}

impl ColorSettings {
    pub fn menu_colors(&self) -> MenuColors {
        let d = MenuColors::default();
        MenuColors {
            idle: pick(&self.menu_idle, d.idle),
            active: pick(&self.menu_active, d.active),
            border: pick(&self.menu_border, d.border),
            text: d.text,
        }
    }

    pub fn button_colors(&self) -> ButtonColors {
        let d = ButtonColors::default();
        ButtonColors {
            on: pick(&self.button_on, d.on),
            off: pick(&self.button_off, d.off),
            disabled: pick(&self.button_disabled, d.disabled),
        }
    }

    pub fn dialog_colors(&self) -> DialogColors {
        DialogColors {
            highlight: pick(&self.highlight, DialogColors::default().highlight),
            buttons: self.button_colors(),
        }
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Cannot determine settings directory")
    })?;
    write_default_if_missing(&path)?;
    Ok(path)
}

fn write_default_if_missing(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

/// Missing or invalid settings yield `None`; callers fall back to defaults.
pub fn load_settings() -> Option<Settings> {
    let path = get_settings_path()?;
    match load_settings_from(&path) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings not loaded");
            None
        }
    }
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
#[path = "../../tests/unit/services/settings.rs"]
mod tests;
