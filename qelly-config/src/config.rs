//! The `Config` struct and its persistence.
//!
//! Covers:
//! - `load` / `load_from` / `save` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - Field validation and merging of newly added default keybindings

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{KeyBinding, LogLevel, TabLabelStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Main window title
    #[serde(default = "defaults::window_title")]
    pub window_title: String,

    /// Initial window width in pixels
    #[serde(default = "defaults::window_width")]
    pub window_width: u32,

    /// Initial window height in pixels
    #[serde(default = "defaults::window_height")]
    pub window_height: u32,

    /// Preferred width of a new session pane in pixels
    #[serde(default = "defaults::pane_width")]
    pub pane_width: u32,

    /// Preferred height of a new session pane in pixels
    #[serde(default = "defaults::pane_height")]
    pub pane_height: u32,

    /// Background color [R, G, B] shared by the tab container and its panes
    #[serde(default = "defaults::background_color")]
    pub background_color: [u8; 3],

    /// Fixed width of a single tab in the tab strip
    #[serde(default = "defaults::tab_width")]
    pub tab_width: f32,

    /// Height of the tab strip
    #[serde(default = "defaults::tab_bar_height")]
    pub tab_bar_height: f32,

    /// How tab labels are derived from pane titles
    #[serde(default)]
    pub tab_label_style: TabLabelStyle,

    /// Modifier for the `<modifier>+0` .. `<modifier>+9` tab shortcuts.
    ///
    /// Accepts any modifier understood by the key combo parser, including
    /// `CmdOrAlt` (Cmd on macOS, Alt elsewhere) and `CmdOrCtrl`.
    #[serde(default = "defaults::tab_shortcut_modifier")]
    pub tab_shortcut_modifier: String,

    /// Key bindings for tab actions
    #[serde(default = "defaults::keybindings")]
    pub keybindings: Vec<KeyBinding>,

    /// Debug log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: defaults::window_title(),
            window_width: defaults::window_width(),
            window_height: defaults::window_height(),
            pane_width: defaults::pane_width(),
            pane_height: defaults::pane_height(),
            background_color: defaults::background_color(),
            tab_width: defaults::tab_width(),
            tab_bar_height: defaults::tab_bar_height(),
            tab_label_style: TabLabelStyle::default(),
            tab_shortcut_modifier: defaults::tab_shortcut_modifier(),
            keybindings: defaults::keybindings(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default path, creating it when missing
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there when the file
    /// does not exist yet
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Config path: {:?}", path);

        if !path.exists() {
            log::info!("Config file not found, creating default at {:?}", path);
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            return Ok(config);
        }

        let contents = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        config.merge_default_keybindings();
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Write to a temp file then rename so a crash never leaves a truncated config
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory (`~/.config/qelly`, or the platform
    /// config dir on Windows)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .map(|dir| dir.join("qelly"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir()
                .map(|home| home.join(".config").join("qelly"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    /// Reject values the tab container cannot lay out
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tab_width.is_finite() && self.tab_width > 0.0) {
            return Err(ConfigError::Validation(format!(
                "tab_width must be a positive number, got {}",
                self.tab_width
            )));
        }
        if !(self.tab_bar_height.is_finite() && self.tab_bar_height >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "tab_bar_height must not be negative, got {}",
                self.tab_bar_height
            )));
        }
        if self.tab_shortcut_modifier.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tab_shortcut_modifier must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Add default keybindings whose action is missing from the user's list
    pub fn merge_default_keybindings(&mut self) {
        for default in defaults::keybindings() {
            if !self.keybindings.iter().any(|kb| kb.action == default.action) {
                log::info!(
                    "Adding new default keybinding: {} -> {}",
                    default.key,
                    default.action
                );
                self.keybindings.push(default);
            }
        }
    }

    /// Builder helper used by tests and the CLI
    pub fn with_title(mut self, title: &str) -> Self {
        self.window_title = title.to_string();
        self
    }
}
