//! Preference store for the Qelly terminal client.
//!
//! This crate owns the YAML configuration file and its default values:
//!
//! - Window and tab strip geometry
//! - Background color shared by the tab container
//! - Tab label style and the numeric tab shortcut modifier
//! - Key bindings for tab actions
//! - Log level

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{KeyBinding, LogLevel, TabLabelStyle};
