//! Application preferences.
//!
//! Re-exports all configuration types from the `qelly-config` crate.

pub use qelly_config::*;
