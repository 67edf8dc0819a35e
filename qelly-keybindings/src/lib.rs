//! Keybinding system for Qelly.
//!
//! Runtime-configurable keybindings defined in config.yaml.
//!
//! Features:
//! - Configurable key combinations (CmdOrCtrl+T, CmdOrAlt+1, etc.)
//! - Platform modifier aliases (`CmdOrCtrl`, `CmdOrAlt`)
//! - Physical key support for language-agnostic bindings

mod matcher;
pub mod parser;
pub mod platform;

pub use matcher::KeybindingMatcher;
pub use parser::{KeyCombo, Modifiers, ParseError, ParsedKey, parse_key_combo};

use qelly_config::KeyBinding;

/// Registry of keybindings mapping key combinations to action names.
///
/// Bindings are kept in config order so the first match wins.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    bindings: Vec<(KeyCombo, String)>,
}

impl KeybindingRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config keybindings.
    ///
    /// Invalid keybinding strings are logged and skipped.
    pub fn from_config(keybindings: &[KeyBinding]) -> Self {
        let mut registry = Self::new();

        for binding in keybindings {
            match parse_key_combo(&binding.key) {
                Ok(combo) => {
                    log::debug!("Registered keybinding: {} -> {}", binding.key, binding.action);
                    registry.bindings.push((combo, binding.action.clone()));
                }
                Err(e) => {
                    log::warn!(
                        "Invalid keybinding '{}' for action '{}': {}",
                        binding.key,
                        binding.action,
                        e
                    );
                }
            }
        }

        log::info!(
            "Keybinding registry initialized with {} bindings",
            registry.bindings.len()
        );
        registry
    }

    /// Look up the action bound to the key press described by `matcher`.
    pub fn lookup(&self, matcher: &KeybindingMatcher) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(combo, _)| matcher.matches_with_physical_preference(combo, true))
            .map(|(_, action)| action.as_str())
    }

    /// Check if the registry has any bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Get the number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
