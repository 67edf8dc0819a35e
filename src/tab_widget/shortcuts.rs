//! Numeric tab shortcuts (`<modifier>+1` .. `<modifier>+9`, `<modifier>+0`).

use qelly_keybindings::{KeyCombo, KeybindingMatcher, ParseError, parse_key_combo};

/// Modifier used when the configured one cannot be parsed
pub const DEFAULT_SHORTCUT_MODIFIER: &str = "CmdOrAlt";

/// Map a pressed digit to a tab index: `1`..`9` select the first nine tabs
/// and `0` selects the tenth.
pub fn index_for_digit(digit: u8) -> Option<usize> {
    match digit {
        0 => Some(9),
        1..=9 => Some(digit as usize - 1),
        _ => None,
    }
}

/// The ten digit shortcuts registered by the tab container
#[derive(Debug, Clone)]
pub struct TabShortcuts {
    combos: Vec<(KeyCombo, u8)>,
}

impl TabShortcuts {
    /// Register `<modifier>+0` .. `<modifier>+9`
    pub fn new(modifier: &str) -> Result<Self, ParseError> {
        let combos = (0..=9u8)
            .map(|digit| {
                parse_key_combo(&format!("{}+{}", modifier, digit)).map(|combo| (combo, digit))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { combos })
    }

    /// Register the shortcuts, falling back to the default modifier when
    /// `modifier` does not parse
    pub fn new_or_default(modifier: &str) -> Self {
        match Self::new(modifier) {
            Ok(shortcuts) => shortcuts,
            Err(e) => {
                log::warn!(
                    "Invalid tab shortcut modifier '{}': {}; using {}",
                    modifier,
                    e,
                    DEFAULT_SHORTCUT_MODIFIER
                );
                Self::default()
            }
        }
    }

    /// Digit of the shortcut the key press activates, if any
    pub fn digit_for(&self, matcher: &KeybindingMatcher) -> Option<u8> {
        self.combos
            .iter()
            .find(|(combo, _)| matcher.matches_with_physical_preference(combo, true))
            .map(|(_, digit)| *digit)
    }

    pub fn combos(&self) -> impl Iterator<Item = &KeyCombo> {
        self.combos.iter().map(|(combo, _)| combo)
    }
}

impl Default for TabShortcuts {
    fn default() -> Self {
        let combos = (0..=9u8)
            .filter_map(|digit| {
                parse_key_combo(&format!("{}+{}", DEFAULT_SHORTCUT_MODIFIER, digit))
                    .ok()
                    .map(|combo| (combo, digit))
            })
            .collect();
        Self { combos }
    }
}
