//! Key event matching.
//!
//! Matches winit key input against parsed KeyCombos, by logical key
//! (character-based) or by physical key position.

use crate::parser::{KeyCombo, ParsedKey};
use crate::platform::{physical_key_matches_char, resolve_modifiers};
use winit::event::{KeyEvent, Modifiers as WinitModifiers};
use winit::keyboard::{Key, KeyCode, ModifiersState, NamedKey, PhysicalKey};

/// Matcher for comparing winit key input against keybindings.
#[derive(Debug)]
pub struct KeybindingMatcher {
    ctrl: bool,
    alt: bool,
    shift: bool,
    super_key: bool,
    /// The logical key from the event
    key: Option<MatchKey>,
    /// The physical key code from the event
    physical_key: Option<KeyCode>,
}

/// Normalized key for matching purposes.
#[derive(Debug)]
enum MatchKey {
    Character(char),
    Named(NamedKey),
}

impl KeybindingMatcher {
    /// Create a matcher from the parts of a key press.
    pub fn new(logical_key: &Key, physical_key: PhysicalKey, modifiers: ModifiersState) -> Self {
        let key = match logical_key {
            Key::Character(c) => c
                .chars()
                .next()
                .map(|ch| MatchKey::Character(ch.to_ascii_uppercase())),
            Key::Named(named) => Some(MatchKey::Named(*named)),
            _ => None,
        };

        let physical_key = match physical_key {
            PhysicalKey::Code(code) => Some(code),
            PhysicalKey::Unidentified(_) => None,
        };

        Self {
            ctrl: modifiers.control_key(),
            alt: modifiers.alt_key(),
            shift: modifiers.shift_key(),
            super_key: modifiers.super_key(),
            key,
            physical_key,
        }
    }

    /// Create a matcher from a winit key event.
    pub fn from_event(event: &KeyEvent, modifiers: &WinitModifiers) -> Self {
        Self::new(&event.logical_key, event.physical_key, modifiers.state())
    }

    /// Check if this event matches the given key combo by logical key.
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        self.matches_with_physical_preference(combo, false)
    }

    /// Check if this event matches the given key combo.
    ///
    /// When `use_physical_keys` is true, character bindings match by key
    /// position first, so they keep working across keyboard layouts.
    pub fn matches_with_physical_preference(
        &self,
        combo: &KeyCombo,
        use_physical_keys: bool,
    ) -> bool {
        let key_matches = match (&combo.key, use_physical_keys) {
            (ParsedKey::Physical(combo_code), _) => self.physical_key.as_ref() == Some(combo_code),
            (ParsedKey::Character(combo_char), true) => {
                let physical = self
                    .physical_key
                    .is_some_and(|code| physical_key_matches_char(code, *combo_char));
                physical || self.logical_char_matches(*combo_char)
            }
            (ParsedKey::Character(combo_char), false) => self.logical_char_matches(*combo_char),
            (ParsedKey::Named(combo_named), _) => {
                matches!(&self.key, Some(MatchKey::Named(named)) if named == combo_named)
            }
        };

        key_matches && self.modifiers_match(combo)
    }

    fn logical_char_matches(&self, combo_char: char) -> bool {
        matches!(&self.key, Some(MatchKey::Character(ch)) if ch.eq_ignore_ascii_case(&combo_char))
    }

    fn modifiers_match(&self, combo: &KeyCombo) -> bool {
        let expected = resolve_modifiers(&combo.modifiers);
        self.ctrl == expected.ctrl
            && self.alt == expected.alt
            && self.shift == expected.shift
            && self.super_key == expected.super_key
    }
}
