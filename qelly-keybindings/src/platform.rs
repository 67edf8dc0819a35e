//! Platform-specific keybinding resolution.
//!
//! Contains:
//! - `CmdOrCtrl` / `CmdOrAlt` modifier expansion
//! - Physical key → QWERTY character mapping for language-agnostic bindings
//! - Named key alias table (string → `NamedKey`)

use crate::parser::Modifiers;
use winit::keyboard::{KeyCode, NamedKey};

/// Concrete modifier state a combo expects once platform aliases are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

/// Expand the platform modifier aliases of a parsed combo.
///
/// - macOS: `CmdOrCtrl` and `CmdOrAlt` both map to Super (Cmd key).
/// - Other platforms: `CmdOrCtrl` maps to Ctrl, `CmdOrAlt` maps to Alt.
pub fn resolve_modifiers(mods: &Modifiers) -> ExpectedModifiers {
    let mut expected = ExpectedModifiers {
        ctrl: mods.ctrl,
        alt: mods.alt,
        shift: mods.shift,
        super_key: mods.super_key,
    };

    #[cfg(target_os = "macos")]
    {
        if mods.cmd_or_ctrl || mods.cmd_or_alt {
            expected.super_key = true;
        }
    }
    #[cfg(not(target_os = "macos"))]
    {
        if mods.cmd_or_ctrl {
            expected.ctrl = true;
        }
        if mods.cmd_or_alt {
            expected.alt = true;
        }
    }

    expected
}

const LETTER_KEYS: [KeyCode; 26] = [
    KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE, KeyCode::KeyF,
    KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ, KeyCode::KeyK, KeyCode::KeyL,
    KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO, KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR,
    KeyCode::KeyS, KeyCode::KeyT, KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX,
    KeyCode::KeyY, KeyCode::KeyZ,
];

const DIGIT_KEYS: [KeyCode; 10] = [
    KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
    KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
];

/// Character a physical key produces on a US QWERTY layout, for the keys a
/// binding can name by character
fn qwerty_char(code: KeyCode) -> Option<char> {
    if let Some(i) = LETTER_KEYS.iter().position(|k| *k == code) {
        return Some(char::from(b'A' + i as u8));
    }
    if let Some(i) = DIGIT_KEYS.iter().position(|k| *k == code) {
        return Some(char::from(b'0' + i as u8));
    }
    match code {
        KeyCode::BracketLeft => Some('['),
        KeyCode::BracketRight => Some(']'),
        _ => None,
    }
}

/// Check if a physical key code corresponds to a character on a QWERTY layout.
///
/// Lets digit and letter bindings fire on layouts where the key produces a
/// different character (AZERTY digits need Shift, for example).
pub fn physical_key_matches_char(code: KeyCode, ch: char) -> bool {
    qwerty_char(code).is_some_and(|expected| expected.eq_ignore_ascii_case(&ch))
}

/// Parse a named key string into a [`NamedKey`].
///
/// Matching is case-insensitive. Returns `None` for unrecognised strings.
pub fn parse_named_key(s: &str) -> Option<NamedKey> {
    match s.to_lowercase().as_str() {
        "f1" => Some(NamedKey::F1),
        "f2" => Some(NamedKey::F2),
        "f3" => Some(NamedKey::F3),
        "f4" => Some(NamedKey::F4),
        "f5" => Some(NamedKey::F5),
        "f6" => Some(NamedKey::F6),
        "f7" => Some(NamedKey::F7),
        "f8" => Some(NamedKey::F8),
        "f9" => Some(NamedKey::F9),
        "f10" => Some(NamedKey::F10),
        "f11" => Some(NamedKey::F11),
        "f12" => Some(NamedKey::F12),

        "enter" | "return" => Some(NamedKey::Enter),
        "escape" | "esc" => Some(NamedKey::Escape),
        "space" => Some(NamedKey::Space),
        "tab" => Some(NamedKey::Tab),
        "backspace" => Some(NamedKey::Backspace),
        "delete" | "del" => Some(NamedKey::Delete),
        "home" => Some(NamedKey::Home),
        "end" => Some(NamedKey::End),
        "pageup" | "pgup" => Some(NamedKey::PageUp),
        "pagedown" | "pgdn" => Some(NamedKey::PageDown),

        "up" | "arrowup" => Some(NamedKey::ArrowUp),
        "down" | "arrowdown" => Some(NamedKey::ArrowDown),
        "left" | "arrowleft" => Some(NamedKey::ArrowLeft),
        "right" | "arrowright" => Some(NamedKey::ArrowRight),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_modifiers_pass_through() {
        let mods = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::default()
        };
        let expected = resolve_modifiers(&mods);
        assert!(expected.ctrl);
        assert!(expected.shift);
        assert!(!expected.alt);
        assert!(!expected.super_key);
    }

    #[test]
    fn test_cmd_or_alt_resolution() {
        let mods = Modifiers {
            cmd_or_alt: true,
            ..Modifiers::default()
        };
        let expected = resolve_modifiers(&mods);

        #[cfg(target_os = "macos")]
        {
            assert!(expected.super_key);
            assert!(!expected.alt);
        }
        #[cfg(not(target_os = "macos"))]
        {
            assert!(expected.alt);
            assert!(!expected.super_key);
        }
        assert!(!expected.ctrl);
    }

    #[test]
    fn test_physical_digit_matches() {
        assert!(physical_key_matches_char(KeyCode::Digit0, '0'));
        assert!(physical_key_matches_char(KeyCode::KeyT, 't'));
        assert!(!physical_key_matches_char(KeyCode::Digit1, '2'));
        assert!(!physical_key_matches_char(KeyCode::Escape, '1'));
    }

    #[test]
    fn test_qwerty_char_table() {
        assert_eq!(qwerty_char(KeyCode::KeyA), Some('A'));
        assert_eq!(qwerty_char(KeyCode::KeyZ), Some('Z'));
        assert_eq!(qwerty_char(KeyCode::Digit9), Some('9'));
        assert_eq!(qwerty_char(KeyCode::BracketRight), Some(']'));
        assert_eq!(qwerty_char(KeyCode::F1), None);
    }
}
