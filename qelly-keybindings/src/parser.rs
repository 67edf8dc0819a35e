//! Key combination parser.
//!
//! Parses human-readable key strings like "CmdOrAlt+1" into KeyCombo structs.
//! Also supports physical key codes for language-agnostic bindings (e.g., "Ctrl+[Digit1]").

use crate::platform::parse_named_key;
use std::fmt;
use winit::keyboard::{KeyCode, NamedKey};

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(String);

/// Set of active modifiers for a key combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
    /// Cmd on macOS, Ctrl elsewhere
    pub cmd_or_ctrl: bool,
    /// Cmd on macOS, Alt elsewhere
    pub cmd_or_alt: bool,
}

/// A parsed key combination (modifiers + key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        let names = [
            (m.cmd_or_ctrl, "CmdOrCtrl"),
            (m.cmd_or_alt, "CmdOrAlt"),
            (m.ctrl, "Ctrl"),
            (m.alt, "Alt"),
            (m.shift, "Shift"),
            (m.super_key, "Super"),
        ];
        for (_, name) in names.iter().filter(|(active, _)| *active) {
            write!(f, "{}+", name)?;
        }

        match &self.key {
            ParsedKey::Character(c) => write!(f, "{}", c),
            ParsedKey::Named(n) => write!(f, "{:?}", n),
            ParsedKey::Physical(k) => write!(f, "[{:?}]", k),
        }
    }
}

/// The actual key (either a character or a named key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// A single character key (e.g., 'T', '1', ']')
    Character(char),
    /// A named key (e.g., F1, Enter, Escape)
    Named(NamedKey),
    /// A physical key code, matched by key position rather than character produced
    Physical(KeyCode),
}

/// Parse a key combination string into a KeyCombo.
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
/// - `Super`, `Cmd`, `Command`, `Meta`, `Win` - Super/Cmd key
/// - `CmdOrCtrl` - Cmd on macOS, Ctrl on other platforms
/// - `CmdOrAlt` - Cmd on macOS, Alt on other platforms
///
/// Keys:
/// - Single characters: `A`, `1`, `]`, etc.
/// - Named keys: `F1`-`F12`, `Enter`, `Escape`, `Tab`, etc.
/// - Physical keys in brackets: `[Digit1]`, `[KeyT]`
pub fn parse_key_combo(s: &str) -> Result<KeyCombo, ParseError> {
    if s.trim().is_empty() {
        return Err(ParseError("Empty key combination".to_string()));
    }

    let parts: Vec<&str> = s.split('+').map(str::trim).collect();
    let Some((key_str, modifier_names)) = parts.split_last() else {
        return Err(ParseError("No key specified".to_string()));
    };

    let mut modifiers = Modifiers::default();
    for name in modifier_names {
        if !apply_modifier(&mut modifiers, name) {
            return Err(ParseError(format!(
                "Expected a modifier before the key, found '{}'",
                name
            )));
        }
    }

    if apply_modifier(&mut Modifiers::default(), key_str) {
        return Err(ParseError(
            "Key combination ends with modifier, no key specified".to_string(),
        ));
    }
    let key = parse_key(key_str)?;

    Ok(KeyCombo { modifiers, key })
}

/// Set the modifier named by `name`. Returns false when `name` is not a
/// modifier.
fn apply_modifier(modifiers: &mut Modifiers, name: &str) -> bool {
    let flag = match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => &mut modifiers.ctrl,
        "alt" | "option" => &mut modifiers.alt,
        "shift" => &mut modifiers.shift,
        "super" | "cmd" | "command" | "meta" | "win" => &mut modifiers.super_key,
        "cmdorctrl" => &mut modifiers.cmd_or_ctrl,
        "cmdoralt" => &mut modifiers.cmd_or_alt,
        _ => return false,
    };
    *flag = true;
    true
}

/// Parse a key string into a ParsedKey.
fn parse_key(s: &str) -> Result<ParsedKey, ParseError> {
    if s.len() > 2 && s.starts_with('[') && s.ends_with(']') {
        let code_str = &s[1..s.len() - 1];
        if let Some(code) = parse_physical_key_code(code_str) {
            return Ok(ParsedKey::Physical(code));
        }
        return Err(ParseError(format!(
            "Unknown physical key code: '{}'",
            code_str
        )));
    }

    if let Some(named) = parse_named_key(s) {
        return Ok(ParsedKey::Named(named));
    }

    let mut chars = s.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(ParsedKey::Character(ch.to_ascii_uppercase()));
    }

    Err(ParseError(format!("Unknown key: '{}'", s)))
}

/// Parse a physical key code string into a KeyCode.
fn parse_physical_key_code(s: &str) -> Option<KeyCode> {
    match s.to_lowercase().as_str() {
        "digit0" => Some(KeyCode::Digit0),
        "digit1" => Some(KeyCode::Digit1),
        "digit2" => Some(KeyCode::Digit2),
        "digit3" => Some(KeyCode::Digit3),
        "digit4" => Some(KeyCode::Digit4),
        "digit5" => Some(KeyCode::Digit5),
        "digit6" => Some(KeyCode::Digit6),
        "digit7" => Some(KeyCode::Digit7),
        "digit8" => Some(KeyCode::Digit8),
        "digit9" => Some(KeyCode::Digit9),
        "keyt" => Some(KeyCode::KeyT),
        "keyw" => Some(KeyCode::KeyW),
        "bracketleft" => Some(KeyCode::BracketLeft),
        "bracketright" => Some(KeyCode::BracketRight),
        "tab" => Some(KeyCode::Tab),
        _ => None,
    }
}
