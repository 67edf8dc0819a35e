//! Default value functions for configuration.
//!
//! Each function backs a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field.

use crate::types::KeyBinding;

pub fn window_title() -> String {
    "Qelly".to_string()
}

pub fn window_width() -> u32 {
    800
}

pub fn window_height() -> u32 {
    600
}

pub fn pane_width() -> u32 {
    800
}

pub fn pane_height() -> u32 {
    480
}

pub fn background_color() -> [u8; 3] {
    [0, 0, 0]
}

pub fn tab_width() -> f32 {
    150.0
}

pub fn tab_bar_height() -> f32 {
    28.0
}

pub fn tab_shortcut_modifier() -> String {
    "CmdOrAlt".to_string()
}

pub fn keybindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("CmdOrCtrl+T", "new_tab"),
        KeyBinding::new("CmdOrCtrl+W", "close_tab"),
        KeyBinding::new("CmdOrCtrl+Shift+]", "next_tab"),
        KeyBinding::new("CmdOrCtrl+Shift+[", "prev_tab"),
    ]
}
