mod common;

use common::config_dir;
use qelly::app::App;
use qelly::cli::RuntimeOptions;
use qelly::config::{Config, ConfigError, KeyBinding, LogLevel, TabLabelStyle};
use qelly_keybindings::KeybindingRegistry;
use std::fs;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.window_title, "Qelly");
    assert_eq!(config.background_color, [0, 0, 0]);
    assert_eq!(config.tab_width, 150.0);
    assert_eq!(config.tab_bar_height, 28.0);
    assert_eq!(config.tab_shortcut_modifier, "CmdOrAlt");
    assert_eq!(config.tab_label_style, TabLabelStyle::Title);
    assert_eq!(config.keybindings.len(), 4);
}

#[test]
fn test_config_with_title() {
    let config = Config::new().with_title("My BBS");
    assert_eq!(config.window_title, "My BBS");
}

#[test]
fn test_config_yaml_round_trip() {
    let dir = config_dir();
    let path = dir.path().join("config.yaml");

    let mut config = Config::new();
    config.background_color = [32, 16, 8];
    config.tab_label_style = TabLabelStyle::Numbered;
    config.log_level = LogLevel::Debug;
    config.keybindings.push(KeyBinding::new("Ctrl+Shift+N", "new_tab"));
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_unknown_fields_tolerated() {
    let dir = config_dir();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "window_title: Qelly BBS\nencoding: big5\nbackground_color: [1, 2, 3]\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.window_title, "Qelly BBS");
    assert_eq!(config.background_color, [1, 2, 3]);
}

#[test]
fn test_enum_values_in_yaml() {
    let yaml = "tab_label_style: numbered\nlog_level: trace\n";
    let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
    assert_eq!(config.tab_label_style, TabLabelStyle::Numbered);
    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_negative_strip_height_rejected() {
    let dir = config_dir();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "tab_bar_height: -4.0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("tab_bar_height"));
}

#[test]
fn test_default_keybindings_parse() {
    let registry = KeybindingRegistry::from_config(&Config::default().keybindings);
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_invalid_keybinding_skipped() {
    let bindings = vec![
        KeyBinding::new("Ctrl+", "new_tab"),
        KeyBinding::new("Ctrl+W", "close_tab"),
    ];
    let registry = KeybindingRegistry::from_config(&bindings);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_app_loads_config_from_cli_path() {
    let dir = config_dir();
    let path = dir.path().join("custom.yaml");
    fs::write(&path, "window_title: From CLI\n").unwrap();

    let options = RuntimeOptions {
        config_path: Some(path),
        ..RuntimeOptions::default()
    };
    let app = App::new(options).unwrap();
    assert_eq!(app.config().window_title, "From CLI");
}

#[test]
fn test_app_rejects_bad_config() {
    let dir = config_dir();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "tab_width: -1.0\n").unwrap();

    let options = RuntimeOptions {
        config_path: Some(path),
        ..RuntimeOptions::default()
    };
    assert!(App::new(options).is_err());
}
