//! Tests for settings loading and validation.

use super::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_onekeymap_settings.toml"));
    assert!(matches!(
        result,
        Err(onekeymap_common::ConfigError::FileNotFound(_))
    ));
}

#[test]
fn load_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
verbose = true
onekeymap = "/tmp/keymap.json"

[editors.vscode]
keymap_path = "/tmp/keybindings.json"
sync_enabled = true
"#,
    )
    .unwrap();

    let settings = load_from_path(&path).unwrap();
    assert!(settings.verbose);
    assert!(!settings.quiet);
    assert_eq!(settings.onekeymap, Some(PathBuf::from("/tmp/keymap.json")));
    assert_eq!(
        settings.editor_keymap_path("vscode"),
        Some(&PathBuf::from("/tmp/keybindings.json"))
    );
    assert!(settings.editors["vscode"].sync_enabled);
    assert!(settings.editor_keymap_path("zed").is_none());
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "verbose = [[[").unwrap();
    assert!(matches!(
        load_from_path(&path),
        Err(onekeymap_common::ConfigError::ParseError(_))
    ));
}

#[test]
fn verbose_and_quiet_conflict() {
    let settings = Settings {
        verbose: true,
        quiet: true,
        ..Default::default()
    };
    let err = settings.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "config validation error: verbose and quiet modes cannot be enabled simultaneously"
    );
}

#[test]
fn env_overrides_apply() {
    let env: HashMap<&str, &str> = [
        ("ONEKEYMAP_QUIET", "true"),
        ("ONEKEYMAP_ONEKEYMAP", "/work/onekeymap.json"),
    ]
    .into_iter()
    .collect();
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()));
    assert!(settings.quiet);
    assert!(!settings.verbose);
    assert_eq!(
        settings.onekeymap,
        Some(PathBuf::from("/work/onekeymap.json"))
    );
}

#[test]
fn default_paths_live_under_dot_config() {
    let path = default_onekeymap_path().unwrap();
    assert!(path.ends_with(".config/onekeymap/onekeymap.json"));
    if let Ok(path) = default_settings_path() {
        assert!(path.ends_with("onekeymap/config.toml"));
    }
}
