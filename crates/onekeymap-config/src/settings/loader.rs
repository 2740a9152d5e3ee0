use std::path::{Path, PathBuf};

use onekeymap_common::ConfigError;
use tracing::{debug, info};

use super::paths::{default_onekeymap_path, default_settings_path};
use super::schema::Settings;

/// Load settings from a TOML file. Missing fields use defaults.
pub fn load_from_path(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let settings: Settings = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Apply `ONEKEYMAP_*` environment variables on top of file settings.
///
/// Recognized: `ONEKEYMAP_VERBOSE`, `ONEKEYMAP_QUIET`, `ONEKEYMAP_ONEKEYMAP`.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("ONEKEYMAP_VERBOSE") {
        settings.verbose = parse_flag(&value);
    }
    if let Some(value) = lookup("ONEKEYMAP_QUIET") {
        settings.quiet = parse_flag(&value);
    }
    if let Some(value) = lookup("ONEKEYMAP_ONEKEYMAP").filter(|v| !v.is_empty()) {
        settings.onekeymap = Some(PathBuf::from(value));
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Load settings from `~/.config/onekeymap/config.toml`, then the environment.
///
/// A missing file is not an error. The result is validated and has its
/// `onekeymap` path filled in.
pub fn load_default() -> Result<Settings, ConfigError> {
    let path = default_settings_path()?;
    let mut settings = match load_from_path(&path) {
        Ok(settings) => settings,
        Err(ConfigError::FileNotFound(_)) => {
            debug!("no settings file at {}, using defaults", path.display());
            Settings::default()
        }
        Err(e) => return Err(e),
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    if settings.onekeymap.is_none() {
        settings.onekeymap = Some(default_onekeymap_path()?);
    }
    settings.validate()?;
    Ok(settings)
}
