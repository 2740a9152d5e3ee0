use std::path::PathBuf;

use onekeymap_common::ConfigError;

const APP_NAME: &str = "onekeymap";

/// Platform config directory, e.g. `~/.config/onekeymap/config.toml` on Linux.
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::ParseError("could not determine config directory".into())
    })?;
    Ok(config_dir.join(APP_NAME).join("config.toml"))
}

/// `~/.config/onekeymap/onekeymap.json` on every platform.
pub fn default_onekeymap_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine home directory".into()))?;
    Ok(home.join(".config").join(APP_NAME).join("onekeymap.json"))
}
