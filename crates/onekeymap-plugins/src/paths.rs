//! Per-platform base directories used by config detection.

use std::path::PathBuf;

use onekeymap_common::Platform;

/// Application config root: `~/Library/Application Support` on macOS,
/// `%APPDATA%` on Windows, `~/.config` on Linux.
pub(crate) fn app_config_dir(platform: Platform) -> Option<PathBuf> {
    if platform == Platform::current() {
        if let Some(dir) = dirs::config_dir() {
            return Some(dir);
        }
    }
    let home = dirs::home_dir()?;
    Some(match platform {
        Platform::MacOs => home.join("Library").join("Application Support"),
        Platform::Windows => home.join("AppData").join("Roaming"),
        Platform::Linux => home.join(".config"),
    })
}

pub(crate) fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}
