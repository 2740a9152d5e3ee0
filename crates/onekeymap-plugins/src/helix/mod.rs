//! Helix plugin: per-mode key tables under `[keys]` in `config.toml`.
//!
//! Export only. The rest of `config.toml` is carried over untouched.

mod export;
mod keybind;


use std::path::PathBuf;
use std::sync::Arc;

use onekeymap_common::{EditorType, OnekeymapError, Platform, Result};
use onekeymap_config::MappingConfig;
use onekeymap_keymap::Keymap;

use crate::{paths, ExportOptions, ExportResult, ImportResult, Plugin};

pub use keybind::{format_keybinding, parse_keybinding};

pub struct HelixPlugin {
    mappings: Arc<MappingConfig>,
}

impl HelixPlugin {
    pub fn new(mappings: Arc<MappingConfig>) -> Self {
        Self { mappings }
    }
}

impl Plugin for HelixPlugin {
    fn editor_type(&self) -> EditorType {
        EditorType::Helix
    }

    fn config_detect(&self, platform: Platform) -> Vec<PathBuf> {
        let dir = match platform {
            Platform::Windows => paths::app_config_dir(platform).map(|dir| dir.join("helix")),
            _ => paths::home_dir().map(|home| home.join(".config").join("helix")),
        };
        dir.map(|dir| vec![dir.join("config.toml")])
            .unwrap_or_default()
    }

    fn import(&self, _source: &str) -> Result<ImportResult> {
        Err(OnekeymapError::ImportNotSupported(EditorType::Helix))
    }

    fn export(&self, keymap: &Keymap, options: ExportOptions<'_>) -> Result<ExportResult> {
        export::export(&self.mappings, keymap, options)
    }
}
