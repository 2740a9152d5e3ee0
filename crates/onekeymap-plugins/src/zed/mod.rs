//! Zed plugin: `keymap.json`, a list of context sections.

mod export;
mod import;
mod keymap_file;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

use onekeymap_common::{EditorType, Platform, Result};
use onekeymap_config::{ActionMappingConfig, MappingConfig};
use onekeymap_keymap::Keymap;
use serde_json::Value;

use crate::{paths, ExportOptions, ExportResult, ImportResult, Plugin};

pub use keymap_file::{action_of, action_value, format_keybinding, parse_keybinding, ZedSection};

pub struct ZedPlugin {
    mappings: Arc<MappingConfig>,
}

impl ZedPlugin {
    pub fn new(mappings: Arc<MappingConfig>) -> Self {
        Self { mappings }
    }

    /// The mapping whose Zed entry declares exactly this action, context and args.
    pub fn resolve(&self, action: &str, context: &str, args: Option<&Value>) -> Option<&ActionMappingConfig> {
        import::resolve(&self.mappings, action, context, args)
    }
}

impl Plugin for ZedPlugin {
    fn editor_type(&self) -> EditorType {
        EditorType::Zed
    }

    fn config_detect(&self, platform: Platform) -> Vec<PathBuf> {
        let path = match platform {
            Platform::Windows => paths::app_config_dir(platform).map(|dir| dir.join("Zed")),
            _ => paths::home_dir().map(|home| home.join(".config").join("zed")),
        };
        path.map(|dir| vec![dir.join("keymap.json")])
            .unwrap_or_default()
    }

    fn import(&self, source: &str) -> Result<ImportResult> {
        import::import(&self.mappings, source)
    }

    fn export(&self, keymap: &Keymap, options: ExportOptions<'_>) -> Result<ExportResult> {
        export::export(&self.mappings, keymap, options)
    }
}
