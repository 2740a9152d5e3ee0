//! Xcode plugin: `.idekeybindings` property lists with menu and text
//! key bindings.

mod export;
mod import;
mod keybind;
mod keybindings_file;
mod plist;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

use onekeymap_common::{EditorType, Platform, Result};
use onekeymap_config::{ActionMappingConfig, MappingConfig};
use onekeymap_keymap::Keymap;

use crate::{paths, ExportOptions, ExportResult, ImportResult, Plugin};

pub use keybind::{format_keybinding, parse_keybinding};
pub use keybindings_file::{text_items, text_value, MenuKeyBinding, XcodeKeybindings};
pub use plist::PlistValue;

pub struct XcodePlugin {
    mappings: Arc<MappingConfig>,
}

impl XcodePlugin {
    pub fn new(mappings: Arc<MappingConfig>) -> Self {
        Self { mappings }
    }

    /// The mapping that imports menu action `action`.
    pub fn resolve_menu(&self, action: &str) -> Option<&ActionMappingConfig> {
        import::resolve_menu(&self.mappings, action)
    }

    /// The mapping that imports text selector `selector`.
    pub fn resolve_text(&self, selector: &str) -> Option<&ActionMappingConfig> {
        import::resolve_text(&self.mappings, selector)
    }
}

impl Plugin for XcodePlugin {
    fn editor_type(&self) -> EditorType {
        EditorType::Xcode
    }

    /// Xcode only exists on macOS; the path is reported for any platform.
    fn config_detect(&self, _platform: Platform) -> Vec<PathBuf> {
        paths::home_dir()
            .map(|home| {
                vec![home
                    .join("Library")
                    .join("Developer")
                    .join("Xcode")
                    .join("UserData")
                    .join("KeyBindings")
                    .join("Default.idekeybindings")]
            })
            .unwrap_or_default()
    }

    fn import(&self, source: &str) -> Result<ImportResult> {
        import::import(&self.mappings, source)
    }

    fn export(&self, keymap: &Keymap, options: ExportOptions<'_>) -> Result<ExportResult> {
        export::export(&self.mappings, keymap, options)
    }
}
