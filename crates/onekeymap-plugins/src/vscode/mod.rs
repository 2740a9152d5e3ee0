//! VSCode-family plugin: VSCode, Windsurf, Windsurf Next and Cursor.
//!
//! All four share the `keybindings.json` format; they differ only in the
//! mapping-table column they read and where the file lives.

mod export;
mod import;
mod keybinding;
mod resolver;


use std::path::PathBuf;
use std::sync::Arc;

use onekeymap_common::{EditorFamily, EditorType, OnekeymapError, Platform, Result};
use onekeymap_config::MappingConfig;
use onekeymap_keymap::Keymap;

use crate::{paths, ExportOptions, ExportResult, ImportResult, Plugin};

pub use keybinding::{format_keybinding, parse_keybinding, VscodeKeybinding};

pub struct VscodePlugin {
    editor: EditorType,
    mappings: Arc<MappingConfig>,
}

impl VscodePlugin {
    /// Fails with [`OnekeymapError::UnknownEditor`] for editors outside the VSCode family.
    pub fn new(editor: EditorType, mappings: Arc<MappingConfig>) -> Result<Self> {
        if editor.family() != EditorFamily::VsCode {
            return Err(OnekeymapError::UnknownEditor(format!(
                "{editor} is not a VSCode-family editor"
            )));
        }
        Ok(Self { editor, mappings })
    }

    /// Reverse lookup: whether `entry` is generated from some mapped action.
    pub fn is_managed(&self, entry: &VscodeKeybinding) -> bool {
        resolver::is_managed(&self.mappings, self.editor, entry)
    }

    /// The universal action an editor entry resolves to, if any.
    pub fn resolve(&self, entry: &VscodeKeybinding) -> Option<&str> {
        resolver::resolve(
            &self.mappings,
            self.editor,
            &entry.command,
            &entry.when,
            entry.args.as_ref(),
        )
        .map(|mapping| mapping.id.as_str())
    }

    fn app_dir_name(&self) -> &'static str {
        match self.editor {
            EditorType::Windsurf => "Windsurf",
            EditorType::WindsurfNext => "Windsurf - Next",
            EditorType::Cursor => "Cursor",
            _ => "Code",
        }
    }
}

impl Plugin for VscodePlugin {
    fn editor_type(&self) -> EditorType {
        self.editor
    }

    fn config_detect(&self, platform: Platform) -> Vec<PathBuf> {
        paths::app_config_dir(platform)
            .map(|dir| {
                vec![dir
                    .join(self.app_dir_name())
                    .join("User")
                    .join("keybindings.json")]
            })
            .unwrap_or_default()
    }

    fn import(&self, source: &str) -> Result<ImportResult> {
        import::import(&self.mappings, self.editor, source)
    }

    fn export(&self, keymap: &Keymap, options: ExportOptions<'_>) -> Result<ExportResult> {
        export::export(&self.mappings, self.editor, keymap, options)
    }
}
