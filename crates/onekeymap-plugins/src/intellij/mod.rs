//! IntelliJ-family plugin: keymap XML shared by every JetBrains IDE.

mod export;
mod import;
mod keymap_xml;
mod keystroke;


use std::path::{Path, PathBuf};
use std::sync::Arc;

use onekeymap_common::{EditorFamily, EditorType, OnekeymapError, Platform, Result};
use onekeymap_config::MappingConfig;
use onekeymap_keymap::Keymap;
use regex::Regex;
use tracing::debug;

use crate::{paths, ExportOptions, ExportResult, ImportResult, Plugin};

pub use keymap_xml::{ActionXml, KeyboardShortcut, KeymapXml};
pub use keystroke::{format_keystroke, format_shortcut, parse_keystroke, parse_shortcut};

/// File name of the exported keymap inside a product's `keymaps` directory.
const KEYMAP_FILE: &str = "Onekeymap.xml";

pub struct IntelliJPlugin {
    editor: EditorType,
    mappings: Arc<MappingConfig>,
}

impl IntelliJPlugin {
    pub fn new(editor: EditorType, mappings: Arc<MappingConfig>) -> Result<Self> {
        if editor.family() != EditorFamily::IntelliJ {
            return Err(OnekeymapError::UnknownEditor(format!(
                "{editor} is not an IntelliJ-family editor"
            )));
        }
        Ok(Self { editor, mappings })
    }

    /// Reverse lookup: whether some mapping exports to IntelliJ action `id`.
    pub fn is_managed(&self, id: &str) -> bool {
        import::is_managed(&self.mappings, id)
    }

    /// Prefix of the product's versioned config directory, e.g. `GoLand2024.2`.
    fn product_prefix(&self) -> &'static str {
        match self.editor {
            EditorType::IntelliJCommunity => "IdeaIC",
            EditorType::PyCharm => "PyCharm",
            EditorType::WebStorm => "WebStorm",
            EditorType::CLion => "CLion",
            EditorType::PhpStorm => "PhpStorm",
            EditorType::RubyMine => "RubyMine",
            EditorType::GoLand => "GoLand",
            EditorType::RustRover => "RustRover",
            _ => "IntelliJIdea",
        }
    }
}

/// The highest-versioned `<prefix><year>.<minor>` directory under `root`.
pub(crate) fn newest_product_dir(root: &Path, prefix: &str) -> Option<PathBuf> {
    let pattern = format!(r"^{}(\d+)\.(\d+)(?:\.(\d+))?$", regex::escape(prefix));
    let re = Regex::new(&pattern).ok()?;
    let entries = std::fs::read_dir(root).ok()?;

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let caps = re.captures(&name)?;
            let part = |i: usize| {
                caps.get(i)
                    .and_then(|m| m.as_str().parse::<u32>().ok())
                    .unwrap_or(0)
            };
            Some(((part(1), part(2), part(3)), entry.path()))
        })
        .max_by_key(|(version, _)| *version)
        .map(|(_, path)| path)
}

impl Plugin for IntelliJPlugin {
    fn editor_type(&self) -> EditorType {
        self.editor
    }

    fn config_detect(&self, platform: Platform) -> Vec<PathBuf> {
        let Some(root) = paths::app_config_dir(platform).map(|dir| dir.join("JetBrains")) else {
            return Vec::new();
        };
        match newest_product_dir(&root, self.product_prefix()) {
            Some(dir) => vec![dir.join("keymaps").join(KEYMAP_FILE)],
            None => {
                debug!(
                    "no {} config directory under {}",
                    self.editor.app_name(),
                    root.display()
                );
                Vec::new()
            }
        }
    }

    fn import(&self, source: &str) -> Result<ImportResult> {
        import::import(&self.mappings, source)
    }

    fn export(&self, keymap: &Keymap, options: ExportOptions<'_>) -> Result<ExportResult> {
        export::export(&self.mappings, self.editor, keymap, options)
    }
}
