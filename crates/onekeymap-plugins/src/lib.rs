//! Editor plugins for onekeymap.
//!
//! Each plugin converts one editor's keymap file to and from the canonical
//! [`Keymap`]:
//! - VSCode family (VSCode, Windsurf, Windsurf Next, Cursor): `keybindings.json`
//! - IntelliJ family: keymap XML
//! - Zed: `keymap.json`
//! - Xcode: `.idekeybindings` property list
//! - Helix: the `[keys]` tables of `config.toml`, export only
//!
//! Exports are non-destructive. Bindings in an existing file that the mapping
//! table does not recognize are carried over, and managed bindings win on
//! conflict.

pub mod helix;
pub mod intellij;
pub mod jsonc;
pub mod merge;
mod paths;
pub mod registry;
pub mod report;
pub mod vscode;
pub mod xcode;
pub mod zed;

use std::path::PathBuf;

use onekeymap_common::{EditorType, Platform, Result};
use onekeymap_keymap::Keymap;

pub use helix::HelixPlugin;
pub use intellij::IntelliJPlugin;
pub use registry::Registry;
pub use report::{
    ExportMarker, ExportSkipAction, ExportSkipReport, ImportMarker, ImportReport,
    ImportSkipAction, ImportedAction,
};
pub use vscode::VscodePlugin;
pub use xcode::XcodePlugin;
pub use zed::ZedPlugin;

/// Output of [`Plugin::import`].
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub keymap: Keymap,
    pub report: ImportReport,
}

/// Options for [`Plugin::export`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions<'a> {
    /// Current content of the editor file. `None` exports from scratch.
    pub existing: Option<&'a str>,
    /// Platform whose modifier spelling is written out.
    pub platform: Platform,
}

/// Output of [`Plugin::export`].
#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    /// Full content of the editor file to write.
    pub content: String,
    pub report: ExportSkipReport,
}

/// One editor's keymap codec.
///
/// Per-binding failures never abort a call; they are collected in the
/// returned report. An `Err` means the whole document could not be read
/// or written.
pub trait Plugin: Send + Sync {
    fn editor_type(&self) -> EditorType;

    /// Default keymap file locations for `platform`, most likely first.
    fn config_detect(&self, platform: Platform) -> Vec<PathBuf>;

    fn import(&self, source: &str) -> Result<ImportResult>;

    fn export(&self, keymap: &Keymap, options: ExportOptions<'_>) -> Result<ExportResult>;
}
