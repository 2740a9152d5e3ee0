use std::collections::BTreeMap;
use std::path::PathBuf;

use onekeymap_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Per-editor overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Keymap file to read from and write to instead of the detected one.
    pub keymap_path: Option<PathBuf>,
    pub sync_enabled: bool,
}

/// Settings for the `onekeymap` command line tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub verbose: bool,
    pub quiet: bool,
    /// Path of the canonical `onekeymap.json`.
    pub onekeymap: Option<PathBuf>,
    /// Keyed by editor name, e.g. `vscode` or `intellij.pycharm`.
    pub editors: BTreeMap<String, EditorSettings>,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verbose && self.quiet {
            return Err(ConfigError::ValidationError(
                "verbose and quiet modes cannot be enabled simultaneously".into(),
            ));
        }
        Ok(())
    }

    /// The configured keymap path for `editor`, if any.
    pub fn editor_keymap_path(&self, editor: &str) -> Option<&PathBuf> {
        self.editors
            .get(editor)
            .and_then(|settings| settings.keymap_path.as_ref())
    }
}
