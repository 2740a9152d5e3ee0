use std::collections::HashSet;

use indexmap::IndexMap;

const DEFAULT_SKIP_REASON: &str = "not supported";

/// An editor entry that did not make it into the canonical keymap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSkipAction {
    /// Editor-specific identity, e.g. a VSCode command or an IntelliJ action id.
    pub editor_action: String,
    /// Original key text of every skipped occurrence, first seen first.
    pub keybindings: Vec<String>,
    pub reason: String,
}

/// An editor entry that resolved to a universal action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedAction {
    pub action: String,
    pub editor_action: String,
    pub keybindings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub skipped: Vec<ImportSkipAction>,
    pub imported: Vec<ImportedAction>,
}

#[derive(Debug)]
struct SkippedEntry {
    reason: String,
    keybindings: Vec<String>,
}

/// Records import outcomes per editor identity.
///
/// Once an identity is imported, earlier and later skips for it are
/// forgotten: one successful binding is enough to call the command supported.
#[derive(Debug, Default)]
pub struct ImportMarker {
    imported: HashSet<String>,
    skipped: IndexMap<String, SkippedEntry>,
    results: IndexMap<(String, String), ImportedAction>,
}

impl ImportMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_imported(&mut self, action: &str, editor_action: &str, keybinding: &str) {
        if action.is_empty() || editor_action.is_empty() {
            return;
        }
        self.imported.insert(editor_action.to_string());
        self.skipped.shift_remove(editor_action);

        let result = self
            .results
            .entry((action.to_string(), editor_action.to_string()))
            .or_insert_with(|| ImportedAction {
                action: action.to_string(),
                editor_action: editor_action.to_string(),
                keybindings: Vec::new(),
            });
        result.keybindings.push(keybinding.to_string());
    }

    /// Records a skip. `reason` defaults to "not supported"; the first
    /// reason recorded for an identity is kept.
    pub fn mark_skipped(
        &mut self,
        editor_action: &str,
        keybinding: Option<&str>,
        reason: Option<String>,
    ) {
        if editor_action.is_empty() || self.imported.contains(editor_action) {
            return;
        }
        let entry = self
            .skipped
            .entry(editor_action.to_string())
            .or_insert_with(|| SkippedEntry {
                reason: reason.unwrap_or_else(|| DEFAULT_SKIP_REASON.to_string()),
                keybindings: Vec::new(),
            });
        if let Some(keybinding) = keybinding {
            entry.keybindings.push(keybinding.to_string());
        }
    }

    pub fn report(&self) -> ImportReport {
        let skipped = self
            .skipped
            .iter()
            .filter(|(editor_action, _)| !self.imported.contains(*editor_action))
            .map(|(editor_action, entry)| ImportSkipAction {
                editor_action: editor_action.clone(),
                keybindings: entry.keybindings.clone(),
                reason: entry.reason.clone(),
            })
            .collect();
        ImportReport {
            skipped,
            imported: self.results.values().cloned().collect(),
        }
    }
}
