use std::collections::{HashMap, HashSet};

use onekeymap_common::ExportSkipReason;
use onekeymap_keymap::{Keybinding, Keymap};

/// A canonical binding that an export did not write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSkipAction {
    pub action: String,
    /// Canonical signature of the binding.
    pub keybinding: String,
    pub reason: ExportSkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSkipReport {
    pub skipped: Vec<ExportSkipAction>,
}

impl ExportSkipReport {
    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Records which bindings of a keymap an exporter wrote.
///
/// Bindings never marked as exported show up in the report, with the
/// per-binding reason if one was given, else the action-level reason, else
/// [`ExportSkipReason::ActionNotSupported`].
#[derive(Debug, Default)]
pub struct ExportMarker {
    exported: HashMap<String, HashSet<String>>,
    skipped_keys: HashMap<String, HashMap<String, ExportSkipReason>>,
    skipped_actions: HashMap<String, ExportSkipReason>,
}

impl ExportMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_exported(&mut self, action: &str, keybinding: &Keybinding) {
        self.exported
            .entry(action.to_string())
            .or_default()
            .insert(keybinding.signature());
    }

    /// Records why `keybinding` of `action` was not written, or why none of
    /// the action's bindings were when `keybinding` is `None`. The first
    /// reason recorded wins.
    pub fn mark_skipped(
        &mut self,
        action: &str,
        keybinding: Option<&Keybinding>,
        reason: ExportSkipReason,
    ) {
        match keybinding {
            None => {
                self.skipped_actions
                    .entry(action.to_string())
                    .or_insert(reason);
            }
            Some(keybinding) => {
                self.skipped_keys
                    .entry(action.to_string())
                    .or_default()
                    .entry(keybinding.signature())
                    .or_insert(reason);
            }
        }
    }

    pub fn report(&self, keymap: &Keymap) -> ExportSkipReport {
        let mut actions: Vec<_> = keymap.actions.iter().collect();
        actions.sort_by(|a, b| a.name.cmp(&b.name));

        let mut skipped = Vec::new();
        for action in actions {
            let exported = self.exported.get(&action.name);
            for binding in &action.bindings {
                let signature = binding.signature();
                if exported.is_some_and(|set| set.contains(&signature)) {
                    continue;
                }
                let reason = self
                    .skipped_keys
                    .get(&action.name)
                    .and_then(|keys| keys.get(&signature))
                    .or_else(|| self.skipped_actions.get(&action.name))
                    .cloned()
                    .unwrap_or(ExportSkipReason::ActionNotSupported);
                skipped.push(ExportSkipAction {
                    action: action.name.clone(),
                    keybinding: signature,
                    reason,
                });
            }
        }
        ExportSkipReport { skipped }
    }
}
