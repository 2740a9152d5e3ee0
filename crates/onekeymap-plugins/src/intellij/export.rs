use std::collections::HashSet;

use indexmap::IndexMap;
use onekeymap_common::{EditorType, Result};
use onekeymap_config::MappingConfig;
use onekeymap_keymap::Keymap;
use tracing::{debug, warn};

use super::import::is_managed;
use super::keymap_xml::{decode, encode, ActionXml, KeymapXml};
use super::keystroke::format_shortcut;
use crate::report::{unsupported_reason, ExportMarker};
use crate::{ExportOptions, ExportResult};

pub(super) fn export(
    mappings: &MappingConfig,
    editor: EditorType,
    keymap: &Keymap,
    options: ExportOptions<'_>,
) -> Result<ExportResult> {
    let existing = match options.existing.map(decode) {
        Some(Ok(document)) => document.actions,
        Some(Err(e)) => {
            warn!("Failed to parse existing config, proceeding with destructive export: {e}");
            Vec::new()
        }
        None => Vec::new(),
    };

    let mut marker = ExportMarker::new();
    let managed = managed_actions(mappings, editor, keymap, &mut marker);
    let unmanaged = existing
        .into_iter()
        .filter(|action| !is_managed(mappings, &action.id))
        .collect();
    let document = KeymapXml::onekeymap(merge(managed, unmanaged));

    Ok(ExportResult {
        content: encode(&document)?,
        report: marker.report(keymap),
    })
}

/// One `<action>` per IntelliJ action id, in first-appearance order.
fn managed_actions(
    mappings: &MappingConfig,
    editor: EditorType,
    keymap: &Keymap,
    marker: &mut ExportMarker,
) -> Vec<ActionXml> {
    let mut by_id: IndexMap<String, ActionXml> = IndexMap::new();

    for action in &keymap.actions {
        if action.bindings.is_empty() {
            continue;
        }
        let Some((mapping, used_fallback)) = mappings.get_export_action(&action.name, editor)
        else {
            marker.mark_skipped(
                &action.name,
                None,
                unsupported_reason(mappings.get(&action.name), editor),
            );
            continue;
        };
        if used_fallback {
            debug!("exporting {} through fallback {}", action.name, mapping.id);
        }

        let id = &mapping.intellij.action;
        for binding in &action.bindings {
            let shortcut = match format_shortcut(binding) {
                Ok(shortcut) => shortcut,
                Err(e) => {
                    warn!("failed to format keybinding for {}: {e}", action.name);
                    marker.mark_skipped(&action.name, Some(binding), e.into());
                    continue;
                }
            };
            let entry = by_id.entry(id.clone()).or_insert_with(|| ActionXml {
                id: id.clone(),
                ..ActionXml::default()
            });
            if !entry.keyboard_shortcuts.contains(&shortcut) {
                entry.keyboard_shortcuts.push(shortcut);
            }
            marker.mark_exported(&action.name, binding);
        }
    }

    by_id.into_values().collect()
}

/// Managed actions first, then unmanaged ones whose id is not taken.
fn merge(managed: Vec<ActionXml>, unmanaged: Vec<ActionXml>) -> Vec<ActionXml> {
    let taken: HashSet<String> = managed.iter().map(|action| action.id.clone()).collect();
    let mut actions = managed;
    for action in unmanaged {
        if taken.contains(&action.id) {
            debug!(
                "Conflict resolved: managed action takes priority: action_id={}",
                action.id
            );
            continue;
        }
        actions.push(action);
    }
    actions
}
