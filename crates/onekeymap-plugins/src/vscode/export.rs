use std::collections::HashSet;

use onekeymap_common::{EditorType, Result};
use onekeymap_config::MappingConfig;
use onekeymap_keymap::Keymap;
use tracing::debug;

use super::keybinding::{decode, encode, format_keybinding, parse_keybinding, VscodeKeybinding};
use super::resolver::is_managed;
use crate::merge::{first_seen_order, key_identity, order_by_base};
use crate::report::{unsupported_reason, ExportMarker};
use crate::{ExportOptions, ExportResult};

pub(super) fn export(
    mappings: &MappingConfig,
    editor: EditorType,
    keymap: &Keymap,
    options: ExportOptions<'_>,
) -> Result<ExportResult> {
    let existing = match options.existing {
        Some(existing) => decode(existing)?,
        None => Vec::new(),
    };

    let mut marker = ExportMarker::new();
    let managed = managed_entries(mappings, editor, keymap, options, &mut marker);
    let unmanaged: Vec<VscodeKeybinding> = existing
        .iter()
        .filter(|entry| !is_managed(mappings, editor, entry))
        .cloned()
        .collect();

    let mut merged = merge(managed, unmanaged);
    let base = first_seen_order(
        existing
            .iter()
            .filter(|entry| !entry.command.is_empty())
            .map(|entry| entry.command.as_str()),
    );
    order_by_base(&mut merged, |entry| base.get(entry.command.as_str()).copied());

    Ok(ExportResult {
        content: encode(&merged)?,
        report: marker.report(keymap),
    })
}

fn managed_entries(
    mappings: &MappingConfig,
    editor: EditorType,
    keymap: &Keymap,
    options: ExportOptions<'_>,
    marker: &mut ExportMarker,
) -> Vec<VscodeKeybinding> {
    let mut entries = Vec::new();
    for action in &keymap.actions {
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

        let configs: Vec<_> = mapping
            .vscode_configs(editor)
            .iter()
            .filter(|vc| !vc.command.is_empty())
            .collect();
        for binding in &action.bindings {
            let key = format_keybinding(binding, options.platform);
            for vc in &configs {
                entries.push(VscodeKeybinding {
                    key: key.clone(),
                    command: vc.command.clone(),
                    when: vc.when.clone(),
                    args: vc.args.clone().map(serde_json::Value::Object),
                });
            }
            marker.mark_exported(&action.name, binding);
        }
    }
    entries
}

/// Managed entries first, then unmanaged ones whose key is still free.
///
/// Keys are compared by parsed signature, so `Cmd+Shift+C` and
/// `shift+cmd+c` claim the same key.
fn merge(
    managed: Vec<VscodeKeybinding>,
    unmanaged: Vec<VscodeKeybinding>,
) -> Vec<VscodeKeybinding> {
    let managed_keys: HashSet<String> = managed
        .iter()
        .map(|entry| key_identity(&entry.key, parse_keybinding))
        .collect();
    let mut result = managed;
    for entry in unmanaged {
        if managed_keys.contains(&key_identity(&entry.key, parse_keybinding)) {
            debug!(
                "Conflict resolved: managed keybinding takes priority: key={} unmanaged_command={}",
                entry.key, entry.command
            );
            continue;
        }
        result.push(entry);
    }
    result
}
