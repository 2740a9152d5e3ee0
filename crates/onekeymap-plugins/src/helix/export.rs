use std::collections::{BTreeMap, HashSet};

use onekeymap_common::{EditorType, FormatError, Result};
use onekeymap_config::{HelixMode, MappingConfig};
use onekeymap_keymap::Keymap;
use toml::{Table, Value};
use tracing::{debug, warn};

use super::keybind::{format_keybinding, parse_keybinding};
use crate::merge::key_identity;
use crate::report::{unsupported_reason, ExportMarker};
use crate::{ExportOptions, ExportResult};

const KEYS: &str = "keys";

/// Helix key to command, per mode.
type ModeKeys = BTreeMap<HelixMode, BTreeMap<String, String>>;

/// An existing file that does not parse is an error.
pub(super) fn export(
    mappings: &MappingConfig,
    keymap: &Keymap,
    options: ExportOptions<'_>,
) -> Result<ExportResult> {
    let mut document = match options.existing {
        Some(existing) if !existing.trim().is_empty() => {
            toml::from_str::<Table>(existing).map_err(|e| FormatError::Toml(e.to_string()))?
        }
        _ => Table::new(),
    };

    let mut marker = ExportMarker::new();
    let managed = managed_keys(mappings, keymap, &mut marker);
    merge(mappings, &mut document, managed);

    let content = toml::to_string(&document).map_err(|e| FormatError::Toml(e.to_string()))?;
    Ok(ExportResult {
        content,
        report: marker.report(keymap),
    })
}

fn managed_keys(mappings: &MappingConfig, keymap: &Keymap, marker: &mut ExportMarker) -> ModeKeys {
    let mut by_mode = ModeKeys::new();
    for action in &keymap.actions {
        let Some((mapping, used_fallback)) =
            mappings.get_export_action(&action.name, EditorType::Helix)
        else {
            marker.mark_skipped(
                &action.name,
                None,
                unsupported_reason(mappings.get(&action.name), EditorType::Helix),
            );
            continue;
        };
        if used_fallback {
            debug!("exporting {} through fallback {}", action.name, mapping.id);
        }

        for binding in &action.bindings {
            let key = match format_keybinding(binding) {
                Ok(key) => key,
                Err(e) => {
                    warn!("skipping keybinding of {} with un-formattable key: {e}", action.name);
                    marker.mark_skipped(&action.name, Some(binding), e.into());
                    continue;
                }
            };
            for hc in mapping.helix.iter().filter(|hc| !hc.command.is_empty()) {
                by_mode
                    .entry(hc.mode)
                    .or_default()
                    .insert(key.clone(), hc.command.clone());
            }
            marker.mark_exported(&action.name, binding);
        }
    }
    by_mode
}

fn is_managed(mappings: &MappingConfig, command: &str, mode: HelixMode) -> bool {
    mappings
        .iter()
        .flat_map(|mapping| mapping.helix.iter())
        .any(|hc| hc.command == command && hc.mode == mode)
}

/// Drops managed commands and taken keys from each mode table of `[keys]`,
/// then writes the managed keys.
///
/// Other tables under `[keys]` and every entry that is not a plain command
/// string are left alone unless their key is taken.
fn merge(mappings: &MappingConfig, document: &mut Table, mut managed: ModeKeys) {
    let mut keys = match document.remove(KEYS) {
        Some(Value::Table(keys)) => keys,
        Some(other) => {
            warn!("replacing `{KEYS}` entry that is not a table: {other}");
            Table::new()
        }
        None => Table::new(),
    };

    for mode in HelixMode::ALL {
        let incoming = managed.remove(&mode).unwrap_or_default();
        let existing = match keys.remove(mode.as_str()) {
            Some(Value::Table(table)) => table,
            Some(other) => {
                warn!("replacing `{KEYS}.{}` entry that is not a table: {other}", mode.as_str());
                Table::new()
            }
            None => Table::new(),
        };

        let taken: HashSet<String> = incoming
            .keys()
            .map(|key| key_identity(key, parse_keybinding))
            .collect();
        let mut table: Table = existing
            .into_iter()
            .filter(|(key, value)| {
                if value
                    .as_str()
                    .is_some_and(|command| is_managed(mappings, command, mode))
                {
                    return false;
                }
                let conflict = taken.contains(&key_identity(key, parse_keybinding));
                if conflict {
                    debug!(
                        "Conflict resolved: managed keybinding takes priority: mode={} key={key} unmanaged={value}",
                        mode.as_str()
                    );
                }
                !conflict
            })
            .collect();
        table.extend(
            incoming
                .into_iter()
                .map(|(key, command)| (key, Value::String(command))),
        );

        if !table.is_empty() {
            keys.insert(mode.as_str().to_string(), Value::Table(table));
        }
    }

    if !keys.is_empty() {
        document.insert(KEYS.to_string(), Value::Table(keys));
    }
}
