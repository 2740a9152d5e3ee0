use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use onekeymap_common::{EditorType, Result};
use onekeymap_config::MappingConfig;
use onekeymap_keymap::Keymap;
use serde_json::Value;
use tracing::debug;

use super::import::resolve;
use super::keymap_file::{
    action_of, action_value, decode, encode, format_keybinding, parse_keybinding, ZedSection,
};
use crate::merge::key_identity;
use crate::report::{unsupported_reason, ExportMarker};
use crate::{ExportOptions, ExportResult};

type ContextBindings = IndexMap<String, BTreeMap<String, Value>>;

pub(super) fn export(
    mappings: &MappingConfig,
    keymap: &Keymap,
    options: ExportOptions<'_>,
) -> Result<ExportResult> {
    let existing = match options.existing {
        Some(existing) => decode(existing)?,
        None => Vec::new(),
    };

    let mut marker = ExportMarker::new();
    let managed = managed_bindings(mappings, keymap, &mut marker);
    let sections = merge(mappings, managed, existing);

    Ok(ExportResult {
        content: encode(&sections)?,
        report: marker.report(keymap),
    })
}

fn managed_bindings(
    mappings: &MappingConfig,
    keymap: &Keymap,
    marker: &mut ExportMarker,
) -> ContextBindings {
    let mut by_context = ContextBindings::new();
    for action in &keymap.actions {
        let Some((mapping, used_fallback)) =
            mappings.get_export_action(&action.name, EditorType::Zed)
        else {
            marker.mark_skipped(
                &action.name,
                None,
                unsupported_reason(mappings.get(&action.name), EditorType::Zed),
            );
            continue;
        };
        if used_fallback {
            debug!("exporting {} through fallback {}", action.name, mapping.id);
        }

        for binding in &action.bindings {
            let key = format_keybinding(binding);
            for zc in mapping.zed.iter().filter(|zc| !zc.action.is_empty()) {
                by_context
                    .entry(zc.context.clone())
                    .or_default()
                    .insert(key.clone(), action_value(&zc.action, zc.args.as_ref()));
            }
            marker.mark_exported(&action.name, binding);
        }
    }
    by_context
}

/// Drops managed entries from the existing sections, then writes the
/// managed bindings into the first section of their context.
///
/// Existing sections keep their order; contexts new to the file follow,
/// sorted by name.
fn merge(
    mappings: &MappingConfig,
    mut managed: ContextBindings,
    existing: Vec<ZedSection>,
) -> Vec<ZedSection> {
    let mut sections = Vec::with_capacity(existing.len() + managed.len());
    // a context may span several sections; conflicts are checked in all of them
    let lookup: HashMap<String, HashSet<String>> = managed
        .iter()
        .map(|(context, bindings)| {
            let keys = bindings
                .keys()
                .map(|key| key_identity(key, parse_keybinding))
                .collect();
            (context.clone(), keys)
        })
        .collect();

    for mut section in existing {
        let had_bindings = !section.bindings.is_empty();
        let incoming = lookup.get(&section.context);

        section.bindings.retain(|key, value| {
            let is_managed = action_of(value)
                .is_some_and(|(action, args)| resolve(mappings, action, &section.context, args).is_some());
            if is_managed {
                return false;
            }
            let taken = incoming.is_some_and(|keys| keys.contains(&key_identity(key, parse_keybinding)));
            if taken {
                debug!(
                    "Conflict resolved: managed keybinding takes priority: context='{}' key={key} existing={value}",
                    section.context
                );
            }
            !taken
        });

        if let Some(bindings) = managed.shift_remove(&section.context) {
            section.bindings.extend(bindings);
        }
        if had_bindings && section.bindings.is_empty() {
            continue;
        }
        sections.push(section);
    }

    managed.sort_keys();
    sections.extend(managed.into_iter().map(|(context, bindings)| ZedSection {
        context,
        bindings,
        ..ZedSection::default()
    }));
    sections
}
