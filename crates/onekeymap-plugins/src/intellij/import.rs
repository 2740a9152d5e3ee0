use onekeymap_common::Result;
use onekeymap_config::{ActionMappingConfig, MappingConfig};
use onekeymap_keymap::{dedup_actions, Action, Keymap};
use tracing::{debug, warn};

use super::keymap_xml::{decode, KeyboardShortcut};
use super::keystroke::parse_shortcut;
use crate::report::ImportMarker;
use crate::ImportResult;

/// The mapping that claims IntelliJ action `id` for import.
pub(super) fn resolve<'a>(mappings: &'a MappingConfig, id: &str) -> Option<&'a ActionMappingConfig> {
    mappings
        .iter()
        .find(|mapping| mapping.intellij.action == id && !mapping.intellij.flags.disable_import)
}

/// Whether some mapping exports to IntelliJ action `id`.
pub(super) fn is_managed(mappings: &MappingConfig, id: &str) -> bool {
    !id.is_empty() && mappings.iter().any(|mapping| mapping.intellij.action == id)
}

fn shortcut_text(shortcut: &KeyboardShortcut) -> String {
    match &shortcut.second {
        Some(second) => format!("{} {second}", shortcut.first),
        None => shortcut.first.clone(),
    }
}

pub(super) fn import(mappings: &MappingConfig, source: &str) -> Result<ImportResult> {
    let document = decode(source)?;
    let mut marker = ImportMarker::new();
    let mut actions = Vec::new();

    for action in &document.actions {
        let Some(mapping) = resolve(mappings, &action.id) else {
            debug!("no universal mapping for intellij action {}", action.id);
            for shortcut in &action.keyboard_shortcuts {
                marker.mark_skipped(
                    &action.id,
                    Some(&shortcut_text(shortcut)),
                    Some(format!("no mapping found for intellij action: {}", action.id)),
                );
            }
            continue;
        };

        for shortcut in &action.keyboard_shortcuts {
            if shortcut.first.is_empty() {
                continue;
            }
            let text = shortcut_text(shortcut);
            let keybinding = match parse_shortcut(shortcut) {
                Ok(keybinding) => keybinding,
                Err(e) => {
                    warn!("failed to parse key binding '{text}' of {}: {e}", action.id);
                    marker.mark_skipped(
                        &action.id,
                        Some(&text),
                        Some(format!("failed to parse key binding '{text}': {e}")),
                    );
                    continue;
                }
            };
            actions.push(Action::new(mapping.id.clone(), vec![keybinding]));
            marker.mark_imported(&mapping.id, &action.id, &text);
        }
    }

    Ok(ImportResult {
        keymap: Keymap::new(dedup_actions(actions)),
        report: marker.report(),
    })
}
