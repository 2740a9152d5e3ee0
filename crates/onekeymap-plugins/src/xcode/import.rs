use onekeymap_common::Result;
use onekeymap_config::{ensure_trailing_colon, ActionMappingConfig, MappingConfig};
use onekeymap_keymap::{dedup_actions, Action, Keymap};
use tracing::{debug, warn};

use super::keybind::parse_keybinding;
use super::keybindings_file::{decode, text_items};
use crate::report::ImportMarker;
use crate::ImportResult;

/// The mapping that claims menu action `action` for import.
pub(super) fn resolve_menu<'a>(
    mappings: &'a MappingConfig,
    action: &str,
) -> Option<&'a ActionMappingConfig> {
    mappings.iter().find(|mapping| {
        mapping
            .xcode
            .iter()
            .any(|xc| {
                !xc.flags.disable_import && !xc.menu.action.is_empty() && xc.menu.action == action
            })
    })
}

/// The mapping that claims text selector `selector` for import. Selectors
/// compare with a trailing colon either way.
pub(super) fn resolve_text<'a>(
    mappings: &'a MappingConfig,
    selector: &str,
) -> Option<&'a ActionMappingConfig> {
    let selector = ensure_trailing_colon(selector);
    if selector.is_empty() {
        return None;
    }
    mappings.iter().find(|mapping| {
        mapping.xcode.iter().any(|xc| {
            !xc.flags.disable_import
                && xc
                    .text_action
                    .iter()
                    .any(|item| ensure_trailing_colon(item) == selector)
        })
    })
}

/// Whether an existing menu entry belongs to some mapping, matched on
/// action and command id.
pub(super) fn is_managed_menu(mappings: &MappingConfig, action: &str, command_id: &str) -> bool {
    mappings.iter().any(|mapping| {
        mapping
            .xcode
            .iter()
            .any(|xc| {
                !xc.menu.action.is_empty()
                    && xc.menu.action == action
                    && xc.menu.command_id == command_id
            })
    })
}

pub(super) fn import(mappings: &MappingConfig, source: &str) -> Result<ImportResult> {
    let document = decode(source)?;
    let mut marker = ImportMarker::new();
    let mut actions = Vec::new();

    for entry in &document.menu {
        if entry.keyboard_shortcut.is_empty() {
            continue;
        }
        let Some(mapping) = resolve_menu(mappings, &entry.action) else {
            debug!(
                "no universal mapping for xcode action {} (command id {:?})",
                entry.action, entry.command_id
            );
            marker.mark_skipped(
                &entry.action,
                Some(&entry.keyboard_shortcut),
                Some(format!("no mapping found for xcode action: {}", entry.action)),
            );
            continue;
        };
        match parse_keybinding(&entry.keyboard_shortcut) {
            Ok(keybinding) => {
                actions.push(Action::new(mapping.id.clone(), vec![keybinding]));
                marker.mark_imported(&mapping.id, &entry.action, &entry.keyboard_shortcut);
            }
            Err(e) => {
                warn!("skipping unparsable xcode key {:?}: {e}", entry.keyboard_shortcut);
                marker.mark_skipped(
                    &entry.action,
                    Some(&entry.keyboard_shortcut),
                    Some(format!(
                        "failed to parse key binding '{}': {e}",
                        entry.keyboard_shortcut
                    )),
                );
            }
        }
    }

    for (key, value) in &document.text {
        let items = text_items(value);
        // Chains of several selectors are export-only.
        let [selector] = items.as_slice() else {
            continue;
        };
        if selector.is_empty() {
            continue;
        }
        let Some(mapping) = resolve_text(mappings, selector) else {
            debug!("no universal mapping for xcode text action {selector}");
            marker.mark_skipped(
                selector,
                Some(key),
                Some(format!("no mapping found for xcode text action: {selector}")),
            );
            continue;
        };
        match parse_keybinding(key) {
            Ok(keybinding) => {
                actions.push(Action::new(mapping.id.clone(), vec![keybinding]));
                marker.mark_imported(&mapping.id, selector, key);
            }
            Err(e) => {
                warn!("skipping unparsable xcode text key {key:?}: {e}");
                marker.mark_skipped(
                    selector,
                    Some(key),
                    Some(format!("failed to parse key binding '{key}': {e}")),
                );
            }
        }
    }

    Ok(ImportResult {
        keymap: Keymap::new(dedup_actions(actions)),
        report: marker.report(),
    })
}
