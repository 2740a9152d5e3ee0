use std::collections::{BTreeMap, HashSet};

use onekeymap_common::{EditorType, Result};
use onekeymap_config::{MappingConfig, XcodeMenuAction};
use onekeymap_keymap::Keymap;
use tracing::{debug, warn};

use super::import::is_managed_menu;
use super::keybind::{format_keybinding, parse_keybinding};
use super::keybindings_file::{decode, encode, text_value, MenuKeyBinding, XcodeKeybindings};
use super::plist::PlistValue;
use crate::merge::{first_seen_order, key_identity, order_by_base};
use crate::report::{unsupported_reason, ExportMarker};
use crate::{ExportOptions, ExportResult};

#[derive(Default)]
struct Managed {
    menu: Vec<MenuKeyBinding>,
    text: BTreeMap<String, PlistValue>,
}

/// An existing file that does not parse is an error.
pub(super) fn export(
    mappings: &MappingConfig,
    keymap: &Keymap,
    options: ExportOptions<'_>,
) -> Result<ExportResult> {
    let existing = match options.existing {
        Some(existing) => decode(existing)?,
        None => XcodeKeybindings::default(),
    };

    let mut marker = ExportMarker::new();
    let managed = managed_bindings(mappings, keymap, &mut marker);

    let unmanaged = existing
        .menu
        .iter()
        .filter(|entry| !is_managed_menu(mappings, &entry.action, &entry.command_id))
        .cloned()
        .collect();
    let mut menu = merge(managed.menu, unmanaged);
    let base = first_seen_order(
        existing
            .menu
            .iter()
            .filter(|entry| !entry.action.is_empty())
            .map(|entry| entry.action.as_str()),
    );
    order_by_base(&mut menu, |entry| base.get(entry.action.as_str()).copied());

    let mut text = existing.text;
    let text_taken: HashSet<String> = managed
        .text
        .keys()
        .map(|shortcut| key_identity(shortcut, parse_keybinding))
        .collect();
    text.retain(|shortcut, _| !text_taken.contains(&key_identity(shortcut, parse_keybinding)));
    text.extend(managed.text);

    Ok(ExportResult {
        content: encode(&XcodeKeybindings { menu, text })?,
        report: marker.report(keymap),
    })
}

fn menu_entry(menu: &XcodeMenuAction, shortcut: &str) -> MenuKeyBinding {
    MenuKeyBinding {
        action: menu.action.clone(),
        alternate: menu.alternate.clone(),
        command_group_id: menu.command_group_id.clone(),
        command_id: menu.command_id.clone(),
        group: menu.group.clone(),
        group_id: menu.group_id.clone(),
        grouped_alternate: menu.grouped_alternate.clone(),
        keyboard_shortcut: shortcut.to_string(),
        navigation: menu.navigation.clone(),
        parent_title: menu.parent_title.clone(),
        title: menu.title.clone(),
    }
}

fn managed_bindings(
    mappings: &MappingConfig,
    keymap: &Keymap,
    marker: &mut ExportMarker,
) -> Managed {
    let mut managed = Managed::default();

    for action in &keymap.actions {
        if action.bindings.is_empty() {
            continue;
        }
        let Some((mapping, used_fallback)) =
            mappings.get_export_action(&action.name, EditorType::Xcode)
        else {
            marker.mark_skipped(
                &action.name,
                None,
                unsupported_reason(mappings.get(&action.name), EditorType::Xcode),
            );
            continue;
        };
        if used_fallback {
            debug!("exporting {} through fallback {}", action.name, mapping.id);
        }

        for binding in &action.bindings {
            let shortcut = match format_keybinding(binding) {
                Ok(shortcut) => shortcut,
                Err(e) => {
                    warn!("skipping keybinding of {} with un-formattable key: {e}", action.name);
                    marker.mark_skipped(&action.name, Some(binding), e.into());
                    continue;
                }
            };

            for xc in mapping.xcode.iter() {
                if !xc.menu.action.is_empty() {
                    let entry = menu_entry(&xc.menu, &shortcut);
                    if !managed.menu.contains(&entry) {
                        managed.menu.push(entry);
                    }
                }
                if !xc.text_action.0.is_empty() {
                    managed
                        .text
                        .insert(shortcut.clone(), text_value(&xc.text_action.0));
                }
            }
            marker.mark_exported(&action.name, binding);
        }
    }

    managed
}

/// Managed entries first, then unmanaged ones whose shortcut is not taken.
fn merge(managed: Vec<MenuKeyBinding>, unmanaged: Vec<MenuKeyBinding>) -> Vec<MenuKeyBinding> {
    let taken: HashSet<String> = managed
        .iter()
        .map(|entry| key_identity(&entry.keyboard_shortcut, parse_keybinding))
        .collect();
    let mut entries = managed;
    for entry in unmanaged {
        if taken.contains(&key_identity(&entry.keyboard_shortcut, parse_keybinding)) {
            debug!(
                "Conflict resolved: managed keybinding takes priority: key={} unmanaged_action={}",
                entry.keyboard_shortcut, entry.action
            );
            continue;
        }
        entries.push(entry);
    }
    entries
}
