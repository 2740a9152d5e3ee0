use onekeymap_common::{EditorType, Result};
use onekeymap_config::MappingConfig;
use onekeymap_keymap::{dedup_actions, Action, Keymap};
use tracing::{debug, warn};

use super::keybinding::{decode, parse_keybinding};
use super::resolver::resolve;
use crate::report::ImportMarker;
use crate::ImportResult;

pub(super) fn import(
    mappings: &MappingConfig,
    editor: EditorType,
    source: &str,
) -> Result<ImportResult> {
    let entries = decode(source)?;
    let mut marker = ImportMarker::new();
    let mut actions = Vec::with_capacity(entries.len());

    for entry in &entries {
        let Some(mapping) = resolve(
            mappings,
            editor,
            &entry.command,
            &entry.when,
            entry.args.as_ref(),
        ) else {
            debug!(
                "skipping keybinding with unknown action: command={} when={}",
                entry.command, entry.when
            );
            marker.mark_skipped(
                &entry.command,
                Some(&entry.key),
                Some("unknown action mapping".into()),
            );
            continue;
        };

        let keybinding = match parse_keybinding(&entry.key) {
            Ok(keybinding) => keybinding,
            Err(e) => {
                warn!("skipping keybinding with unparsable key '{}': {e}", entry.key);
                marker.mark_skipped(
                    &entry.command,
                    Some(&entry.key),
                    Some(format!("unparsable key '{}': {e}", entry.key)),
                );
                continue;
            }
        };

        actions.push(Action::new(mapping.id.clone(), vec![keybinding]));
        marker.mark_imported(&mapping.id, &entry.command, &entry.key);
    }

    Ok(ImportResult {
        keymap: Keymap::new(dedup_actions(actions)),
        report: marker.report(),
    })
}
