use onekeymap_common::Result;
use onekeymap_config::{ActionMappingConfig, MappingConfig, ZedMappingConfig};
use onekeymap_keymap::{dedup_actions, Action, Keymap};
use serde_json::Value;
use tracing::warn;

use super::keymap_file::{action_of, decode, is_empty_args, parse_keybinding};
use crate::jsonc::json_equal;
use crate::report::ImportMarker;
use crate::ImportResult;

fn args_match(config: Option<&Value>, incoming: Option<&Value>) -> bool {
    let config = config.filter(|args| !is_empty_args(args));
    let incoming = incoming.filter(|args| !is_empty_args(args));
    match (config, incoming) {
        (None, None) => true,
        (Some(a), Some(b)) => json_equal(a, b),
        _ => false,
    }
}

pub(super) fn matches(zc: &ZedMappingConfig, action: &str, context: &str, args: Option<&Value>) -> bool {
    zc.action == action && zc.context == context && args_match(zc.args.as_ref(), args)
}

pub(super) fn resolve<'a>(
    mappings: &'a MappingConfig,
    action: &str,
    context: &str,
    args: Option<&Value>,
) -> Option<&'a ActionMappingConfig> {
    mappings.iter().find(|mapping| {
        mapping
            .zed
            .iter()
            .any(|zc| !zc.flags.disable_import && matches(zc, action, context, args))
    })
}

pub(super) fn import(mappings: &MappingConfig, source: &str) -> Result<ImportResult> {
    let sections = decode(source)?;
    let mut marker = ImportMarker::new();
    let mut actions = Vec::new();

    for section in &sections {
        for (key, value) in &section.bindings {
            let Some((action, args)) = action_of(value) else {
                warn!("unsupported or empty action for key '{key}'");
                continue;
            };

            let keybinding = match parse_keybinding(key) {
                Ok(keybinding) => keybinding,
                Err(e) => {
                    warn!("failed to parse keychord '{key}': {e}");
                    marker.mark_skipped(
                        action,
                        Some(key),
                        Some(format!("failed to parse keychord '{key}': {e}")),
                    );
                    continue;
                }
            };

            let Some(mapping) = resolve(mappings, action, &section.context, args) else {
                warn!(
                    "failed to find action {action} in context '{}'",
                    section.context
                );
                marker.mark_skipped(
                    action,
                    Some(key),
                    Some(format!("no mapping found for zed action: {action}")),
                );
                continue;
            };

            actions.push(Action::new(mapping.id.clone(), vec![keybinding]));
            marker.mark_imported(&mapping.id, action, key);
        }
    }

    Ok(ImportResult {
        keymap: Keymap::new(dedup_actions(actions)),
        report: marker.report(),
    })
}
