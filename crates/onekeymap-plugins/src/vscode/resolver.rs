//! Editor command to universal action resolution.

use std::collections::HashSet;

use onekeymap_common::EditorType;
use onekeymap_config::{ActionMappingConfig, MappingConfig, VscodeMappingConfig};
use serde_json::{Map, Value};
use tracing::debug;

use super::keybinding::VscodeKeybinding;
use crate::jsonc::json_equal;

#[derive(Clone, Copy)]
struct Candidate<'a> {
    mapping: &'a ActionMappingConfig,
    /// Marked `forImport`, or the only entry of its action.
    for_import: bool,
    explicit: bool,
}

#[derive(Default)]
struct Bucket<'a> {
    seen: HashSet<&'a str>,
    candidates: Vec<Candidate<'a>>,
}

impl<'a> Bucket<'a> {
    fn push(&mut self, candidate: Candidate<'a>) {
        if self.seen.insert(candidate.mapping.id.as_str()) {
            self.candidates.push(candidate);
        }
    }

    /// Explicit `forImport` entries first, then implicit ones, then the
    /// rest; ties go to the smallest id.
    fn pick(&self) -> Option<&'a ActionMappingConfig> {
        let tier = |c: &Candidate<'_>| match (c.for_import, c.explicit) {
            (true, true) => 0,
            (true, false) => 1,
            _ => 2,
        };
        let best = self.candidates.iter().map(tier).min()?;
        self.candidates
            .iter()
            .filter(|c| tier(*c) == best)
            .map(|c| c.mapping)
            .min_by(|a, b| a.id.cmp(&b.id))
    }
}

fn args_match(config: Option<&Map<String, Value>>, incoming: Option<&Value>) -> bool {
    match (config, incoming) {
        (None, None) => true,
        (Some(config), Some(incoming)) => {
            json_equal(&Value::Object(config.clone()), incoming)
        }
        _ => false,
    }
}

/// Resolves `(command, when, args)` to the mapping it was generated from.
///
/// Buckets in priority order: args match with equal non-empty `when`; args
/// match with a wildcard (empty) `when`; args match ignoring `when`; and,
/// only when the entry carries no args at all, command alone.
pub(super) fn resolve<'a>(
    mappings: &'a MappingConfig,
    editor: EditorType,
    command: &str,
    when: &str,
    args: Option<&Value>,
) -> Option<&'a ActionMappingConfig> {
    let mut exact = Bucket::default();
    let mut wildcard = Bucket::default();
    let mut ignore_when = Bucket::default();
    let mut command_only = Bucket::default();

    for mapping in mappings.iter() {
        let configs = mapping.vscode_configs(editor);
        let has_explicit = configs.iter().any(|vc| vc.for_import);

        for vc in configs {
            if vc.command != command || vc.flags.disable_import {
                continue;
            }
            if has_explicit && !vc.for_import {
                continue;
            }
            let candidate = Candidate {
                mapping,
                for_import: vc.for_import || configs.len() == 1,
                explicit: vc.for_import,
            };

            if args_match(vc.args.as_ref(), args) {
                if !vc.when.is_empty() && vc.when == when {
                    exact.push(candidate);
                } else if vc.when.is_empty() {
                    wildcard.push(candidate);
                } else {
                    ignore_when.push(candidate);
                }
            } else if args.is_none() {
                command_only.push(candidate);
            }
        }
    }

    if let Some(mapping) = exact.pick().or_else(|| wildcard.pick()) {
        return Some(mapping);
    }
    if let Some(mapping) = ignore_when.pick() {
        debug!("Falling back to command+args match (ignoring when): command={command} when={when}");
        return Some(mapping);
    }
    if args.is_none() {
        if let Some(mapping) = command_only.pick() {
            debug!("Falling back to command only match: command={command} when={when}");
            return Some(mapping);
        }
    }
    None
}

fn matches_entry(vc: &VscodeMappingConfig, entry: &VscodeKeybinding) -> bool {
    vc.command == entry.command
        && vc.when == entry.when
        && args_match(vc.args.as_ref(), entry.args.as_ref())
}

/// An existing entry is managed when some mapping declares exactly its
/// command, `when` and args.
pub(super) fn is_managed(
    mappings: &MappingConfig,
    editor: EditorType,
    entry: &VscodeKeybinding,
) -> bool {
    mappings.iter().any(|mapping| {
        mapping
            .vscode_configs(editor)
            .iter()
            .any(|vc| matches_entry(vc, entry))
    })
}
