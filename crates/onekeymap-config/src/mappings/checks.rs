//! Load-time consistency checks over the merged mapping table.
//!
//! Two actions claiming the same editor command would make import ambiguous,
//! so every importable editor identity must belong to exactly one action.

use std::collections::{BTreeMap, HashMap};

use onekeymap_common::MappingError;
use serde_json::{Map, Value};

use super::ActionMappingConfig;

type Mappings = BTreeMap<String, ActionMappingConfig>;

pub(super) fn check_editor_configs(mappings: &Mappings) -> Result<(), MappingError> {
    check_vscode(mappings)?;
    check_intellij(mappings)?;
    check_zed(mappings)?;
    check_xcode(mappings)?;
    check_xcode_text_action_format(mappings)?;
    check_xcode_import_constraints(mappings)?;
    Ok(())
}

/// Collects every id that claims an already-seen key.
#[derive(Default)]
struct DuplicateTracker {
    seen: HashMap<String, String>,
    duplicates: BTreeMap<String, Vec<String>>,
}

impl DuplicateTracker {
    fn observe(&mut self, key: String, id: &str) {
        match self.seen.get(&key) {
            Some(first) => {
                let ids = self
                    .duplicates
                    .entry(key)
                    .or_insert_with(|| vec![first.clone()]);
                ids.push(id.to_string());
            }
            None => {
                self.seen.insert(key, id.to_string());
            }
        }
    }

    fn finish(self, editor: &str) -> Result<(), MappingError> {
        if self.duplicates.is_empty() {
            return Ok(());
        }
        Err(MappingError::DuplicateEditorMapping {
            editor: editor.to_string(),
            duplicates: self.duplicates,
        })
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn canonical_args(args: Option<&Map<String, Value>>) -> String {
    args.map(|a| Value::Object(a.clone()).to_string())
        .unwrap_or_default()
}

fn check_vscode(mappings: &Mappings) -> Result<(), MappingError> {
    let mut tracker = DuplicateTracker::default();
    for (id, mapping) in mappings {
        for vc in mapping.vscode.iter() {
            if vc.command.is_empty() || vc.flags.disable_import {
                continue;
            }
            let key = format!(
                "{{\"command\":{},\"when\":{},\"args\":{}}}",
                quote(&vc.command),
                quote(&vc.when),
                quote(&canonical_args(vc.args.as_ref()))
            );
            tracker.observe(key, id);
        }
    }
    tracker.finish("vscode")
}

fn check_intellij(mappings: &Mappings) -> Result<(), MappingError> {
    let mut tracker = DuplicateTracker::default();
    for (id, mapping) in mappings {
        let ij = &mapping.intellij;
        if ij.action.is_empty() || ij.flags.disable_import {
            continue;
        }
        tracker.observe(ij.action.clone(), id);
    }
    tracker.finish("intellij")
}

fn check_zed(mappings: &Mappings) -> Result<(), MappingError> {
    let mut tracker = DuplicateTracker::default();
    for (id, mapping) in mappings {
        for zc in mapping.zed.iter() {
            if zc.action.is_empty() || zc.flags.disable_import {
                continue;
            }
            let args = zc.args.as_ref().map(Value::to_string).unwrap_or_default();
            let key = format!(
                "{{\"action\":{},\"context\":{},\"args\":{}}}",
                quote(&zc.action),
                quote(&zc.context),
                quote(&args)
            );
            tracker.observe(key, id);
        }
    }
    tracker.finish("zed")
}

/// Appends `:` to a selector that lacks it.
pub fn ensure_trailing_colon(selector: &str) -> String {
    if selector.is_empty() || selector.ends_with(':') {
        selector.to_string()
    } else {
        format!("{selector}:")
    }
}

fn check_xcode(mappings: &Mappings) -> Result<(), MappingError> {
    let mut tracker = DuplicateTracker::default();
    for (id, mapping) in mappings {
        for xc in mapping.xcode.iter() {
            if xc.flags.disable_import {
                continue;
            }
            if !xc.menu.action.is_empty() {
                let key = format!(
                    "{{\"action\":{},\"commandID\":{}}}",
                    quote(&xc.menu.action),
                    quote(&xc.menu.command_id)
                );
                tracker.observe(key, id);
            }
            for selector in xc.text_action.iter() {
                let selector = ensure_trailing_colon(selector);
                if selector.is_empty() {
                    continue;
                }
                tracker.observe(format!("{{\"textAction\":{}}}", quote(&selector)), id);
            }
        }
    }
    tracker.finish("xcode")
}

fn render_ids(ids: &[&str]) -> String {
    format!("[{}]", ids.join(" "))
}

fn check_xcode_text_action_format(mappings: &Mappings) -> Result<(), MappingError> {
    let invalid: Vec<&str> = mappings
        .iter()
        .filter(|(_, mapping)| {
            mapping.xcode.iter().any(|xc| {
                xc.text_action
                    .iter()
                    .any(|selector| !selector.is_empty() && !selector.ends_with(':'))
            })
        })
        .map(|(id, _)| id.as_str())
        .collect();
    if invalid.is_empty() {
        return Ok(());
    }
    Err(MappingError::Invalid(format!(
        "xcode textAction must end with ':' for ids: {}",
        render_ids(&invalid)
    )))
}

fn check_xcode_import_constraints(mappings: &Mappings) -> Result<(), MappingError> {
    let invalid: Vec<&str> = mappings
        .iter()
        .filter(|(_, mapping)| {
            mapping
                .xcode
                .iter()
                .any(|xc| xc.text_action.0.len() > 1 && !xc.flags.disable_import)
        })
        .map(|(id, _)| id.as_str())
        .collect();
    if invalid.is_empty() {
        return Ok(());
    }
    Err(MappingError::Invalid(format!(
        "xcode textAction with multiple items requires disableImport: true for ids: {}",
        render_ids(&invalid)
    )))
}
