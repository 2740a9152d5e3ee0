//! Reading and writing the canonical `onekeymap.json` file.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use onekeymap_common::{FormatError, OneOrMany, OnekeymapError, Platform};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::keybinding::Keybinding;
use crate::keymap::{Action, ActionMeta, Keymap};

const SETTING_VERSION: &str = "1.0";

#[derive(Debug, Deserialize)]
struct SettingFile {
    #[serde(default)]
    #[allow(dead_code)]
    version: String,
    #[serde(default)]
    keymaps: Vec<SettingEntry>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct SettingFileOut {
    version: &'static str,
    keymaps: Vec<SettingEntry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(default, skip_serializing_if = "OneOrMany::is_empty")]
    keybinding: OneOrMany<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// Parses a setting document into a keymap.
///
/// Entries sharing an id are grouped in first-seen order. Blank input is an
/// empty keymap.
pub fn load_setting(data: &str) -> Result<Keymap, OnekeymapError> {
    if data.trim().is_empty() {
        return Ok(Keymap::default());
    }

    let file: SettingFile =
        serde_json::from_str(data).map_err(|e| FormatError::Json(e.to_string()))?;
    if file.keymaps.is_empty() && !file.unknown.is_empty() {
        return Err(FormatError::Setting("'keymaps' field is missing".into()).into());
    }

    let mut grouped: IndexMap<String, Action> = IndexMap::new();
    for entry in file.keymaps {
        let meta = ActionMeta {
            comment: entry.comment.filter(|s| !s.is_empty()),
            description: entry.description.filter(|s| !s.is_empty()),
            display_name: entry.name.filter(|s| !s.is_empty()),
        };
        let action = grouped
            .entry(entry.id.clone())
            .or_insert_with(|| Action::new(entry.id.clone(), Vec::new()));
        action.meta.fill_from(&meta);

        for text in entry.keybinding.iter() {
            let binding = Keybinding::parse(text, "+").map_err(|e| {
                FormatError::Setting(format!(
                    "failed to parse keybinding '{text}' for id '{}': {e}",
                    entry.id
                ))
            })?;
            action.bindings.push(binding);
        }
    }

    debug!("loaded {} actions from setting", grouped.len());
    Ok(grouped.into_values().collect())
}

/// Serializes a keymap, spelling bindings for `platform`.
///
/// Output is sorted by id and indented with two spaces.
pub fn save_setting(keymap: &Keymap, platform: Platform) -> Result<String, OnekeymapError> {
    let mut grouped: IndexMap<(String, Option<String>, Option<String>), SettingEntry> =
        IndexMap::new();

    for action in &keymap.actions {
        let key = (
            action.name.clone(),
            action.meta.comment.clone(),
            action.meta.description.clone(),
        );
        let entry = grouped.entry(key).or_insert_with(|| SettingEntry {
            id: action.name.clone(),
            comment: action.meta.comment.clone(),
            description: action.meta.description.clone(),
            name: action.meta.display_name.clone(),
            ..Default::default()
        });
        for binding in &action.bindings {
            if binding.is_empty() {
                continue;
            }
            entry.keybinding.0.push(binding.format(platform, "+"));
        }
    }

    let mut keymaps: Vec<SettingEntry> = grouped.into_values().collect();
    keymaps.sort_by(|a, b| a.id.cmp(&b.id));

    let file = SettingFileOut {
        version: SETTING_VERSION,
        keymaps,
    };
    let mut out =
        serde_json::to_string_pretty(&file).map_err(|e| FormatError::Json(e.to_string()))?;
    out.push('\n');
    Ok(out)
}
