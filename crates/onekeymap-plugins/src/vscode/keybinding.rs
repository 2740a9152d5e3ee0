use onekeymap_common::{FormatError, ParseError, Platform};
use onekeymap_keymap::Keybinding;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::jsonc::strip_jsonc;

const SEPARATOR: &str = "+";

/// One entry of `keybindings.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VscodeKeybinding {
    pub key: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub when: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

pub fn parse_keybinding(key: &str) -> Result<Keybinding, ParseError> {
    Keybinding::parse(key, SEPARATOR)
}

pub fn format_keybinding(keybinding: &Keybinding, platform: Platform) -> String {
    keybinding.format(platform, SEPARATOR)
}

/// Parses a whole `keybindings.json`. A blank document is an empty list.
pub(super) fn decode(source: &str) -> Result<Vec<VscodeKeybinding>, FormatError> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&strip_jsonc(source)).map_err(|e| FormatError::Json(e.to_string()))
}

pub(super) fn encode(entries: &[VscodeKeybinding]) -> Result<String, FormatError> {
    let mut out =
        serde_json::to_string_pretty(entries).map_err(|e| FormatError::Json(e.to_string()))?;
    out.push('\n');
    Ok(out)
}
