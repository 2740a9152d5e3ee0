use std::collections::BTreeMap;

use onekeymap_common::{FormatError, ParseError, Platform};
use onekeymap_keymap::Keybinding;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jsonc::strip_jsonc;

const SEPARATOR: &str = "-";

/// One `{ "context": ..., "bindings": {...} }` section.
///
/// Binding values stay raw JSON so that entries this tool does not
/// understand survive a round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZedSection {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
    #[serde(default)]
    pub bindings: BTreeMap<String, Value>,
    /// Other section keys such as `use_key_equivalents`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn parse_keybinding(key: &str) -> Result<Keybinding, ParseError> {
    Keybinding::parse(key, SEPARATOR)
}

/// Zed key names always use the macOS spelling (`cmd`), whatever the host.
pub fn format_keybinding(keybinding: &Keybinding) -> String {
    keybinding.format(Platform::MacOs, SEPARATOR)
}

/// Splits a binding value, `"action"` or `["action", args]`.
///
/// Returns `None` for `null` and other shapes Zed uses to unbind a key.
pub fn action_of(value: &Value) -> Option<(&str, Option<&Value>)> {
    match value {
        Value::String(action) => Some((action.as_str(), None)),
        Value::Array(items) => {
            let action = items.first()?.as_str()?;
            let args = items.get(1).filter(|args| !is_empty_args(args));
            Some((action, args))
        }
        _ => None,
    }
}

/// The binding value for `action`: a bare string without args, else a pair.
pub fn action_value(action: &str, args: Option<&Value>) -> Value {
    match args.filter(|args| !is_empty_args(args)) {
        Some(args) => Value::Array(vec![Value::String(action.to_string()), args.clone()]),
        None => Value::String(action.to_string()),
    }
}

pub(super) fn is_empty_args(args: &Value) -> bool {
    match args {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Parses `keymap.json`. A blank document has no sections.
pub(super) fn decode(source: &str) -> Result<Vec<ZedSection>, FormatError> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&strip_jsonc(source)).map_err(|e| FormatError::Json(e.to_string()))
}

pub(super) fn encode(sections: &[ZedSection]) -> Result<String, FormatError> {
    let mut out =
        serde_json::to_string_pretty(sections).map_err(|e| FormatError::Json(e.to_string()))?;
    out.push('\n');
    Ok(out)
}
