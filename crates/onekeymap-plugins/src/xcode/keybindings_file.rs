//! The `.idekeybindings` document: menu bindings and text bindings.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use onekeymap_common::FormatError;

use super::plist::{self, PlistValue};

const MENU_KEY_BINDINGS: &str = "Menu Key Bindings";
const TEXT_KEY_BINDINGS: &str = "Text Key Bindings";
const KEY_BINDINGS: &str = "Key Bindings";
const VERSION: i64 = 3;

/// One entry of `Menu Key Bindings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuKeyBinding {
    pub action: String,
    pub alternate: String,
    pub command_group_id: String,
    pub command_id: String,
    pub group: String,
    pub group_id: String,
    pub grouped_alternate: String,
    pub keyboard_shortcut: String,
    pub navigation: String,
    pub parent_title: String,
    pub title: String,
}

impl MenuKeyBinding {
    /// Plist keys in the order they are written, paired with their fields.
    fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("Action", self.action.as_str()),
            ("Alternate", self.alternate.as_str()),
            ("CommandGroupID", self.command_group_id.as_str()),
            ("CommandID", self.command_id.as_str()),
            ("Group", self.group.as_str()),
            ("GroupID", self.group_id.as_str()),
            ("GroupedAlternate", self.grouped_alternate.as_str()),
            ("Keyboard Shortcut", self.keyboard_shortcut.as_str()),
            ("Navigation", self.navigation.as_str()),
            ("Parent Title", self.parent_title.as_str()),
            ("Title", self.title.as_str()),
        ]
    }

    fn from_plist(value: &PlistValue) -> MenuKeyBinding {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(PlistValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        MenuKeyBinding {
            action: field("Action"),
            alternate: field("Alternate"),
            command_group_id: field("CommandGroupID"),
            command_id: field("CommandID"),
            group: field("Group"),
            group_id: field("GroupID"),
            grouped_alternate: field("GroupedAlternate"),
            keyboard_shortcut: field("Keyboard Shortcut"),
            navigation: field("Navigation"),
            parent_title: field("Parent Title"),
            title: field("Title"),
        }
    }

    fn to_plist(&self) -> PlistValue {
        PlistValue::Dict(
            self.fields()
                .into_iter()
                .map(|(key, value)| (key.to_string(), PlistValue::String(value.to_string())))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XcodeKeybindings {
    pub menu: Vec<MenuKeyBinding>,
    /// Xcode key string to a selector or a selector chain. Values are kept
    /// raw so that shapes this tool does not write survive an export.
    pub text: BTreeMap<String, PlistValue>,
}

/// Selectors of a text binding value: a string, an array of strings, or a
/// dictionary wrapping them under `Items`.
pub fn text_items(value: &PlistValue) -> Vec<String> {
    match value {
        PlistValue::String(selector) => vec![selector.clone()],
        PlistValue::Array(items) => items
            .iter()
            .filter_map(PlistValue::as_str)
            .map(str::to_string)
            .collect(),
        PlistValue::Dict(_) => value.get("Items").map(text_items).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// The value written for `selectors`: a bare string for one, an array for a chain.
pub fn text_value(selectors: &[String]) -> PlistValue {
    match selectors {
        [single] => PlistValue::String(single.clone()),
        _ => PlistValue::Array(selectors.iter().cloned().map(PlistValue::String).collect()),
    }
}

/// Parses an `.idekeybindings` file. A blank document has no bindings.
pub(super) fn decode(source: &str) -> Result<XcodeKeybindings, FormatError> {
    if source.trim().is_empty() {
        return Ok(XcodeKeybindings::default());
    }
    let root = plist::from_str(source)?;
    if !matches!(root, PlistValue::Dict(_)) {
        return Err(FormatError::Plist(
            "expected a dictionary at the plist root".to_string(),
        ));
    }

    let menu = root
        .get(MENU_KEY_BINDINGS)
        .and_then(|section| section.get(KEY_BINDINGS))
        .and_then(PlistValue::as_array)
        .unwrap_or_default()
        .iter()
        .filter(|entry| matches!(entry, PlistValue::Dict(_)))
        .map(MenuKeyBinding::from_plist)
        .collect();

    let text = match root
        .get(TEXT_KEY_BINDINGS)
        .and_then(|section| section.get(KEY_BINDINGS))
    {
        Some(PlistValue::Dict(map)) => map.clone().into_iter().collect(),
        _ => BTreeMap::new(),
    };

    Ok(XcodeKeybindings { menu, text })
}

fn section(bindings: PlistValue) -> PlistValue {
    let mut map = IndexMap::new();
    map.insert(KEY_BINDINGS.to_string(), bindings);
    map.insert("Version".to_string(), PlistValue::Integer(VERSION));
    PlistValue::Dict(map)
}

pub(super) fn encode(document: &XcodeKeybindings) -> Result<String, FormatError> {
    let menu = PlistValue::Array(document.menu.iter().map(MenuKeyBinding::to_plist).collect());
    let text = PlistValue::Dict(
        document
            .text
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    );

    let mut root = IndexMap::new();
    root.insert(MENU_KEY_BINDINGS.to_string(), section(menu));
    root.insert(TEXT_KEY_BINDINGS.to_string(), section(text));
    plist::to_string(&PlistValue::Dict(root))
}
