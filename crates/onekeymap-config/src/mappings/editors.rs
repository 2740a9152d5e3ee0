use onekeymap_common::OneOrMany;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Flags shared by every editor column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorActionMapping {
    /// Export-only entry; never used to resolve an imported binding.
    pub disable_import: bool,
    /// The editor cannot express this action.
    pub not_supported: bool,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VscodeMappingConfig {
    #[serde(flatten)]
    pub flags: EditorActionMapping,
    pub command: String,
    pub when: String,
    pub args: Option<Map<String, Value>>,
    /// Preferred entry when several entries of one action share a command.
    pub for_import: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntelliJMappingConfig {
    #[serde(flatten)]
    pub flags: EditorActionMapping,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZedMappingConfig {
    #[serde(flatten)]
    pub flags: EditorActionMapping,
    pub action: String,
    pub context: String,
    pub args: Option<Value>,
}

/// Fields of an Xcode `Menu Key Bindings` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct XcodeMenuAction {
    pub action: String,
    #[serde(rename = "commandGroupID")]
    pub command_group_id: String,
    #[serde(rename = "commandID")]
    pub command_id: String,
    pub alternate: String,
    pub group: String,
    #[serde(rename = "groupID")]
    pub group_id: String,
    #[serde(rename = "groupedAlternate")]
    pub grouped_alternate: String,
    pub navigation: String,
    #[serde(rename = "parentTitle")]
    pub parent_title: String,
    pub title: String,
}

/// An Xcode entry is either a menu action or a text action.
///
/// A text action with several selectors is a macro chain and can only be exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct XcodeMappingConfig {
    #[serde(flatten)]
    pub flags: EditorActionMapping,
    #[serde(rename = "textAction")]
    pub text_action: OneOrMany<String>,
    #[serde(flatten)]
    pub menu: XcodeMenuAction,
}

/// Helix editing mode a key table belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelixMode {
    #[default]
    Normal,
    Insert,
    Select,
}

impl HelixMode {
    pub const ALL: [HelixMode; 3] = [HelixMode::Normal, HelixMode::Insert, HelixMode::Select];

    pub fn as_str(&self) -> &'static str {
        match self {
            HelixMode::Normal => "normal",
            HelixMode::Insert => "insert",
            HelixMode::Select => "select",
        }
    }
}

/// A Helix command bound in one mode. The mode defaults to normal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HelixMappingConfig {
    #[serde(flatten)]
    pub flags: EditorActionMapping,
    pub command: String,
    pub mode: HelixMode,
}
