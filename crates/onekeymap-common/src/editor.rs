use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Codec family an editor belongs to. Editors in one family share a file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorFamily {
    VsCode,
    IntelliJ,
    Zed,
    Xcode,
    Helix,
}

/// Every editor the converter can read or write.
///
/// The string form is dotted: the family prefix, then the product
/// (`vscode.cursor`, `intellij.pycharm`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EditorType {
    VsCode,
    Windsurf,
    WindsurfNext,
    Cursor,
    IntelliJ,
    IntelliJCommunity,
    PyCharm,
    WebStorm,
    CLion,
    PhpStorm,
    RubyMine,
    GoLand,
    RustRover,
    Zed,
    Xcode,
    Helix,
}

impl EditorType {
    pub const ALL: [EditorType; 16] = [
        EditorType::VsCode,
        EditorType::Windsurf,
        EditorType::WindsurfNext,
        EditorType::Cursor,
        EditorType::IntelliJ,
        EditorType::IntelliJCommunity,
        EditorType::PyCharm,
        EditorType::WebStorm,
        EditorType::CLion,
        EditorType::PhpStorm,
        EditorType::RubyMine,
        EditorType::GoLand,
        EditorType::RustRover,
        EditorType::Zed,
        EditorType::Xcode,
        EditorType::Helix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditorType::VsCode => "vscode",
            EditorType::Windsurf => "vscode.windsurf",
            EditorType::WindsurfNext => "vscode.windsurf-next",
            EditorType::Cursor => "vscode.cursor",
            EditorType::IntelliJ => "intellij",
            EditorType::IntelliJCommunity => "intellij.intellij-community",
            EditorType::PyCharm => "intellij.pycharm",
            EditorType::WebStorm => "intellij.webstorm",
            EditorType::CLion => "intellij.clion",
            EditorType::PhpStorm => "intellij.phpstorm",
            EditorType::RubyMine => "intellij.rubymine",
            EditorType::GoLand => "intellij.goland",
            EditorType::RustRover => "intellij.rustrover",
            EditorType::Zed => "zed",
            EditorType::Xcode => "xcode",
            EditorType::Helix => "helix",
        }
    }

    /// Human-readable product name.
    pub fn app_name(&self) -> &'static str {
        match self {
            EditorType::VsCode => "VSCode",
            EditorType::Windsurf => "Windsurf",
            EditorType::WindsurfNext => "Windsurf Next",
            EditorType::Cursor => "Cursor",
            EditorType::IntelliJ => "IntelliJ IDEA Ultimate",
            EditorType::IntelliJCommunity => "IntelliJ IDEA Community",
            EditorType::PyCharm => "PyCharm",
            EditorType::WebStorm => "WebStorm",
            EditorType::CLion => "CLion",
            EditorType::PhpStorm => "PhpStorm",
            EditorType::RubyMine => "RubyMine",
            EditorType::GoLand => "GoLand",
            EditorType::RustRover => "RustRover",
            EditorType::Zed => "Zed",
            EditorType::Xcode => "Xcode (Experimental)",
            EditorType::Helix => "Helix (Experimental)",
        }
    }

    pub fn family(&self) -> EditorFamily {
        match self {
            EditorType::VsCode
            | EditorType::Windsurf
            | EditorType::WindsurfNext
            | EditorType::Cursor => EditorFamily::VsCode,
            EditorType::Zed => EditorFamily::Zed,
            EditorType::Xcode => EditorFamily::Xcode,
            EditorType::Helix => EditorFamily::Helix,
            _ => EditorFamily::IntelliJ,
        }
    }
}

impl fmt::Display for EditorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        EditorType::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == lowered)
            .ok_or_else(|| format!("unknown editor: {s}"))
    }
}

impl TryFrom<String> for EditorType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EditorType> for String {
    fn from(value: EditorType) -> Self {
        value.as_str().to_string()
    }
}
