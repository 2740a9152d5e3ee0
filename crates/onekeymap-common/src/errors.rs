use std::collections::BTreeMap;
use std::path::PathBuf;

/// Failure to parse a canonical key chord or keybinding string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("cannot parse empty string")]
    EmptyInput,

    #[error("invalid key code: '{0}'")]
    InvalidKeyCode(String),

    #[error("invalid key chord string: multiple key codes found ('{0}' and '{1}')")]
    MultipleKeyCodes(String, String),

    #[error("invalid key chord string: no key code found in '{0}'")]
    NoKeyCode(String),
}

/// Failure to translate a single binding to or from an editor's syntax.
///
/// Codec errors are scoped to one binding; the surrounding batch keeps going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0}")]
    TooManyChords(String),

    #[error("empty keybind")]
    EmptyKeybind,

    #[error("empty keystroke")]
    EmptyKeystroke,

    #[error("unknown modifier symbol: {0}")]
    UnknownModifierSymbol(char),

    #[error("invalid keystroke: multiple keys in '{0}'")]
    MultipleKeys(String),

    #[error("{0}")]
    Unencodable(String),
}

/// Structural failure of a whole container document.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid json: {0}")]
    Json(String),

    #[error("invalid xml: {0}")]
    Xml(String),

    #[error("invalid property list: {0}")]
    Plist(String),

    #[error("invalid config format: {0}")]
    Setting(String),

    #[error("invalid toml: {0}")]
    Toml(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("failed to parse YAML stream: {0}")]
    Yaml(String),

    #[error("duplicate action ID '{0}' found in stream")]
    DuplicateActionId(String),

    #[error("{}", render_duplicates(.editor, .duplicates))]
    DuplicateEditorMapping {
        editor: String,
        duplicates: BTreeMap<String, Vec<String>>,
    },

    #[error("{0}")]
    Invalid(String),
}

fn render_duplicates(editor: &str, duplicates: &BTreeMap<String, Vec<String>>) -> String {
    serde_json::json!({ "editor": editor, "duplicates": duplicates }).to_string()
}

/// Why a canonical binding did not make it into an exported editor file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportSkipReason {
    #[error("not supported")]
    NotSupported,

    #[error("action not supported")]
    ActionNotSupported,

    #[error("not supported: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug, thiserror::Error)]
pub enum OnekeymapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unknown editor: {0}")]
    UnknownEditor(String),

    #[error("{0} keymaps can only be exported, not imported")]
    ImportNotSupported(crate::EditorType),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        assert_eq!(
            ParseError::EmptyInput.to_string(),
            "cannot parse empty string"
        );
        assert_eq!(
            ParseError::InvalidKeyCode("foo".into()).to_string(),
            "invalid key code: 'foo'"
        );
        assert_eq!(
            ParseError::MultipleKeyCodes("a".into(), "b".into()).to_string(),
            "invalid key chord string: multiple key codes found ('a' and 'b')"
        );
    }

    #[test]
    fn codec_error_wraps_parse_error() {
        let err: CodecError = ParseError::InvalidKeyCode("zz".into()).into();
        assert_eq!(err.to_string(), "invalid key code: 'zz'");
        assert_eq!(
            CodecError::UnknownModifierSymbol('%').to_string(),
            "unknown modifier symbol: %"
        );
    }

    #[test]
    fn duplicate_mapping_renders_json() {
        let mut duplicates = BTreeMap::new();
        duplicates.insert(
            "editor.action.copy".to_string(),
            vec!["a.one".to_string(), "a.two".to_string()],
        );
        let err = MappingError::DuplicateEditorMapping {
            editor: "intellij".into(),
            duplicates,
        };
        let value: serde_json::Value = serde_json::from_str(&err.to_string()).unwrap();
        assert_eq!(value["editor"], "intellij");
        assert_eq!(value["duplicates"]["editor.action.copy"][1], "a.two");
    }

    #[test]
    fn export_skip_reason_display() {
        assert_eq!(ExportSkipReason::NotSupported.to_string(), "not supported");
        assert_eq!(
            ExportSkipReason::ActionNotSupported.to_string(),
            "action not supported"
        );
        assert_eq!(
            ExportSkipReason::Unsupported("no menu entry".into()).to_string(),
            "not supported: no menu entry"
        );
    }

    #[test]
    fn onekeymap_error_from_config() {
        let err: OnekeymapError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, OnekeymapError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn import_not_supported_names_the_editor() {
        let err = OnekeymapError::ImportNotSupported(crate::EditorType::Helix);
        assert_eq!(err.to_string(), "helix keymaps can only be exported, not imported");
    }

    #[test]
    fn onekeymap_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: OnekeymapError = io_err.into();
        assert!(matches!(err, OnekeymapError::Io(_)));
    }
}
