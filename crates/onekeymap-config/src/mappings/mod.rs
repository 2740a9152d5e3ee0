//! Action-mapping table: universal action ids and their per-editor commands.

mod checks;
mod editors;


use std::collections::BTreeMap;
use std::path::Path;

use onekeymap_common::{ConfigError, EditorFamily, EditorType, MappingError, OneOrMany};
use serde::Deserialize;
use tracing::info;

pub use checks::ensure_trailing_colon;
pub use editors::{
    EditorActionMapping, HelixMappingConfig, HelixMode, IntelliJMappingConfig,
    VscodeMappingConfig, XcodeMappingConfig, XcodeMenuAction, ZedMappingConfig,
};

/// Note returned by [`ActionMappingConfig::is_supported`] for an entry marked
/// `notSupported` without an explanation.
pub const EXPLICITLY_NOT_SUPPORTED: &str = "__explicitly_not_supported__";

const BUILTIN_MAPPINGS: &str = include_str!("../../mappings/action_mappings.yaml");

/// Everything known about one universal action.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionMappingConfig {
    pub id: String,
    pub description: String,
    pub name: String,
    /// Only meaningful in a few editors and not portable.
    pub featured: bool,
    pub featured_reason: String,
    pub category: String,
    pub vscode: OneOrMany<VscodeMappingConfig>,
    pub windsurf: OneOrMany<VscodeMappingConfig>,
    pub cursor: OneOrMany<VscodeMappingConfig>,
    pub zed: OneOrMany<ZedMappingConfig>,
    pub intellij: IntelliJMappingConfig,
    pub xcode: OneOrMany<XcodeMappingConfig>,
    /// Export-only; Helix keymaps are never imported.
    pub helix: OneOrMany<HelixMappingConfig>,
    /// Child ids for grouping in listings. No effect on import or export.
    pub children: Vec<String>,
    /// Ids tried in order when this action cannot be exported to an editor.
    pub fallbacks: Vec<String>,
}

impl ActionMappingConfig {
    /// VSCode-family entries for `editor`: the variant's own column when set,
    /// otherwise the `vscode` column.
    pub fn vscode_configs(&self, editor: EditorType) -> &[VscodeMappingConfig] {
        match editor {
            EditorType::Windsurf | EditorType::WindsurfNext if !self.windsurf.is_empty() => {
                &self.windsurf.0
            }
            EditorType::Cursor if !self.cursor.is_empty() => &self.cursor.0,
            _ => &self.vscode.0,
        }
    }

    /// Whether `editor` can express this action, and the notes attached to it.
    ///
    /// An entry flagged `notSupported` short-circuits with its note, or
    /// [`EXPLICITLY_NOT_SUPPORTED`] when it has none.
    pub fn is_supported(&self, editor: EditorType) -> (bool, String) {
        match editor.family() {
            EditorFamily::VsCode => supported_from(self.vscode_configs(editor), |vc| {
                !vc.command.is_empty()
            }),
            EditorFamily::Zed => supported_from(&self.zed.0, |zc| !zc.action.is_empty()),
            EditorFamily::Xcode => supported_from(&self.xcode.0, |xc| {
                !xc.menu.action.is_empty() || !xc.text_action.is_empty()
            }),
            EditorFamily::Helix => supported_from(&self.helix.0, |hc| !hc.command.is_empty()),
            EditorFamily::IntelliJ => {
                let ij = &self.intellij;
                if *ij == IntelliJMappingConfig::default() {
                    return (false, String::new());
                }
                if ij.flags.not_supported {
                    return (false, not_supported_note(&ij.flags.note));
                }
                (!ij.action.is_empty(), ij.flags.note.clone())
            }
        }
    }
}

trait HasFlags {
    fn flags(&self) -> &EditorActionMapping;
}

impl HasFlags for VscodeMappingConfig {
    fn flags(&self) -> &EditorActionMapping {
        &self.flags
    }
}

impl HasFlags for ZedMappingConfig {
    fn flags(&self) -> &EditorActionMapping {
        &self.flags
    }
}

impl HasFlags for XcodeMappingConfig {
    fn flags(&self) -> &EditorActionMapping {
        &self.flags
    }
}

impl HasFlags for HelixMappingConfig {
    fn flags(&self) -> &EditorActionMapping {
        &self.flags
    }
}

fn supported_from<T: HasFlags>(configs: &[T], has_mapping: impl Fn(&T) -> bool) -> (bool, String) {
    if configs.is_empty() {
        return (false, String::new());
    }
    let mut notes = Vec::new();
    for config in configs {
        let flags = config.flags();
        if flags.not_supported {
            return (false, not_supported_note(&flags.note));
        }
        if !flags.note.is_empty() {
            notes.push(flags.note.as_str());
        }
    }
    (configs.iter().any(has_mapping), notes.join(", "))
}

fn not_supported_note(note: &str) -> String {
    if note.is_empty() {
        EXPLICITLY_NOT_SUPPORTED.to_string()
    } else {
        note.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct MappingDocument {
    #[serde(default)]
    mappings: Vec<ActionMappingConfig>,
}

/// The merged, validated mapping table.
///
/// Built once and shared read-only; lookups never mutate it.
#[derive(Debug, Clone, Default)]
pub struct MappingConfig {
    mappings: BTreeMap<String, ActionMappingConfig>,
}

impl MappingConfig {
    /// Parses a multi-document YAML stream. Each document holds a `mappings:` list.
    pub fn from_yaml_str(data: &str) -> Result<MappingConfig, MappingError> {
        let mut mappings = BTreeMap::new();

        for document in serde_yaml::Deserializer::from_str(data) {
            let parsed = Option::<MappingDocument>::deserialize(document)
                .map_err(|e| MappingError::Yaml(e.to_string()))?;
            let Some(parsed) = parsed else {
                continue;
            };
            for mapping in parsed.mappings {
                if mappings.contains_key(&mapping.id) {
                    return Err(MappingError::DuplicateActionId(mapping.id));
                }
                mappings.insert(mapping.id.clone(), mapping);
            }
        }

        checks::check_editor_configs(&mappings)?;
        Ok(MappingConfig { mappings })
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<MappingConfig, MappingError> {
        Self::from_yaml_str(BUILTIN_MAPPINGS)
    }

    /// Loads a table from a YAML file on disk.
    pub fn load_from_path(path: &Path) -> Result<MappingConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml_str(&content)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        info!(
            "loaded {} action mappings from {}",
            config.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn get(&self, id: &str) -> Option<&ActionMappingConfig> {
        self.mappings.get(id)
    }

    pub fn is_action_mapped(&self, id: &str) -> bool {
        self.mappings.contains_key(id)
    }

    /// Mappings ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &ActionMappingConfig> {
        self.mappings.values()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// The mapping to export for `id` on `editor`.
    ///
    /// Returns the action itself when the editor supports it, otherwise the
    /// first supported entry of its `fallbacks`. The flag is `true` when a
    /// fallback was used.
    pub fn get_export_action(
        &self,
        id: &str,
        editor: EditorType,
    ) -> Option<(&ActionMappingConfig, bool)> {
        let mapping = self.get(id)?;
        if mapping.is_supported(editor).0 {
            return Some((mapping, false));
        }
        mapping
            .fallbacks
            .iter()
            .filter_map(|fallback| self.get(fallback))
            .find(|fallback| fallback.is_supported(editor).0)
            .map(|fallback| (fallback, true))
    }
}
