use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use onekeymap_common::{EditorFamily, EditorType, Platform};
use onekeymap_config::{ActionMappingConfig, MappingConfig};
use onekeymap_keymap::Keymap;

use super::{ConflictingAction, ValidationIssue, ValidationReport, ValidationRule};

const DANGLING_SUGGESTION: &str =
    "Check if the action ID is correct or if it needs to be added to action mappings";
const DUPLICATE_MESSAGE: &str = "This keymap is defined multiple times in the source configuration.";

/// Flags a chord bound to more than one action.
///
/// Chords compare by their macOS `+` spelling. With a mapping table each
/// action is listed with the source editor's command for it.
#[derive(Default)]
pub struct KeybindConflictRule {
    mappings: Option<Arc<MappingConfig>>,
}

impl KeybindConflictRule {
    pub fn new(mappings: Option<Arc<MappingConfig>>) -> Self {
        Self { mappings }
    }
}

impl ValidationRule for KeybindConflictRule {
    fn validate(&self, keymap: &Keymap, report: &mut ValidationReport) {
        let mut by_chord: IndexMap<String, Vec<&str>> = IndexMap::new();
        for action in &keymap.actions {
            for binding in &action.bindings {
                if binding.is_empty() {
                    continue;
                }
                let names = by_chord.entry(binding.signature()).or_default();
                if !names.contains(&action.name.as_str()) {
                    names.push(&action.name);
                }
            }
        }

        for (keybinding, names) in by_chord {
            if names.len() < 2 {
                continue;
            }
            let actions = names
                .into_iter()
                .map(|name| ConflictingAction {
                    action: name.to_string(),
                    editor_command: self.editor_command(name, report.source_editor),
                })
                .collect();
            report.issues.push(ValidationIssue::KeybindConflict {
                keybinding,
                actions,
            });
        }
    }
}

impl KeybindConflictRule {
    fn editor_command(&self, action: &str, editor: Option<EditorType>) -> String {
        let (Some(mappings), Some(editor)) = (&self.mappings, editor) else {
            return String::new();
        };
        mappings
            .get(action)
            .map(|mapping| editor_command(mapping, editor))
            .unwrap_or_default()
    }
}

/// The first command `editor` runs for `mapping`.
fn editor_command(mapping: &ActionMappingConfig, editor: EditorType) -> String {
    match editor.family() {
        EditorFamily::VsCode => mapping
            .vscode_configs(editor)
            .first()
            .map(|vc| vc.command.clone()),
        EditorFamily::Zed => mapping.zed.iter().next().map(|zc| zc.action.clone()),
        EditorFamily::IntelliJ => Some(mapping.intellij.action.clone()),
        EditorFamily::Xcode => mapping.xcode.iter().next().map(|xc| {
            if xc.menu.action.is_empty() {
                xc.text_action.0.join(" ")
            } else {
                xc.menu.action.clone()
            }
        }),
        EditorFamily::Helix => mapping.helix.iter().next().map(|hc| hc.command.clone()),
    }
    .unwrap_or_default()
}

/// Flags actions the mapping table does not know.
pub struct DanglingActionRule {
    mappings: Arc<MappingConfig>,
}

impl DanglingActionRule {
    pub fn new(mappings: Arc<MappingConfig>) -> Self {
        Self { mappings }
    }
}

impl ValidationRule for DanglingActionRule {
    fn validate(&self, keymap: &Keymap, report: &mut ValidationReport) {
        for action in &keymap.actions {
            if self.mappings.get(&action.name).is_none() {
                report.issues.push(ValidationIssue::DanglingAction {
                    action: action.name.clone(),
                    suggestion: DANGLING_SUGGESTION.to_string(),
                });
            }
        }
    }
}

/// Flags every binding of an action that `target` cannot export, fallbacks
/// included. Unknown actions are left to [`DanglingActionRule`].
pub struct UnsupportedActionRule {
    mappings: Arc<MappingConfig>,
    target: EditorType,
}

impl UnsupportedActionRule {
    pub fn new(mappings: Arc<MappingConfig>, target: EditorType) -> Self {
        Self { mappings, target }
    }
}

impl ValidationRule for UnsupportedActionRule {
    fn validate(&self, keymap: &Keymap, report: &mut ValidationReport) {
        for action in &keymap.actions {
            if !self.mappings.is_action_mapped(&action.name) {
                continue;
            }
            if self
                .mappings
                .get_export_action(&action.name, self.target)
                .is_some()
            {
                continue;
            }
            for binding in &action.bindings {
                report.issues.push(ValidationIssue::UnsupportedAction {
                    action: action.name.clone(),
                    keybinding: binding.format(Platform::MacOs, " "),
                    target_editor: self.target,
                });
            }
        }
    }
}

/// Warns about the same binding listed twice for one action.
#[derive(Default)]
pub struct DuplicateMappingRule;

impl ValidationRule for DuplicateMappingRule {
    fn validate(&self, keymap: &Keymap, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for action in &keymap.actions {
            for binding in &action.bindings {
                let keybinding = binding.signature();
                if seen.insert(format!("{}\0{keybinding}", action.name)) {
                    continue;
                }
                report.warnings.push(ValidationIssue::DuplicateMapping {
                    action: action.name.clone(),
                    keybinding,
                    message: DUPLICATE_MESSAGE.to_string(),
                });
            }
        }
    }
}
