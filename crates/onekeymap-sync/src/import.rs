//! Editor file to canonical keymap, with change tracking against a baseline.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use onekeymap_common::Result;
use onekeymap_config::MappingConfig;
use onekeymap_keymap::{dedup_keymap, pair_key, union_bindings, Action, ActionMeta, Keymap};
use onekeymap_plugins::{ImportReport, Plugin};
use tracing::{debug, info};

use crate::validate::{DanglingActionRule, KeybindConflictRule, ValidationReport, Validator};

/// An action whose binding set changed between baseline and import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapDiff {
    pub before: Action,
    pub after: Action,
}

/// What an import changes relative to the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeymapChanges {
    /// Sorted by action name.
    pub add: Vec<Action>,
    /// Sorted by action name.
    pub remove: Vec<Action>,
    /// In baseline order.
    pub update: Vec<KeymapDiff>,
}

impl KeymapChanges {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.update.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// The keymap to save: the baseline with the import merged in.
    pub setting: Keymap,
    pub changes: KeymapChanges,
    /// Entries of the editor file the plugin could not map.
    pub report: ImportReport,
    pub validation: ValidationReport,
}

pub struct ImportService {
    mappings: Arc<MappingConfig>,
    validator: Validator,
}

impl ImportService {
    /// A service validating imports for keybind conflicts and unknown
    /// actions.
    pub fn new(mappings: Arc<MappingConfig>) -> Self {
        let validator = Validator::default()
            .with_rule(KeybindConflictRule::new(Some(mappings.clone())))
            .with_rule(DanglingActionRule::new(mappings.clone()));
        Self::with_validator(mappings, validator)
    }

    pub fn with_validator(mappings: Arc<MappingConfig>, validator: Validator) -> Self {
        Self {
            mappings,
            validator,
        }
    }

    /// Imports `source` through `plugin`.
    ///
    /// Without a non-empty `base` every imported action is an addition.
    /// Otherwise the import is merged into `base`: baseline bindings stay,
    /// new bindings are appended, and the change set compares the two.
    pub fn import(
        &self,
        plugin: &dyn Plugin,
        source: &str,
        base: Option<&Keymap>,
    ) -> Result<ImportResult> {
        let editor = plugin.editor_type();
        let imported = plugin.import(source)?;

        let mut setting = dedup_keymap(self.decorate(imported.keymap));
        setting.sort_by_name();
        info!(
            "imported {} actions ({} bindings) from {editor}",
            setting.len(),
            setting.binding_count()
        );

        let validation = self.validator.validate(&setting, Some(editor));

        let Some(base) = base.filter(|base| !base.is_empty()) else {
            let changes = KeymapChanges {
                add: setting.actions.clone(),
                ..Default::default()
            };
            return Ok(ImportResult {
                setting,
                changes,
                report: imported.report,
                validation,
            });
        };

        let setting = self.decorate(dedup_keymap(union_with_base(base, setting)));
        let mut changes = calculate_changes(base, &setting);
        for action in changes.add.iter_mut().chain(changes.remove.iter_mut()) {
            self.decorate_action(action);
        }
        for diff in &mut changes.update {
            self.decorate_action(&mut diff.before);
            self.decorate_action(&mut diff.after);
        }
        debug!(
            "import changes: {} added, {} removed, {} updated",
            changes.add.len(),
            changes.remove.len(),
            changes.update.len()
        );

        Ok(ImportResult {
            setting,
            changes,
            report: imported.report,
            validation,
        })
    }

    fn decorate(&self, mut keymap: Keymap) -> Keymap {
        for action in &mut keymap.actions {
            self.decorate_action(action);
        }
        keymap
    }

    /// Fills missing description and display name from the mapping table.
    fn decorate_action(&self, action: &mut Action) {
        if let Some(mapping) = self.mappings.get(&action.name) {
            action.meta.fill_from(&ActionMeta {
                comment: None,
                description: non_empty(&mapping.description),
                display_name: non_empty(&mapping.name),
            });
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Baseline actions first, in their order, with imported bindings appended
/// by signature. Actions new to the baseline follow in import order.
pub fn union_with_base(base: &Keymap, imported: Keymap) -> Keymap {
    if base.is_empty() {
        return imported;
    }

    let mut merged: IndexMap<String, Action> = IndexMap::with_capacity(base.len());
    for action in &base.actions {
        match merged.get_mut(&action.name) {
            Some(existing) => existing.bindings.extend(action.bindings.iter().cloned()),
            None => {
                merged.insert(action.name.clone(), action.clone());
            }
        }
    }

    for action in imported.actions {
        match merged.get_mut(&action.name) {
            Some(existing) => {
                union_bindings(&mut existing.bindings, &action.bindings);
                existing.meta.fill_from(&action.meta);
            }
            None => {
                merged.insert(action.name.clone(), action);
            }
        }
    }

    merged.into_values().collect()
}

fn has_valid_binding(action: &Action) -> bool {
    action.bindings.iter().any(|binding| !binding.is_empty())
}

/// Compares two keymaps by (action, binding set).
///
/// Only actions with at least one non-empty binding take part. An action
/// present exactly once on both sides with a different binding set is an
/// update rather than a remove plus an add.
pub fn calculate_changes(base: &Keymap, setting: &Keymap) -> KeymapChanges {
    let index = |keymap: &Keymap| {
        let mut by_action: IndexMap<String, Vec<Action>> = IndexMap::new();
        let mut pairs: IndexMap<String, Action> = IndexMap::new();
        for action in keymap.actions.iter().filter(|action| has_valid_binding(action)) {
            by_action
                .entry(action.name.clone())
                .or_default()
                .push(action.clone());
            pairs.insert(pair_key(action), action.clone());
        }
        (by_action, pairs)
    };
    let (base_by_action, base_pairs) = index(base);
    let (new_by_action, new_pairs) = index(setting);

    let mut adds: HashMap<String, Action> = new_pairs
        .iter()
        .filter(|(key, _)| !base_pairs.contains_key(*key))
        .map(|(key, action)| (key.clone(), action.clone()))
        .collect();
    let mut removes: HashMap<String, Action> = base_pairs
        .iter()
        .filter(|(key, _)| !new_pairs.contains_key(*key))
        .map(|(key, action)| (key.clone(), action.clone()))
        .collect();

    let mut update = Vec::new();
    for (name, before_list) in &base_by_action {
        let Some(after_list) = new_by_action.get(name) else {
            continue;
        };
        let ([before], [after]) = (before_list.as_slice(), after_list.as_slice()) else {
            continue;
        };
        let (before_key, after_key) = (pair_key(before), pair_key(after));
        if before_key == after_key {
            continue;
        }
        adds.remove(&after_key);
        removes.remove(&before_key);
        update.push(KeymapDiff {
            before: before.clone(),
            after: after.clone(),
        });
    }

    let mut add: Vec<Action> = adds.into_values().collect();
    add.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| pair_key(a).cmp(&pair_key(b))));
    let mut remove: Vec<Action> = removes.into_values().collect();
    remove.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| pair_key(a).cmp(&pair_key(b))));

    KeymapChanges {
        add,
        remove,
        update,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onekeymap_keymap::Keybinding;
    use onekeymap_plugins::ZedPlugin;
    use pretty_assertions::assert_eq;

    const MAPPINGS: &str = r#"
mappings:
  - id: actions.edit.copy
    description: Copy
    name: Copy
    zed:
      action: editor::Copy
      context: Editor
  - id: actions.edit.paste
    description: Paste
    zed:
      action: editor::Paste
      context: Editor
  - id: actions.edit.cut
    zed:
      action: editor::Cut
      context: Editor
"#;

    fn kb(text: &str) -> Keybinding {
        Keybinding::parse(text, "+").unwrap()
    }

    fn action(name: &str, bindings: &[&str]) -> Action {
        Action::new(name, bindings.iter().map(|text| kb(text)).collect())
    }

    fn mappings() -> Arc<MappingConfig> {
        Arc::new(MappingConfig::from_yaml_str(MAPPINGS).unwrap())
    }

    fn names(actions: &[Action]) -> Vec<&str> {
        actions.iter().map(|action| action.name.as_str()).collect()
    }

    #[test]
    fn union_keeps_base_order_and_appends() {
        let base = Keymap::new(vec![
            action("b", &["cmd+b"]),
            action("a", &["cmd+a"]),
        ]);
        let imported = Keymap::new(vec![
            action("a", &["cmd+a", "ctrl+a"]),
            action("c", &["cmd+c"]),
        ]);
        let merged = union_with_base(&base, imported);
        assert_eq!(names(&merged.actions), ["b", "a", "c"]);
        assert_eq!(merged.actions[1].bindings, [kb("cmd+a"), kb("ctrl+a")]);
    }

    #[test]
    fn union_with_empty_base_is_the_import() {
        let imported = Keymap::new(vec![action("a", &["cmd+a"])]);
        assert_eq!(union_with_base(&Keymap::default(), imported.clone()), imported);
    }

    #[test]
    fn changes_split_into_add_remove_update() {
        let base = Keymap::new(vec![
            action("keep", &["cmd+k"]),
            action("gone", &["cmd+g"]),
            action("moved", &["cmd+m"]),
        ]);
        let setting = Keymap::new(vec![
            action("keep", &["cmd+k"]),
            action("moved", &["ctrl+m"]),
            action("zeta", &["cmd+z"]),
            action("alpha", &["cmd+1"]),
        ]);

        let changes = calculate_changes(&base, &setting);
        assert_eq!(names(&changes.add), ["alpha", "zeta"]);
        assert_eq!(names(&changes.remove), ["gone"]);
        assert_eq!(changes.update.len(), 1);
        assert_eq!(changes.update[0].before, action("moved", &["cmd+m"]));
        assert_eq!(changes.update[0].after, action("moved", &["ctrl+m"]));
    }

    #[test]
    fn binding_order_is_not_a_change() {
        let base = Keymap::new(vec![action("a", &["cmd+a", "ctrl+a"])]);
        let setting = Keymap::new(vec![action("a", &["ctrl+a", "cmd+a"])]);
        assert!(calculate_changes(&base, &setting).is_empty());
    }

    #[test]
    fn actions_without_bindings_are_ignored() {
        let base = Keymap::new(vec![Action::new("empty", Vec::new())]);
        let setting = Keymap::new(vec![action("a", &["cmd+a"])]);
        let changes = calculate_changes(&base, &setting);
        assert!(changes.remove.is_empty());
        assert_eq!(names(&changes.add), ["a"]);
    }

    const ZED_SOURCE: &str = r#"[
  {
    "context": "Editor",
    "bindings": {
      "cmd-v": "editor::Paste",
      "cmd-c": "editor::Copy",
      "ctrl-insert": "editor::Copy",
      "cmd-shift-q": "workspace::Unknown"
    }
  }
]"#;

    #[test]
    fn import_without_base_adds_everything_sorted() {
        let mappings = mappings();
        let service = ImportService::new(mappings.clone());
        let plugin = ZedPlugin::new(mappings);

        let result = service.import(&plugin, ZED_SOURCE, None).unwrap();
        assert_eq!(
            names(&result.setting.actions),
            ["actions.edit.copy", "actions.edit.paste"]
        );
        assert_eq!(result.changes.add, result.setting.actions);
        assert!(result.changes.remove.is_empty());

        let copy = result.setting.get("actions.edit.copy").unwrap();
        assert_eq!(copy.bindings, [kb("cmd+c"), kb("ctrl+insert")]);
        assert_eq!(copy.meta.description.as_deref(), Some("Copy"));
        assert_eq!(copy.meta.display_name.as_deref(), Some("Copy"));

        assert_eq!(result.report.skipped.len(), 1);
        assert_eq!(result.validation.summary.processed, 2);
        assert!(result.validation.issues.is_empty());
    }

    #[test]
    fn import_with_base_merges_and_tracks_changes() {
        let mappings = mappings();
        let service = ImportService::new(mappings.clone());
        let plugin = ZedPlugin::new(mappings);
        let base = Keymap::new(vec![
            action("actions.edit.cut", &["cmd+x"]),
            action("actions.edit.copy", &["cmd+c"]),
        ]);

        let result = service.import(&plugin, ZED_SOURCE, Some(&base)).unwrap();
        assert_eq!(
            names(&result.setting.actions),
            ["actions.edit.cut", "actions.edit.copy", "actions.edit.paste"]
        );
        assert_eq!(
            result.setting.get("actions.edit.copy").unwrap().bindings,
            [kb("cmd+c"), kb("ctrl+insert")]
        );

        assert_eq!(names(&result.changes.add), ["actions.edit.paste"]);
        assert_eq!(result.changes.add[0].meta.description.as_deref(), Some("Paste"));
        assert!(result.changes.remove.is_empty());
        assert_eq!(result.changes.update.len(), 1);
        assert_eq!(result.changes.update[0].before.bindings, [kb("cmd+c")]);
    }

    #[test]
    fn empty_base_counts_as_no_base() {
        let mappings = mappings();
        let service = ImportService::new(mappings.clone());
        let plugin = ZedPlugin::new(mappings);
        let result = service
            .import(&plugin, ZED_SOURCE, Some(&Keymap::default()))
            .unwrap();
        assert_eq!(result.changes.add.len(), 2);
    }

    #[test]
    fn malformed_source_is_an_error() {
        let mappings = mappings();
        let service = ImportService::new(mappings.clone());
        let plugin = ZedPlugin::new(mappings);
        assert!(service.import(&plugin, "{not json", None).is_err());
    }
}
