use crate::keybinding::Keybinding;

/// Descriptive fields carried alongside an action in the setting file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMeta {
    pub comment: Option<String>,
    pub description: Option<String>,
    pub display_name: Option<String>,
}

impl ActionMeta {
    /// Fills empty fields from `other`, keeping what is already set.
    pub fn fill_from(&mut self, other: &ActionMeta) {
        if self.comment.is_none() {
            self.comment.clone_from(&other.comment);
        }
        if self.description.is_none() {
            self.description.clone_from(&other.description);
        }
        if self.display_name.is_none() {
            self.display_name.clone_from(&other.display_name);
        }
    }
}

/// A universal action id and the bindings assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub bindings: Vec<Keybinding>,
    pub meta: ActionMeta,
}

impl Action {
    pub fn new(name: impl Into<String>, bindings: Vec<Keybinding>) -> Action {
        Action {
            name: name.into(),
            bindings,
            meta: ActionMeta::default(),
        }
    }

    pub fn has_binding(&self, signature: &str) -> bool {
        self.bindings.iter().any(|kb| kb.signature() == signature)
    }
}

/// The canonical model: actions in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keymap {
    pub actions: Vec<Action>,
}

impl Keymap {
    pub fn new(actions: Vec<Action>) -> Keymap {
        Keymap { actions }
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Total number of bindings across all actions.
    pub fn binding_count(&self) -> usize {
        self.actions.iter().map(|action| action.bindings.len()).sum()
    }

    pub fn sort_by_name(&mut self) {
        self.actions.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

impl FromIterator<Action> for Keymap {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Keymap {
            actions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb(text: &str) -> Keybinding {
        Keybinding::parse(text, "+").unwrap()
    }

    #[test]
    fn lookup_and_counts() {
        let keymap: Keymap = [
            Action::new("actions.edit.copy", vec![kb("cmd+c"), kb("ctrl+insert")]),
            Action::new("actions.edit.paste", vec![kb("cmd+v")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(keymap.len(), 2);
        assert_eq!(keymap.binding_count(), 3);
        assert!(keymap.get("actions.edit.paste").is_some());
        assert!(keymap.get("actions.edit.cut").is_none());
        assert!(keymap.actions[0].has_binding("ctrl+insert"));
    }

    #[test]
    fn meta_fill_keeps_existing() {
        let mut meta = ActionMeta {
            comment: Some("mine".into()),
            ..Default::default()
        };
        meta.fill_from(&ActionMeta {
            comment: Some("theirs".into()),
            description: Some("Copy".into()),
            display_name: None,
        });
        assert_eq!(meta.comment.as_deref(), Some("mine"));
        assert_eq!(meta.description.as_deref(), Some("Copy"));
    }
}
