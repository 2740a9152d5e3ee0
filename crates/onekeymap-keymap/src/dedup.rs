//! Collapsing of repeated actions and bindings within one keymap.

use indexmap::IndexMap;

use crate::keybinding::Keybinding;
use crate::keymap::{Action, Keymap};

/// A binding counts only when every chord renders to a non-empty string.
pub(crate) fn is_valid_binding(binding: &Keybinding) -> bool {
    !binding.is_empty()
        && binding
            .chords()
            .iter()
            .all(|chord| !chord.format_with(crate::ChordFormat::CANONICAL).is_empty())
}

/// Appends `incoming` bindings whose signature `bindings` does not already hold.
pub fn union_bindings(bindings: &mut Vec<Keybinding>, incoming: &[Keybinding]) {
    for binding in incoming {
        if !is_valid_binding(binding) {
            continue;
        }
        let signature = binding.signature();
        if !bindings.iter().any(|existing| existing.signature() == signature) {
            bindings.push(binding.clone());
        }
    }
}

/// Merges actions by name and drops repeated bindings.
///
/// First-seen order wins for both actions and bindings. An action whose
/// bindings were all invalid is removed; an action that never had bindings
/// is kept.
pub fn dedup_actions(actions: Vec<Action>) -> Vec<Action> {
    let mut merged: IndexMap<String, Action> = IndexMap::with_capacity(actions.len());

    for action in actions {
        if let Some(existing) = merged.get_mut(&action.name) {
            union_bindings(&mut existing.bindings, &action.bindings);
            existing.meta.fill_from(&action.meta);
            continue;
        }

        let had_bindings = !action.bindings.is_empty();
        let mut fresh = Action {
            name: action.name,
            bindings: Vec::with_capacity(action.bindings.len()),
            meta: action.meta,
        };
        union_bindings(&mut fresh.bindings, &action.bindings);
        if had_bindings && fresh.bindings.is_empty() {
            continue;
        }
        merged.insert(fresh.name.clone(), fresh);
    }

    merged.into_values().collect()
}

/// [`dedup_actions`] over a whole keymap.
pub fn dedup_keymap(keymap: Keymap) -> Keymap {
    Keymap::new(dedup_actions(keymap.actions))
}

/// Stable identity of an action and its binding set.
///
/// Signatures are sorted and NUL-terminated so that binding order does not
/// matter and names cannot run into bindings.
pub fn pair_key(action: &Action) -> String {
    let mut signatures: Vec<String> = action
        .bindings
        .iter()
        .filter(|binding| is_valid_binding(binding))
        .map(Keybinding::signature)
        .collect();
    signatures.sort();

    let mut key = format!("{}\0", action.name);
    for signature in signatures {
        key.push_str(&signature);
        key.push('\0');
    }
    key
}
