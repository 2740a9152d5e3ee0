//! Helpers shared by the non-destructive exporters.

use std::collections::HashMap;
use std::hash::Hash;

use onekeymap_keymap::Keybinding;

/// Comparable identity of an editor key string: the signature of the parsed
/// binding, or the text itself when it does not parse.
///
/// Keys that differ only in case or modifier order share an identity.
pub fn key_identity<E>(key: &str, parse: impl FnOnce(&str) -> Result<Keybinding, E>) -> String {
    parse(key)
        .map(|binding| binding.signature())
        .unwrap_or_else(|_| key.to_string())
}

/// First-seen position of each key in `base`.
pub fn first_seen_order<K, I>(base: I) -> HashMap<K, usize>
where
    K: Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let mut order = HashMap::new();
    for key in base {
        let next = order.len();
        order.entry(key).or_insert(next);
    }
    order
}

/// Reorders `items` by the rank `rank_of` assigns them, usually a position
/// from [`first_seen_order`].
///
/// Only ranked items move, and only among the slots ranked items already
/// occupy; every unranked item keeps its exact position. The sort is stable,
/// so items of equal rank keep their relative order.
pub fn order_by_base<T, F>(items: &mut Vec<T>, rank_of: F)
where
    F: Fn(&T) -> Option<usize>,
{
    if items.is_empty() {
        return;
    }

    let mut slots = Vec::new();
    let mut ranked = Vec::new();
    let mut rest = Vec::with_capacity(items.len());
    for (index, item) in std::mem::take(items).into_iter().enumerate() {
        match rank_of(&item) {
            Some(rank) => {
                slots.push(index);
                ranked.push((rank, item));
            }
            None => rest.push((index, item)),
        }
    }
    ranked.sort_by_key(|(rank, _)| *rank);

    let mut placed: Vec<(usize, T)> = slots
        .into_iter()
        .zip(ranked.into_iter().map(|(_, item)| item))
        .chain(rest)
        .collect();
    placed.sort_by_key(|(index, _)| *index);
    items.extend(placed.into_iter().map(|(_, item)| item));
}
