use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A bijective map: every left value has exactly one right value and vice versa.
///
/// Alias tables that must round-trip (editor key names, private-use code points)
/// are declared once as a `BiMap` and queried in both directions.
#[derive(Debug, Clone)]
pub struct BiMap<L, R> {
    forward: HashMap<L, R>,
    inverse: HashMap<R, L>,
}

impl<L, R> BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            inverse: HashMap::new(),
        }
    }

    pub fn from_pairs<I: IntoIterator<Item = (L, R)>>(pairs: I) -> Self {
        let mut map = Self::new();
        for (left, right) in pairs {
            map.insert(left, right);
        }
        map
    }

    /// Inserts a pair, evicting any existing pair that shares either side.
    pub fn insert(&mut self, left: L, right: R) {
        if let Some(old_right) = self.forward.remove(&left) {
            self.inverse.remove(&old_right);
        }
        if let Some(old_left) = self.inverse.remove(&right) {
            self.forward.remove(&old_left);
        }
        self.forward.insert(left.clone(), right.clone());
        self.inverse.insert(right, left);
    }

    pub fn get<Q>(&self, left: &Q) -> Option<&R>
    where
        L: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.forward.get(left)
    }

    pub fn get_inverse<Q>(&self, right: &Q) -> Option<&L>
    where
        R: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inverse.get(right)
    }

    pub fn contains<Q>(&self, left: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.forward.contains_key(left)
    }

    pub fn contains_inverse<Q>(&self, right: &Q) -> bool
    where
        R: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inverse.contains_key(right)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl<L, R> Default for BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_both_directions() {
        let map = BiMap::from_pairs([("OPEN_BRACKET", "["), ("F5", "f5")]);
        assert_eq!(map.get(&"OPEN_BRACKET"), Some(&"["));
        assert_eq!(map.get_inverse(&"f5"), Some(&"F5"));
        assert_eq!(map.get(&"MISSING"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn reinsert_keeps_bijection() {
        let mut map = BiMap::new();
        map.insert(1u32, "a");
        map.insert(1u32, "b");
        assert_eq!(map.get_inverse(&"a"), None);
        assert_eq!(map.get(&1), Some(&"b"));

        map.insert(2u32, "b");
        assert_eq!(map.get(&1), None);
        assert_eq!(map.get_inverse(&"b"), Some(&2));
        assert_eq!(map.len(), 1);
    }
}
