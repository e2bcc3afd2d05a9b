use slotmap::{Key, SlotMap};

/// Slot map that also remembers insertion order.
///
/// Lookups go through generation-tagged keys; iteration follows the order in
/// which entries were first sighted so that "first seen wins" tie-breaks are
/// stable.
#[derive(Clone, Debug)]
pub struct Tracked<K: Key, V> {
    slots: SlotMap<K, V>,
    order: Vec<K>,
}

impl<K: Key, V> Default for Tracked<K, V> {
    fn default() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }
}

impl<K: Key, V> Tracked<K, V> {
    pub fn insert(&mut self, value: V) -> K {
        let key = self.slots.insert(value);
        self.order.push(key);
        key
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.slots.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(value)
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key)
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.order.iter().filter_map(|key| self.slots.get(*key).map(|value| (*key, value)))
    }

    /// Mutable access in arbitrary order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.values_mut()
    }

    pub fn find(&self, mut predicate: impl FnMut(&V) -> bool) -> Option<K> {
        self.iter().find(|(_, value)| predicate(value)).map(|(key, _)| key)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(K, &mut V) -> bool) {
        self.slots.retain(|key, value| keep(key, value));
        let slots = &self.slots;
        self.order.retain(|key| slots.contains_key(*key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    slotmap::new_key_type! { struct TestKey; }

    #[test]
    fn iteration_follows_insertion_order_after_removal() {
        let mut tracked: Tracked<TestKey, &str> = Tracked::default();
        let a = tracked.insert("a");
        tracked.insert("b");
        tracked.insert("c");
        tracked.remove(a);
        tracked.insert("d");

        let values: Vec<_> = tracked.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, ["b", "c", "d"]);
        assert!(!tracked.contains_key(a));
    }

    #[test]
    fn retain_keeps_order_consistent() {
        let mut tracked: Tracked<TestKey, u32> = Tracked::default();
        for value in 0..6 {
            tracked.insert(value);
        }
        tracked.retain(|_, value| *value % 2 == 0);

        let values: Vec<_> = tracked.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, [0, 2, 4]);
        assert_eq!(tracked.len(), 3);
    }
}
