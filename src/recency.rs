/// Sentinel indices in the `slots` arena.
const HEAD: usize = 0; // most-recently-used end
const TAIL: usize = 1; // least-recently-used end
const NULL: usize = usize::MAX;

/// A resident cache entry.
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) cost: u64,
}

struct Slot<K, V> {
    /// `None` for the HEAD and TAIL sentinels and for freed slots.
    entry: Option<Entry<K, V>>,
    /// Index toward HEAD (more recently used).
    prev: usize,
    /// Index toward TAIL (less recently used).
    next: usize,
}

impl<K, V> Slot<K, V> {
    fn sentinel(prev: usize, next: usize) -> Self {
        Slot {
            entry: None,
            prev,
            next,
        }
    }
}

/// Recency order backed by an index-arena doubly-linked list.
///
/// Slots are stored in a `Vec` and linked by index, so the key index can
/// hold plain `usize` handles instead of shared pointers. Every operation
/// is O(1); freed slots are recycled through `free_list`.
pub(crate) struct RecencyList<K, V> {
    /// Index 0 = HEAD sentinel, 1 = TAIL sentinel, 2+ = real entries.
    slots: Vec<Slot<K, V>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 2);
        slots.push(Slot::sentinel(NULL, TAIL));
        slots.push(Slot::sentinel(HEAD, NULL));
        RecencyList {
            slots,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Links `idx` immediately after the HEAD sentinel.
    fn link_after_head(&mut self, idx: usize) {
        let old_first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = old_first;
        self.slots[HEAD].next = idx;
        self.slots[old_first].prev = idx;
    }

    /// Detaches `idx` from its current position.
    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
        self.slots[idx].prev = NULL;
        self.slots[idx].next = NULL;
    }

    /// Stores `entry` as the most-recently-used element and returns its handle.
    pub(crate) fn push_front(&mut self, entry: Entry<K, V>) -> usize {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx].entry = Some(entry);
                idx
            }
            None => {
                self.slots.push(Slot {
                    entry: Some(entry),
                    prev: NULL,
                    next: NULL,
                });
                self.slots.len() - 1
            }
        };
        self.link_after_head(idx);
        self.len += 1;
        idx
    }

    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.slots[HEAD].next == idx {
            return;
        }
        self.unlink(idx);
        self.link_after_head(idx);
    }

    /// Unlinks `idx` and hands back its entry. The slot goes onto the free list.
    ///
    /// Returns `None` for sentinels and already-freed slots.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<Entry<K, V>> {
        let entry = self.slots.get_mut(idx)?.entry.take()?;
        self.unlink(idx);
        self.free_list.push(idx);
        self.len -= 1;
        Some(entry)
    }

    /// Handle of the least-recently-used entry.
    pub(crate) fn back(&self) -> Option<usize> {
        let idx = self.slots[TAIL].prev;
        (idx != HEAD).then_some(idx)
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.slots.get(idx)?.entry.as_ref()
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(idx)?.entry.as_mut()
    }

    /// Walks from the back (oldest) to the front (newest).
    pub(crate) fn iter_oldest_first(&self) -> OldestFirst<'_, K, V> {
        OldestFirst {
            list: self,
            cursor: self.slots[TAIL].prev,
        }
    }

    /// Drops every entry and shrinks the arena back to the two sentinels.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD].next = TAIL;
        self.slots[TAIL].prev = HEAD;
        self.free_list.clear();
        self.len = 0;
    }
}

pub(crate) struct OldestFirst<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: usize,
}

impl<'a, K, V> Iterator for OldestFirst<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == HEAD {
            return None;
        }
        let slot = &self.list.slots[self.cursor];
        self.cursor = slot.prev;
        slot.entry.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &'static str, cost: u64) -> Entry<&'static str, ()> {
        Entry {
            key,
            value: (),
            cost,
        }
    }

    fn keys(list: &RecencyList<&'static str, ()>) -> Vec<&'static str> {
        list.iter_oldest_first().map(|e| e.key).collect()
    }

    #[test]
    fn push_front_orders_newest_last() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front(entry("a", 1));
        list.push_front(entry("b", 1));
        list.push_front(entry("c", 1));
        assert_eq!(keys(&list), vec!["a", "b", "c"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn move_to_front_promotes() {
        let mut list = RecencyList::with_capacity(4);
        let a = list.push_front(entry("a", 1));
        list.push_front(entry("b", 1));
        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["b", "a"]);
        assert_eq!(list.get(list.back().unwrap()).unwrap().key, "b");
    }

    #[test]
    fn removed_slot_is_reused() {
        let mut list = RecencyList::with_capacity(4);
        let a = list.push_front(entry("a", 1));
        list.push_front(entry("b", 1));
        assert_eq!(list.remove(a).map(|e| e.key), Some("a"));
        assert!(list.remove(a).is_none(), "double remove must be a no-op");
        let c = list.push_front(entry("c", 1));
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["b", "c"]);
    }

    #[test]
    fn sentinels_cannot_be_removed() {
        let mut list: RecencyList<&'static str, ()> = RecencyList::with_capacity(0);
        assert!(list.remove(HEAD).is_none());
        assert!(list.remove(TAIL).is_none());
        assert!(list.back().is_none());
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front(entry("a", 1));
        list.push_front(entry("b", 1));
        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.back().is_none());
        list.push_front(entry("c", 1));
        assert_eq!(keys(&list), vec!["c"]);
    }
}
