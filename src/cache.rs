use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;

use crate::builder::CacheBuilder;
use crate::error::{CacheError, Result};
use crate::listener::{EvictionCause, EvictionListener};
use crate::metrics::stats::{Metrics, StatsCounter};
use crate::recency::{Entry, RecencyList};

/// A cost-bounded LRU cache.
///
/// Every entry carries a caller-assigned cost fixed at insertion. Once the
/// sum of costs exceeds `max_cost`, the least-recently-used entries are
/// evicted until it fits again. `add` and `get` count as a use; `peek`,
/// `contains` and `get_oldest` do not.
///
/// The cache is a plain single-threaded data structure. Wrap it in a
/// [`SharedCache`](crate::SharedCache) to share it across threads.
///
/// # Example
/// ```
/// let mut cache: lungo::LruCache<&str, u32> = lungo::LruCache::new(10).unwrap();
/// cache.add("a", 1, 6).unwrap();
/// cache.add("b", 2, 3).unwrap();
/// assert_eq!(cache.get(&"a"), Some(&1)); // "b" is now the oldest
///
/// assert_eq!(cache.add("c", 3, 4).unwrap(), 1);
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.cost(), 10);
/// ```
pub struct LruCache<K, V> {
    list: RecencyList<K, V>,
    /// Maps a key to its slot in `list`.
    index: AHashMap<K, usize>,
    total_cost: u64,
    max_cost: u64,
    listener: Option<Box<dyn EvictionListener<K, V>>>,
    metrics: StatsCounter,
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.list.len())
            .field("cost", &self.total_cost)
            .field("max_cost", &self.max_cost)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: 'static,
{
    /// Creates an empty cache with no eviction listener.
    ///
    /// Fails with [`CacheError::InvalidConfiguration`] if `max_cost` is zero.
    pub fn new(max_cost: u64) -> Result<Self> {
        Self::from_parts(max_cost, 0, None)
    }

    /// Creates an empty cache that reports every departing entry to `listener`.
    pub fn with_listener<L: EvictionListener<K, V>>(max_cost: u64, listener: L) -> Result<Self> {
        Self::from_parts(max_cost, 0, Some(Box::new(listener)))
    }

    /// Returns a [`CacheBuilder`] for constructing a new cache.
    pub fn builder(max_cost: u64) -> CacheBuilder<K, V> {
        CacheBuilder::new(max_cost)
    }

    pub(crate) fn from_parts(
        max_cost: u64,
        initial_capacity: usize,
        listener: Option<Box<dyn EvictionListener<K, V>>>,
    ) -> Result<Self> {
        if max_cost == 0 {
            return Err(CacheError::InvalidConfiguration { max_cost });
        }
        Ok(LruCache {
            list: RecencyList::with_capacity(initial_capacity),
            index: AHashMap::with_capacity(initial_capacity),
            total_cost: 0,
            max_cost,
            listener,
            metrics: StatsCounter::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Adds `value` under `key` and returns how many entries were evicted.
    ///
    /// If `key` is already resident its value is replaced and it becomes the
    /// most recently used entry. Its cost is left as it was, so re-adding
    /// never evicts. A new key whose `cost` exceeds `max_cost` is rejected
    /// with [`CacheError::OversizedEntry`] and the cache is left untouched.
    pub fn add(&mut self, key: K, value: V, cost: u64) -> Result<usize> {
        if let Some(&idx) = self.index.get(&key) {
            self.list.move_to_front(idx);
            if let Some(entry) = self.list.get_mut(idx) {
                entry.value = value;
            }
            return Ok(0);
        }

        if cost > self.max_cost {
            tracing::warn!(cost, max_cost = self.max_cost, "rejecting oversized cache entry");
            return Err(CacheError::OversizedEntry {
                cost,
                max_cost: self.max_cost,
            });
        }

        // Make room first so `total_cost + cost` never exceeds `max_cost`.
        let evicted = self.evict_until(self.max_cost - cost);
        let idx = self.list.push_front(Entry {
            key: key.clone(),
            value,
            cost,
        });
        self.index.insert(key, idx);
        self.total_cost += cost;

        Ok(evicted)
    }

    /// Removes `key` if present. Other entries keep their order.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&idx) => self.remove_slot(idx, EvictionCause::Explicit).is_some(),
            None => false,
        }
    }

    /// Removes and returns the least-recently-used entry.
    pub fn remove_oldest(&mut self) -> Option<(K, V)> {
        let idx = self.list.back()?;
        self.remove_slot(idx, EvictionCause::Explicit)
            .map(|entry| (entry.key, entry.value))
    }

    /// Changes the cost ceiling and returns how many entries were evicted to
    /// honour it. Raising the ceiling never evicts.
    ///
    /// A zero ceiling is rejected with [`CacheError::InvalidConfiguration`]
    /// and leaves the cache untouched.
    pub fn resize(&mut self, max_cost: u64) -> Result<usize> {
        if max_cost == 0 {
            return Err(CacheError::InvalidConfiguration { max_cost });
        }
        let old_max_cost = self.max_cost;
        self.max_cost = max_cost;
        let evicted = self.evict_until(max_cost);
        tracing::debug!(old_max_cost, max_cost, evicted, "resized cache");
        Ok(evicted)
    }

    /// Removes every entry, notifying the listener once per entry.
    ///
    /// Notification order is unspecified.
    pub fn purge(&mut self) {
        // Detach everything before notifying, so a panicking listener still
        // leaves an empty, consistent cache. Order follows the index, not recency.
        let index = std::mem::take(&mut self.index);
        let entries: Vec<Entry<K, V>> = index
            .into_iter()
            .filter_map(|(_, idx)| self.list.remove(idx))
            .collect();
        self.list.clear();
        self.total_cost = 0;
        tracing::debug!(count = entries.len(), "purged cache");

        if let Some(listener) = self.listener.as_mut() {
            for entry in &entries {
                listener.on_evict(&entry.key, &entry.value, entry.cost, EvictionCause::Explicit);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Returns the value for `key`, marking it as most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&idx) = self.index.get(key) else {
            self.metrics.record_miss();
            return None;
        };
        self.metrics.record_hit();
        self.list.move_to_front(idx);
        self.list.get(idx).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without touching recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &idx = self.index.get(key)?;
        self.list.get(idx).map(|entry| &entry.value)
    }

    /// Checks for `key` without touching recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the least-recently-used entry without removing or promoting it.
    pub fn get_oldest(&self) -> Option<(&K, &V)> {
        let idx = self.list.back()?;
        self.list.get(idx).map(|entry| (&entry.key, &entry.value))
    }

    /// Snapshot of the resident keys, oldest first.
    pub fn keys(&self) -> Vec<K> {
        self.list
            .iter_oldest_first()
            .map(|entry| entry.key.clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Sum of the costs of all resident entries.
    pub fn cost(&self) -> u64 {
        self.total_cost
    }

    pub fn max_cost(&self) -> u64 {
        self.max_cost
    }

    pub fn stats(&self) -> Metrics {
        self.metrics.snapshot()
    }

    pub fn reset_stats(&mut self) {
        self.metrics.reset();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Evicts from the back until `total_cost <= limit`.
    fn evict_until(&mut self, limit: u64) -> usize {
        let mut evicted = 0;
        while self.total_cost > limit {
            let Some(idx) = self.list.back() else { break };
            let Some(entry) = self.remove_slot(idx, EvictionCause::Capacity) else { break };
            tracing::trace!(cost = entry.cost, total_cost = self.total_cost, "evicted cache entry");
            evicted += 1;
        }
        self.metrics.record_eviction(evicted as u64);
        evicted
    }

    /// Unlinks `idx`, drops it from the index and the accumulator, then
    /// fires the listener.
    fn remove_slot(&mut self, idx: usize, cause: EvictionCause) -> Option<Entry<K, V>> {
        let entry = self.list.remove(idx)?;
        self.index.remove(&entry.key);
        self.total_cost -= entry.cost;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_evict(&entry.key, &entry.value, entry.cost, cause);
        }
        Some(entry)
    }
}
