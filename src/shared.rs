use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::LruCache;
use crate::error::Result;
use crate::metrics::stats::Metrics;

/// A thread-safe handle over an [`LruCache`].
///
/// Every call takes one exclusive lock for its whole duration, including
/// any listener invocations it triggers. Cloning the handle shares the same
/// cache.
///
/// # Example
/// ```
/// let cache: lungo::SharedCache<String, String> = lungo::CacheBuilder::new(100)
///     .build_shared()
///     .unwrap();
/// cache.add("hello".to_string(), "world".to_string(), 5).unwrap();
/// assert_eq!(cache.get(&"hello".to_string()), Some("world".to_string()));
/// ```
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        SharedCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: 'static,
{
    pub fn new(cache: LruCache<K, V>) -> Self {
        SharedCache {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// See [`LruCache::add`].
    pub fn add(&self, key: K, value: V, cost: u64) -> Result<usize> {
        self.inner.lock().add(key, value, cost)
    }

    /// Adds the entry only if `key` is absent, without promoting an existing one.
    ///
    /// Returns whether the key was already present and how many entries the
    /// add evicted.
    pub fn contains_or_add(&self, key: K, value: V, cost: u64) -> Result<(bool, usize)> {
        let mut cache = self.inner.lock();
        if cache.contains(&key) {
            return Ok((true, 0));
        }
        cache.add(key, value, cost).map(|evicted| (false, evicted))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn remove(&self, key: &K) -> bool {
        self.inner.lock().remove(key)
    }

    pub fn remove_oldest(&self) -> Option<(K, V)> {
        self.inner.lock().remove_oldest()
    }

    pub fn resize(&self, max_cost: u64) -> Result<usize> {
        self.inner.lock().resize(max_cost)
    }

    pub fn purge(&self) {
        self.inner.lock().purge()
    }

    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn cost(&self) -> u64 {
        self.inner.lock().cost()
    }

    pub fn max_cost(&self) -> u64 {
        self.inner.lock().max_cost()
    }

    pub fn stats(&self) -> Metrics {
        self.inner.lock().stats()
    }

    /// Runs `f` with exclusive access to the underlying cache, for compound
    /// operations that must not interleave with other callers.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    /// See [`LruCache::get`]. The value is cloned out under the lock.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    pub fn get_oldest(&self) -> Option<(K, V)> {
        self.inner
            .lock()
            .get_oldest()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Returns the current value for `key` without promoting it, or adds
    /// the entry if the key is absent.
    ///
    /// Returns the previous value (if any) and how many entries were evicted.
    pub fn peek_or_add(&self, key: K, value: V, cost: u64) -> Result<(Option<V>, usize)> {
        let mut cache = self.inner.lock();
        if let Some(previous) = cache.peek(&key) {
            return Ok((Some(previous.clone()), 0));
        }
        cache.add(key, value, cost).map(|evicted| (None, evicted))
    }
}
