//! Eviction listener — a callback invoked whenever an entry leaves the cache.
//!
//! # Example
//! ```
//! use lungo::CacheBuilder;
//! use lungo::listener::EvictionCause;
//! use std::sync::{Arc, Mutex};
//!
//! let log: Arc<Mutex<Vec<(u64, EvictionCause)>>> = Arc::new(Mutex::new(Vec::new()));
//! let log2 = Arc::clone(&log);
//!
//! let mut cache: lungo::LruCache<u64, u64> = CacheBuilder::new(2)
//!     .eviction_listener(move |key: &u64, _val: &u64, _cost, cause| {
//!         log2.lock().unwrap().push((*key, cause));
//!     })
//!     .build()
//!     .unwrap();
//!
//! cache.add(1, 10, 1).unwrap();
//! cache.add(2, 20, 1).unwrap();
//! cache.add(3, 30, 1).unwrap(); // capacity eviction of 1
//! cache.remove(&2); // explicit removal
//!
//! assert_eq!(
//!     *log.lock().unwrap(),
//!     vec![(1, EvictionCause::Capacity), (2, EvictionCause::Explicit)]
//! );
//! ```

// ---------------------------------------------------------------------------
// EvictionCause
// ---------------------------------------------------------------------------

/// The reason an entry left the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvictionCause {
    /// Removed to bring the total cost back under the ceiling, either while
    /// adding a new entry or after [`LruCache::resize`].
    ///
    /// [`LruCache::resize`]: crate::LruCache::resize
    Capacity,
    /// Removed on request via [`LruCache::remove`],
    /// [`LruCache::remove_oldest`] or [`LruCache::purge`].
    ///
    /// [`LruCache::remove`]: crate::LruCache::remove
    /// [`LruCache::remove_oldest`]: crate::LruCache::remove_oldest
    /// [`LruCache::purge`]: crate::LruCache::purge
    Explicit,
}

// ---------------------------------------------------------------------------
// EvictionListener trait
// ---------------------------------------------------------------------------

/// A callback invoked each time an entry leaves the cache, for any reason.
///
/// The callback receives the departing key, value and cost, plus the cause.
/// It runs synchronously inside the cache operation that removed the entry
/// and cannot veto the removal.
///
/// The `Send` bound lets a cache carrying a listener be moved behind a
/// [`SharedCache`](crate::SharedCache). **Do not call the same
/// `SharedCache` from inside the listener**: the handle's lock is held while
/// the listener runs and re-entering it would deadlock.
pub trait EvictionListener<K, V>: Send + 'static {
    fn on_evict(&mut self, key: &K, value: &V, cost: u64, cause: EvictionCause);
}

/// An [`EvictionListener`] backed by a closure.
///
/// Created via [`CacheBuilder::eviction_listener`](crate::CacheBuilder::eviction_listener).
pub struct FnListener<F>(pub F);

impl<K, V, F> EvictionListener<K, V> for FnListener<F>
where
    F: FnMut(&K, &V, u64, EvictionCause) + Send + 'static,
{
    fn on_evict(&mut self, key: &K, value: &V, cost: u64, cause: EvictionCause) {
        (self.0)(key, value, cost, cause)
    }
}
