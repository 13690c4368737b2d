use std::hash::Hash;

use crate::cache::LruCache;
use crate::error::Result;
use crate::listener::{EvictionCause, EvictionListener, FnListener};
use crate::shared::SharedCache;

/// Builder for configuring and constructing an [`LruCache`].
///
/// Nothing is validated until [`build`](CacheBuilder::build), so a zero
/// `max_cost` surfaces as an error there rather than a panic here.
///
/// # Example
/// ```
/// use lungo::CacheBuilder;
///
/// let cache: lungo::LruCache<String, Vec<u8>> = CacheBuilder::new(4096)
///     .initial_capacity(64)
///     .build()
///     .unwrap();
/// assert_eq!(cache.max_cost(), 4096);
/// ```
pub struct CacheBuilder<K, V> {
    max_cost: u64,
    initial_capacity: usize,
    listener: Option<Box<dyn EvictionListener<K, V>>>,
}

impl<K, V> CacheBuilder<K, V> {
    pub fn new(max_cost: u64) -> Self {
        CacheBuilder {
            max_cost,
            initial_capacity: 0,
            listener: None,
        }
    }

    /// Preallocate room for `n` entries (default: 0).
    pub fn initial_capacity(mut self, n: usize) -> Self {
        self.initial_capacity = n;
        self
    }

    /// Register an eviction listener closure.
    ///
    /// The closure is called **synchronously** each time an entry leaves the
    /// cache for any reason (capacity, explicit removal or purge).
    ///
    /// # Example
    /// ```
    /// use lungo::CacheBuilder;
    ///
    /// let cache: lungo::LruCache<u64, u64> = CacheBuilder::new(10)
    ///     .eviction_listener(|key: &u64, _val: &u64, cost, cause| {
    ///         println!("evicted key={key} cost={cost} cause={cause:?}");
    ///     })
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn eviction_listener<F>(mut self, f: F) -> Self
    where
        F: FnMut(&K, &V, u64, EvictionCause) + Send + 'static,
    {
        self.listener = Some(Box::new(FnListener(f)));
        self
    }

    /// Register an eviction listener via the [`EvictionListener`] trait.
    pub fn eviction_listener_impl<L: EvictionListener<K, V>>(mut self, l: L) -> Self {
        self.listener = Some(Box::new(l));
        self
    }
}

impl<K, V> CacheBuilder<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: 'static,
{
    pub fn build(self) -> Result<LruCache<K, V>> {
        LruCache::from_parts(self.max_cost, self.initial_capacity, self.listener)
    }

    /// Builds the cache and wraps it in a thread-safe [`SharedCache`].
    pub fn build_shared(self) -> Result<SharedCache<K, V>> {
        self.build().map(SharedCache::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    struct Counting(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    impl EvictionListener<u32, u32> for Counting {
        fn on_evict(&mut self, _key: &u32, _value: &u32, _cost: u64, _cause: EvictionCause) {
            self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    }

    #[test]
    fn build_rejects_zero_max_cost() {
        let err = CacheBuilder::<u32, u32>::new(0).build().unwrap_err();
        assert_eq!(err, CacheError::InvalidConfiguration { max_cost: 0 });
        assert!(CacheBuilder::<u32, u32>::new(0).build_shared().is_err());
    }

    #[test]
    fn trait_listener_is_wired_in() {
        let count = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut cache = CacheBuilder::new(2)
            .eviction_listener_impl(Counting(std::sync::Arc::clone(&count)))
            .build()
            .unwrap();
        for i in 0..5u32 {
            cache.add(i, i, 1).unwrap();
        }
        cache.purge();
        assert_eq!(count.load(std::sync::atomic::Ordering::Relaxed), 5);
    }
}
