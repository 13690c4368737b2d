/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors reported by [`LruCache`](crate::LruCache).
///
/// Both variants describe a broken caller contract rather than a transient
/// condition, so retrying the same call never succeeds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CacheError {
    /// The cost ceiling passed to construction or `resize` was zero.
    #[error("max cost must be positive, got {max_cost}")]
    InvalidConfiguration { max_cost: u64 },

    /// A new entry costs more than the whole cache may hold.
    #[error("cost {cost} is bigger than max cost {max_cost}")]
    OversizedEntry { cost: u64, max_cost: u64 },
}
