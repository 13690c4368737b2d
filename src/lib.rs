mod builder;
mod cache;
mod error;
mod metrics;
mod recency;
mod shared;
pub mod listener;

pub use builder::CacheBuilder;
pub use cache::LruCache;
pub use error::{CacheError, Result};
pub use metrics::stats::Metrics;
pub use shared::SharedCache;
