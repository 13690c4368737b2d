/// Counters updated by the cache on every lookup and eviction.
///
/// The cache already requires `&mut self` for anything that records, so
/// plain integers suffice here.
#[derive(Debug, Default)]
pub struct StatsCounter {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl StatsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self, count: u64) {
        self.evictions += count;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns a point-in-time snapshot of the statistics.
    pub fn snapshot(&self) -> Metrics {
        let total = self.hits + self.misses;
        let hit_rate = if total == 0 {
            0.0_f64
        } else {
            self.hits as f64 / total as f64
        };
        Metrics {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            hit_rate,
        }
    }
}

/// A point-in-time snapshot of cache statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Number of `get` calls that found their key.
    pub hits: u64,
    /// Number of `get` calls that did not.
    pub misses: u64,
    /// Number of entries evicted due to cost pressure.
    pub evictions: u64,
    /// `hits / (hits + misses)`, or `0.0` if no lookups have been made.
    pub hit_rate: f64,
}

impl Metrics {
    pub fn request_count(&self) -> u64 {
        self.hits + self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counter_has_zero_hit_rate() {
        let stats = StatsCounter::new().snapshot();
        assert_eq!(stats.request_count(), 0);
        assert_eq!(stats.hit_rate, 0.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut counter = StatsCounter::new();
        counter.record_hit();
        counter.record_miss();
        counter.record_eviction(3);
        assert_eq!(counter.snapshot().evictions, 3);
        counter.reset();
        assert_eq!(counter.snapshot(), StatsCounter::new().snapshot());
    }
}
