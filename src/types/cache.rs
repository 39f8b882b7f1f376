//! Cache bookkeeping types

use super::Pool;

/// Pools fetched for one token, stamped with the fetch time in ms
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub pools: Vec<Pool>,
    pub fetched_at_ms: u64,
}

impl CacheEntry {
    pub fn new(pools: Vec<Pool>, fetched_at_ms: u64) -> Self {
        Self { pools, fetched_at_ms }
    }

    pub fn is_fresh(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.fetched_at_ms) < ttl_ms
    }
}

/// Counters for monitoring cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub failed_fetches: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
