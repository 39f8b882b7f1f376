//! Read-through TTL cache over the pool subgraph
//!
//! Failures never reach the caller: a token whose lookup fails simply has no
//! pools, and nothing is cached so the next call asks the subgraph again.

use alloy::primitives::Address;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use crate::{
    config::Config,
    errors::PoolResult,
    network::{HttpSubgraphClient, SubgraphClient},
    pools::{clock::{Clock, SystemClock}, pairs::shared_pools},
    types::{CacheEntry, CacheStats, Pool},
    utils::{lowercase_hex, parse_token_address},
};

pub struct PoolCache<C, K = SystemClock> {
    client: C,
    clock: K,
    ttl_ms: u64,
    entries: RwLock<HashMap<Address, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    failed_fetches: AtomicU64,
}

impl PoolCache<HttpSubgraphClient, SystemClock> {
    pub fn from_config(config: &Config) -> PoolResult<Self> {
        let client = HttpSubgraphClient::from_config(config)?;
        info!(
            endpoint = %config.subgraph_url,
            ttl_ms = config.pool_cache_ttl_ms,
            "Pool cache ready"
        );
        Ok(Self::new(client, SystemClock, config.pool_cache_ttl()))
    }
}

impl<C, K> PoolCache<C, K>
where
    C: SubgraphClient,
    K: Clock,
{
    pub fn new(client: C, clock: K, ttl: Duration) -> Self {
        Self {
            client,
            clock,
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            failed_fetches: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Pools containing `token`, served from cache while the entry is fresh
    pub async fn fetch_pools_for_token(&self, token: Address) -> Vec<Pool> {
        let now = self.clock.now_ms();
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&token) {
                if entry.is_fresh(now, self.ttl_ms) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(token = %lowercase_hex(token), pools = entry.pools.len(), "Pool cache hit");
                    return entry.pools.clone();
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(token = %lowercase_hex(token), "Pool cache miss, querying subgraph");

        match self.client.query_pools(token).await {
            Ok(pools) => {
                let entry = CacheEntry::new(pools.clone(), self.clock.now_ms());
                self.entries.write().await.insert(token, entry);
                pools
            }
            Err(e) => {
                self.failed_fetches.fetch_add(1, Ordering::Relaxed);
                warn!("⚠️ Pool lookup for {} failed, treating as no pools: {}", lowercase_hex(token), e);
                Vec::new()
            }
        }
    }

    /// Same as [`fetch_pools_for_token`](Self::fetch_pools_for_token) for a hex string
    pub async fn fetch_pools_for_token_str(&self, token: &str) -> Vec<Pool> {
        match parse_token_address(token) {
            Ok(address) => self.fetch_pools_for_token(address).await,
            Err(e) => {
                warn!("⚠️ {}", e);
                Vec::new()
            }
        }
    }

    /// Pools that can route a swap between `token_a` and `token_b`
    pub async fn find_pools_for_pair(&self, token_a: Address, token_b: Address) -> Vec<Pool> {
        let (pools_a, pools_b) = tokio::join!(
            self.fetch_pools_for_token(token_a),
            self.fetch_pools_for_token(token_b),
        );

        if pools_a.is_empty() || pools_b.is_empty() {
            return Vec::new();
        }

        let shared = shared_pools(&pools_a, token_b);
        debug!(
            token_a = %lowercase_hex(token_a),
            token_b = %lowercase_hex(token_b),
            shared = shared.len(),
            "Pair lookup complete"
        );
        shared
    }

    pub async fn clear_pool_cache(&self) {
        let mut entries = self.entries.write().await;
        if !entries.is_empty() {
            info!("Clearing {} pool cache entries", entries.len());
        }
        entries.clear();
    }

    /// Entries currently held, stale ones included
    pub async fn cached_tokens(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            failed_fetches: self.failed_fetches.load(Ordering::Relaxed),
            entries: self.cached_tokens().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PoolError;
    use crate::pools::{clock::ManualClock, pairs::fixtures::pool};
    use alloy::primitives::address;
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    const TTL: Duration = Duration::from_millis(60_000);

    #[derive(Default)]
    struct MockSubgraph {
        pools: HashMap<Address, Vec<Pool>>,
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl MockSubgraph {
        fn with(entries: Vec<(Address, Vec<Pool>)>) -> Self {
            Self {
                pools: entries.into_iter().collect(),
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    impl SubgraphClient for MockSubgraph {
        async fn query_pools(&self, token: Address) -> PoolResult<Vec<Pool>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Suspend like a real request so concurrent lookups interleave
            tokio::task::yield_now().await;
            if self.failing.load(Ordering::SeqCst) {
                return Err(PoolError::HttpStatus { status: 503, body: "unavailable".to_string() });
            }
            Ok(self.pools.get(&token).cloned().unwrap_or_default())
        }
    }

    fn addr(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    fn cache_with(entries: Vec<(Address, Vec<Pool>)>) -> PoolCache<MockSubgraph, ManualClock> {
        PoolCache::new(MockSubgraph::with(entries), ManualClock::new(1_000_000), TTL)
    }

    fn ids(pools: &[Pool]) -> Vec<&str> {
        pools.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn second_lookup_within_ttl_is_served_from_cache() {
        let cache = cache_with(vec![(addr(1), vec![pool("p1", &[addr(1), addr(2)])])]);

        let first = cache.fetch_pools_for_token(addr(1)).await;
        cache.clock().advance(Duration::from_millis(59_999));
        let second = cache.fetch_pools_for_token(addr(1)).await;

        assert_eq!(first, second);
        assert_eq!(cache.client().calls(), 1);
        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let cache = cache_with(vec![(addr(1), vec![pool("p1", &[addr(1), addr(2)])])]);

        cache.fetch_pools_for_token(addr(1)).await;
        cache.clock().advance(TTL);
        cache.fetch_pools_for_token(addr(1)).await;

        assert_eq!(cache.client().calls(), 2);
        assert_eq!(cache.cached_tokens().await, 1);
    }

    #[tokio::test]
    async fn address_case_shares_one_entry() {
        let token = address!("00000000000000000000000000000000000000ab");
        let cache = cache_with(vec![(token, vec![pool("p1", &[token, addr(2)])])]);

        let upper = cache.fetch_pools_for_token_str("0x00000000000000000000000000000000000000AB").await;
        let lower = cache.fetch_pools_for_token_str("0x00000000000000000000000000000000000000ab").await;

        assert_eq!(ids(&upper), vec!["p1"]);
        assert_eq!(upper, lower);
        assert_eq!(cache.client().calls(), 1);
    }

    #[tokio::test]
    async fn failure_returns_empty_and_is_not_cached() {
        let cache = cache_with(vec![(addr(1), vec![pool("p1", &[addr(1), addr(2)])])]);
        cache.client().set_failing(true);

        assert!(cache.fetch_pools_for_token(addr(1)).await.is_empty());
        assert_eq!(cache.cached_tokens().await, 0);

        cache.client().set_failing(false);
        assert_eq!(ids(&cache.fetch_pools_for_token(addr(1)).await), vec!["p1"]);
        assert_eq!(cache.client().calls(), 2);
        assert_eq!(cache.stats().await.failed_fetches, 1);
    }

    #[tokio::test]
    async fn empty_result_is_cached() {
        let cache = cache_with(Vec::new());

        assert!(cache.fetch_pools_for_token(addr(7)).await.is_empty());
        assert!(cache.fetch_pools_for_token(addr(7)).await.is_empty());

        assert_eq!(cache.client().calls(), 1);
    }

    #[tokio::test]
    async fn unparsable_address_returns_empty_without_query() {
        let cache = cache_with(Vec::new());
        assert!(cache.fetch_pools_for_token_str("0x456").await.is_empty());
        assert_eq!(cache.client().calls(), 0);
    }

    #[tokio::test]
    async fn pair_lookup_returns_intersection() {
        let (a, b) = (addr(0xa), addr(0xb));
        let p1 = pool("p1", &[a, addr(3)]);
        let p2 = pool("p2", &[a, b]);
        let p3 = pool("p3", &[b, addr(4)]);
        let cache = cache_with(vec![(a, vec![p1, p2.clone()]), (b, vec![p2, p3])]);

        let shared = cache.find_pools_for_pair(a, b).await;

        assert_eq!(ids(&shared), vec!["p2"]);
    }

    #[tokio::test]
    async fn pair_lookup_scenario_keeps_only_common_pool() {
        let t456 = address!("0000000000000000000000000000000000000456");
        let t789 = address!("0000000000000000000000000000000000000789");
        let taaa = address!("0000000000000000000000000000000000000aaa");
        let pool1 = pool("pool1", &[t456, t789]);
        let pool2 = pool("pool2", &[t789, taaa]);
        let cache = cache_with(vec![(t456, vec![pool1.clone()]), (t789, vec![pool1, pool2])]);

        let shared = cache.find_pools_for_pair(t456, t789).await;

        assert_eq!(ids(&shared), vec!["pool1"]);
    }

    #[tokio::test]
    async fn pair_lookup_is_empty_when_one_side_has_no_pools() {
        let (a, b) = (addr(0xa), addr(0xb));
        let cache = cache_with(vec![(a, vec![pool("p1", &[a, b])])]);

        assert!(cache.find_pools_for_pair(a, b).await.is_empty());
    }

    #[tokio::test]
    async fn pair_lookup_is_empty_on_failure() {
        let (a, b) = (addr(0xa), addr(0xb));
        let cache = cache_with(vec![(a, vec![pool("p1", &[a, b])]), (b, vec![pool("p1", &[a, b])])]);
        cache.client().set_failing(true);

        assert!(cache.find_pools_for_pair(a, b).await.is_empty());
    }

    #[tokio::test]
    async fn pair_lookup_reuses_cached_lists() {
        let (a, b) = (addr(0xa), addr(0xb));
        let shared = pool("p1", &[a, b]);
        let cache = cache_with(vec![(a, vec![shared.clone()]), (b, vec![shared])]);

        cache.find_pools_for_pair(a, b).await;
        cache.find_pools_for_pair(b, a).await;

        assert_eq!(cache.client().calls(), 2);
    }

    #[tokio::test]
    async fn clear_forces_fresh_query() {
        let cache = cache_with(vec![(addr(1), vec![pool("p1", &[addr(1), addr(2)])])]);

        cache.fetch_pools_for_token(addr(1)).await;
        cache.clear_pool_cache().await;
        assert_eq!(cache.cached_tokens().await, 0);
        cache.fetch_pools_for_token(addr(1)).await;

        assert_eq!(cache.client().calls(), 2);
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let cache = cache_with(Vec::new());
        cache.clear_pool_cache().await;
        cache.clear_pool_cache().await;
        assert_eq!(cache.stats().await, CacheStats::default());
    }

    #[tokio::test]
    async fn concurrent_misses_on_one_token_leave_one_entry() {
        let cache = cache_with(vec![(addr(1), vec![pool("p1", &[addr(1), addr(2)])])]);

        let (first, second) = tokio::join!(
            cache.fetch_pools_for_token(addr(1)),
            cache.fetch_pools_for_token(addr(1)),
        );

        assert_eq!(ids(&first), vec!["p1"]);
        assert_eq!(first, second);
        assert_eq!(cache.cached_tokens().await, 1);
        assert!((1..=2).contains(&cache.client().calls()));

        // Whichever write landed last, the entry now serves hits
        cache.fetch_pools_for_token(addr(1)).await;
        assert!(cache.client().calls() <= 2);
        assert!(cache.stats().await.hits >= 1);
    }

    #[tokio::test]
    async fn self_pair_returns_every_pool_of_the_token() {
        let a = addr(0xa);
        let cache = cache_with(vec![(a, vec![pool("p1", &[a, addr(2)]), pool("p2", &[addr(3), a])])]);

        let shared = cache.find_pools_for_pair(a, a).await;

        assert_eq!(ids(&shared), vec!["p1", "p2"]);
        assert_eq!(cache.cached_tokens().await, 1);
        assert!((1..=2).contains(&cache.client().calls()));
    }

    #[test]
    fn ttl_round_trips_through_millis() {
        let cache = cache_with(Vec::new());
        assert_eq!(cache.ttl(), TTL);
    }

    #[tokio::test]
    async fn oversized_ttl_saturates_and_keeps_entries_fresh() {
        let cache = PoolCache::new(
            MockSubgraph::with(vec![(addr(1), vec![pool("p1", &[addr(1), addr(2)])])]),
            ManualClock::new(0),
            Duration::MAX,
        );
        assert_eq!(cache.ttl(), Duration::from_millis(u64::MAX));

        cache.fetch_pools_for_token(addr(1)).await;
        cache.clock().advance(Duration::from_secs(365 * 24 * 3600));
        cache.fetch_pools_for_token(addr(1)).await;

        assert_eq!(cache.client().calls(), 1);
    }
}
