//! Pool cache configuration and environment variable handling

use alloy::primitives::Address;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use crate::types::{BALANCER_V2_SUBGRAPH_URL, BALANCER_VAULT};

// Configuration constants
pub const DEFAULT_POOL_CACHE_TTL_MS: u64 = 60_000;
pub const DEFAULT_SUBGRAPH_TIMEOUT_SECS: u64 = 10;
pub const MIN_SUBGRAPH_TIMEOUT_SECS: u64 = 1;
pub const MAX_SUBGRAPH_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub pool_cache_ttl_ms: u64,
    pub subgraph_url: String,
    pub subgraph_timeout_secs: u64,
    // Carried for the routing layer, the cache never touches it
    pub vault_address: Address,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_cache_ttl_ms: DEFAULT_POOL_CACHE_TTL_MS,
            subgraph_url: BALANCER_V2_SUBGRAPH_URL.to_string(),
            subgraph_timeout_secs: DEFAULT_SUBGRAPH_TIMEOUT_SECS,
            vault_address: BALANCER_VAULT,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults per key
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            pool_cache_ttl_ms: lookup("POOL_CACHE_TTL_MS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.pool_cache_ttl_ms),
            subgraph_url: lookup("BALANCER_SUBGRAPH_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.subgraph_url),
            subgraph_timeout_secs: lookup("SUBGRAPH_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.subgraph_timeout_secs)
                .max(MIN_SUBGRAPH_TIMEOUT_SECS)
                .min(MAX_SUBGRAPH_TIMEOUT_SECS),
            vault_address: lookup("BALANCER_VAULT_ADDRESS")
                .and_then(|s| Address::from_str(s.trim()).ok())
                .unwrap_or(defaults.vault_address),
        }
    }

    pub fn pool_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.pool_cache_ttl_ms)
    }

    pub fn subgraph_timeout(&self) -> Duration {
        Duration::from_secs(self.subgraph_timeout_secs)
    }
}
