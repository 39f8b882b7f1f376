//! SHAH Pools - Balancer pool discovery for the SHAH Wallet backend
//!
//! Wraps a Balancer V2 subgraph behind a short-TTL read-through cache and
//! derives the pools usable for routing a swap between two tokens.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod pools;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{PoolError, PoolResult};
pub use network::{HttpSubgraphClient, SubgraphClient};
pub use pools::{Clock, ManualClock, PoolCache, SystemClock};
pub use types::*;

/// Pool cache wired to the live subgraph and the wall clock
pub type ConcretePoolCache = PoolCache<HttpSubgraphClient, SystemClock>;
