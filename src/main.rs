//! SHAH Pools - Main Entry Point
//!
//! Looks up Balancer pools for a token, or the pools shared by a token pair

use shah_pools::*;
use anyhow::{Context, Result};
use tracing::info;

const USAGE: &str = "usage: shah-pools <TOKEN_A> [TOKEN_B]";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (token_a, token_b) = match args.as_slice() {
        [a] => (utils::parse_token_address(a)?, None),
        [a, b] => (utils::parse_token_address(a)?, Some(utils::parse_token_address(b)?)),
        _ => return Err(anyhow::anyhow!(USAGE)),
    };

    // Load configuration
    let config = CONFIG.clone();

    info!("🏊 SHAH Pools v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Subgraph: {}", config.subgraph_url);
    info!("   Cache TTL: {} ms", config.pool_cache_ttl_ms);
    info!("   Vault: {}", config.vault_address);

    let cache = ConcretePoolCache::from_config(&config)
        .context("Failed to build pool cache")?;

    match token_b {
        Some(token_b) => {
            let pools = cache.find_pools_for_pair(token_a, token_b).await;
            utils::print_pair_lookup(token_a, token_b, &pools);
        }
        None => {
            let pools = cache.fetch_pools_for_token(token_a).await;
            utils::print_pools(&format!("Pools holding {}", utils::lowercase_hex(token_a)), &pools);
        }
    }

    utils::print_cache_stats(&cache.stats().await);

    Ok(())
}
