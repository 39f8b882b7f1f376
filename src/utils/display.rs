//! Display and printing utilities

use alloy::primitives::Address;
use tracing::info;
use crate::{
    types::{CacheStats, Pool},
    utils::lowercase_hex,
};

/// One-line summary of a pool
pub fn format_pool_line(pool: &Pool) -> String {
    let liquidity = pool
        .total_liquidity_usd()
        .map(|l| format!("${:.2}", l))
        .unwrap_or_else(|| format!("${}?", pool.total_liquidity));
    let fee_pct = pool
        .swap_fee_fraction()
        .map(|f| format!("{:.4}%", f * rust_decimal_macros::dec!(100)))
        .unwrap_or_else(|| pool.swap_fee.clone());

    format!(
        "{} [{}] {} | TVL: {} | Fee: {}",
        lowercase_hex(pool.address),
        pool.pool_type,
        pool.token_symbols().join("/"),
        liquidity,
        fee_pct,
    )
}

pub fn print_pools(label: &str, pools: &[Pool]) {
    if pools.is_empty() {
        info!("🔍 {}: no pools found", label);
        return;
    }

    info!("\n🏊 {} ({} pools)", label, pools.len());
    for pool in pools {
        info!("   {}", format_pool_line(pool));
        info!("     id: {}", pool.id);
    }
}

pub fn print_pair_lookup(token_a: Address, token_b: Address, pools: &[Pool]) {
    let label = format!("Pools routing {} <-> {}", lowercase_hex(token_a), lowercase_hex(token_b));
    print_pools(&label, pools);
}

pub fn print_cache_stats(stats: &CacheStats) {
    info!("📊 Pool cache statistics");
    info!("   Entries: {}", stats.entries);
    info!("   Hits: {} | Misses: {} | Hit rate: {:.1}%", stats.hits, stats.misses, stats.hit_rate() * 100.0);
    info!("   Failed fetches: {}", stats.failed_fetches);
}
