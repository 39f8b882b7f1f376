//! Pair routing helpers over cached pool lists

use alloy::primitives::Address;
use std::collections::HashSet;
use crate::types::Pool;

/// Pools from `pools_a` that also hold `token_b`, first occurrence wins
pub fn shared_pools(pools_a: &[Pool], token_b: Address) -> Vec<Pool> {
    let mut seen: HashSet<&str> = HashSet::new();
    pools_a
        .iter()
        .filter(|pool| pool.contains_token(token_b))
        .filter(|pool| seen.insert(pool.id.as_str()))
        .cloned()
        .collect()
}
