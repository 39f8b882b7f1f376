//! Pool-related types and structures

use alloy::primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pricing curve of a Balancer pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolType {
    Weighted,
    ComposableStable,
    Stable,
}

impl PoolType {
    pub const ALL: [PoolType; 3] = [PoolType::Weighted, PoolType::ComposableStable, PoolType::Stable];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoolType::Weighted => "Weighted",
            PoolType::ComposableStable => "ComposableStable",
            PoolType::Stable => "Stable",
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One token position inside a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolToken {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    /// Normalized weight, only set for weighted pools
    pub weight: Option<String>,
    /// Raw decimal string, may exceed `Decimal` precision
    pub balance: String,
}

impl PoolToken {
    pub fn weight_fraction(&self) -> Option<Decimal> {
        self.weight.as_deref().and_then(|w| Decimal::from_str(w).ok())
    }
}

/// A liquidity pool record as returned by the subgraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub address: Address,
    pub pool_type: PoolType,
    pub total_liquidity: String,
    pub swap_fee: String,
    pub total_weight: Option<String>,
    pub amp: Option<String>,
    pub tokens: Vec<PoolToken>,
    #[serde(default)]
    pub last_update: Option<String>,
}

impl Pool {
    pub fn contains_token(&self, token: Address) -> bool {
        self.tokens.iter().any(|t| t.address == token)
    }

    /// USD-denominated liquidity, `None` if the subgraph sent something unparsable
    pub fn total_liquidity_usd(&self) -> Option<Decimal> {
        Decimal::from_str(&self.total_liquidity).ok()
    }

    pub fn swap_fee_fraction(&self) -> Option<Decimal> {
        Decimal::from_str(&self.swap_fee).ok()
    }

    pub fn token_symbols(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.symbol.as_str()).collect()
    }
}
