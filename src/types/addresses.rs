//! Network addresses and subgraph endpoints

use alloy::primitives::{Address, address};

// Balancer V2 deployment (same vault address on every chain)
pub const BALANCER_VAULT: Address = address!("BA12222222228d8Ba445958a75a0704d566BF2C8");

pub const BALANCER_V2_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/balancer-labs/balancer-v2";

// Common mainnet tokens
pub const WETH_MAINNET: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const USDC_MAINNET: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
pub const BAL_MAINNET: Address = address!("ba100000625a3754423978a60c9317c58a424e3D");
