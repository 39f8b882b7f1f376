//! Address parsing helpers

use alloy::primitives::Address;
use std::str::FromStr;
use crate::errors::{PoolError, PoolResult};

/// Parse a hex address regardless of letter case or checksum
pub fn parse_token_address(input: &str) -> PoolResult<Address> {
    Address::from_str(input.trim()).map_err(|_| PoolError::InvalidAddress {
        input: input.to_string(),
    })
}

/// Lowercase `0x`-prefixed form used as the subgraph variable
pub fn lowercase_hex(address: Address) -> String {
    format!("{:#x}", address)
}
