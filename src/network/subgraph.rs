//! Balancer subgraph client

use alloy::primitives::Address;
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use crate::{
    config::Config,
    errors::{PoolError, PoolResult},
    types::{Pool, PoolType},
    utils::lowercase_hex,
};

const POOLS_FOR_TOKEN_QUERY: &str = r#"
query PoolsForToken($token: Bytes!, $poolTypes: [String!]) {
  pools(
    first: 1000
    where: { tokensList_contains: [$token], poolType_in: $poolTypes }
    orderBy: totalLiquidity
    orderDirection: desc
  ) {
    id
    address
    poolType
    totalLiquidity
    swapFee
    totalWeight
    amp
    tokens {
      address
      symbol
      decimals
      weight
      balance
    }
    lastUpdate
  }
}
"#;

/// Source of pool records for a token
pub trait SubgraphClient: Send + Sync {
    fn query_pools(&self, token: Address) -> impl Future<Output = PoolResult<Vec<Pool>>> + Send;
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<PoolsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct PoolsData {
    pools: Vec<Pool>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Subgraph client speaking GraphQL over HTTP POST
#[derive(Debug, Clone)]
pub struct HttpSubgraphClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubgraphClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> PoolResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                warn!("⚠️ Failed to initialize HTTP client: {}", e);
                PoolError::Network {
                    message: "Failed to build HTTP client".to_string(),
                    source: e,
                }
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> PoolResult<Self> {
        Self::new(config.subgraph_url.clone(), config.subgraph_timeout())
    }
}

impl SubgraphClient for HttpSubgraphClient {
    async fn query_pools(&self, token: Address) -> PoolResult<Vec<Pool>> {
        let token_hex = lowercase_hex(token);
        let pool_types: Vec<&str> = PoolType::ALL.iter().map(|t| t.as_str()).collect();
        let body = json!({
            "query": POOLS_FOR_TOKEN_QUERY,
            "variables": { "token": token_hex, "poolTypes": pool_types },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| PoolError::Network {
                message: format!("POST {} failed", self.endpoint),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PoolError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| PoolError::Network {
            message: "Failed to read subgraph response body".to_string(),
            source: e,
        })?;
        parse_pools_response(&text)
            .inspect(|pools| debug!(token = %token_hex, count = pools.len(), "Subgraph returned pools"))
    }
}

fn parse_pools_response(text: &str) -> PoolResult<Vec<Pool>> {
    let parsed: GraphQlResponse = serde_json::from_str(text).map_err(|e| PoolError::DataParsing {
        context: "Failed to parse subgraph response".to_string(),
        source: e.into(),
    })?;

    if !parsed.errors.is_empty() {
        return Err(PoolError::GraphQl {
            messages: parsed.errors.into_iter().map(|e| e.message).collect(),
        });
    }

    parsed
        .data
        .map(|data| data.pools)
        .ok_or_else(|| PoolError::DataParsing {
            context: "Missing 'data.pools' in subgraph response".to_string(),
            source: anyhow::anyhow!("response had no data object"),
        })
}
