//! Custom error types for pool discovery

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Subgraph returned HTTP {status}: {body}")]
    HttpStatus {
        status: u16,
        body: String,
    },

    #[error("Subgraph query failed: {}", .messages.join("; "))]
    GraphQl {
        messages: Vec<String>,
    },

    #[error("Data parsing error: {context}")]
    DataParsing {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid address {input:?}")]
    InvalidAddress {
        input: String,
    },
}

pub type PoolResult<T> = Result<T, PoolError>;
