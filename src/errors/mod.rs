//! Error types for the subgraph and cache layers

pub mod pool_error;

pub use pool_error::*;
