//! Subgraph access over HTTP

pub mod subgraph;

pub use subgraph::*;
