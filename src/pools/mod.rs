//! Pool discovery, caching and pair lookup

pub mod clock;
pub mod cache;
pub mod pairs;

pub use clock::*;
pub use cache::*;
pub use pairs::*;
