//! Utility functions and helpers

pub mod address;
pub mod logging;
pub mod display;

pub use address::*;
pub use logging::*;
pub use display::*;
