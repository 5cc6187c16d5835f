//! Utility modules for common functionality.
//!
//! - logging: subscriber setup
//! - parsing: JSON-RPC quantities, addresses and date patterns
//! - units: wei and date rendering

pub mod logging;
mod parsing;
mod units;

pub use parsing::*;
pub use units::*;
