//! Core services.
//!
//! - `blockchain`: node connectivity, the provider pipeline and contract proxies
//! - `decoder`: rendering of raw contract values
//! - `resolver`: assembly of the constant record of a sale

pub mod blockchain;
pub mod decoder;
pub mod resolver;
