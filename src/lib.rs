//! Token-sale constant resolver.
//!
//! Connects to an Ethereum JSON-RPC node through a chain of provider stages, reads a
//! sale contract's read-only methods and renders the results (token amounts, dates)
//! into a display-ready record.
//!
//! # Modules
//! - `bootstrap`: configuration loading and service wiring
//! - `models`: configuration, descriptors and records
//! - `repositories`: sale descriptors and interface descriptions
//! - `services`: connectivity, decoding and resolution
//! - `utils`: logging, parsing and unit conversion

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
