//! Domain models and data structures for sale resolution.
//!
//! - `blockchain`: raw on-chain values and their semantic type tags
//! - `config`: configuration loading and validation
//! - `core`: endpoint settings, sale descriptors and the resolved record

mod blockchain;
mod config;
mod core;

pub use blockchain::{RawValue, ValueType};

pub use self::core::{ConstantRecord, DerivationRule, EndpointConfig, SaleDescriptor};

pub use config::{ConfigError, ConfigLoader, RPC_URL_ENV};
