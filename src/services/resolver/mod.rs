//! Resolution of a sale's on-chain constants into a display record.
//!
//! - `service`: the resolver driving direct field queries and derivation rules
//! - `rules`: evaluation of a single derivation rule

mod rules;
mod service;

pub use service::ConstantResolver;
