//! On-chain value types.

mod value;

pub use value::{RawValue, ValueType};
