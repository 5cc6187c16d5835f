//! Rendering of raw contract values for display.

mod service;

pub use service::ValueDecoder;
