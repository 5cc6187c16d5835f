//! Standard provider stages, in chain order.

mod cache;
mod filter;
mod fixture;
mod nonce;
mod rpc;

pub use cache::CacheStage;
pub use filter::FilterStage;
pub use fixture::FixtureStage;
pub use nonce::NonceTrackerStage;
pub use rpc::{RemoteRpcStage, RequestLogger};
