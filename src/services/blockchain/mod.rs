//! Node connectivity and contract access.
//!
//! - `transports`: the provider pipeline and the node handle it vends
//! - `guard`: reachability probe run before any handle is created
//! - `connection`: the standard engine and the owner of the current handle
//! - `contract`: contract proxies over interface descriptions
//! - `error`: error kinds surfaced to callers

mod connection;
mod contract;
mod error;
mod guard;
mod transports;

pub use connection::{create_engine, ConnectionEvent, NodeContext};
pub use contract::{ContractFactory, ContractProxy};
pub use error::{BlockChainError, ReasonCode};
pub use guard::ConnectionGuard;
pub use transports::{
	CacheStage, FilterStage, FixtureStage, Next, NodeHandle, NonceTrackerStage, Pipeline,
	ProviderStage, RemoteRpcStage, RequestLogger, RpcRequest, StageKind, TransportError,
};
