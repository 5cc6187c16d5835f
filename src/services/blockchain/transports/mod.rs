//! Provider pipeline for JSON-RPC requests.
//!
//! A request enters the first stage of a composed [`Pipeline`] and travels down the chain
//! until a stage answers it. Stages either short-circuit (fixture, cache and filter state)
//! or forward through [`Next`]; the remote RPC stage at the end performs the network call.
//!
//! - `pipeline`: composition, ordering rules and start-up
//! - `handle`: the started pipeline, as used by the rest of the crate
//! - `stages`: the five standard stages

mod error;
mod handle;
mod pipeline;
mod stages;

pub use error::TransportError;
pub use handle::NodeHandle;
pub use pipeline::Pipeline;
pub use stages::{
	CacheStage, FilterStage, FixtureStage, NonceTrackerStage, RemoteRpcStage, RequestLogger,
};

use futures::future::BoxFuture;
use serde_json::{json, Value};
use std::fmt;

/// A JSON-RPC call travelling through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
	pub method: String,
	pub params: Value,
}

impl RpcRequest {
	/// Creates a request; `Null` params are sent as an empty array
	pub fn new(method: impl Into<String>, params: Value) -> Self {
		let params = match params {
			Value::Null => Value::Array(Vec::new()),
			other => other,
		};
		Self {
			method: method.into(),
			params,
		}
	}

	/// Positional parameter `index`, if any
	pub fn param(&self, index: usize) -> Option<&Value> {
		self.params.as_array().and_then(|params| params.get(index))
	}

	/// Key identifying equal requests
	pub fn cache_key(&self) -> String {
		format!("{}:{}", self.method, self.params)
	}

	/// JSON-RPC 2.0 envelope with the given id
	pub fn envelope(&self, id: u64) -> Value {
		json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": self.method,
			"params": self.params,
		})
	}
}

/// Role of a stage in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
	Fixture,
	Cache,
	Filter,
	NonceTracker,
	RemoteRpc,
}

impl StageKind {
	/// Terminal stages end the chain and never forward
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::RemoteRpc)
	}
}

impl fmt::Display for StageKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Fixture => "fixture",
			Self::Cache => "cache",
			Self::Filter => "filter",
			Self::NonceTracker => "nonce-tracker",
			Self::RemoteRpc => "remote-rpc",
		};
		f.write_str(name)
	}
}

/// One link of the provider pipeline
#[async_trait::async_trait]
pub trait ProviderStage: Send + Sync {
	/// Role of the stage
	fn kind(&self) -> StageKind;

	/// Endpoint URL for stages that talk to the network
	fn endpoint(&self) -> Option<&str> {
		None
	}

	/// Called once when the pipeline is started
	async fn start(&self) -> Result<(), TransportError> {
		Ok(())
	}

	/// Answers `request` or forwards it through `next`
	async fn handle(&self, request: &RpcRequest, next: Next<'_>) -> Result<Value, TransportError>;
}

/// The remainder of the chain after the current stage
///
/// `Next` is `Copy`, so a stage may issue several downstream requests (the filter stage
/// polls the block number before fetching logs, for instance).
#[derive(Clone, Copy)]
pub struct Next<'a> {
	stages: &'a [Box<dyn ProviderStage>],
}

impl<'a> Next<'a> {
	pub(crate) fn new(stages: &'a [Box<dyn ProviderStage>]) -> Self {
		Self { stages }
	}

	/// Hands `request` to the following stage
	pub fn run<'r>(self, request: &'r RpcRequest) -> BoxFuture<'r, Result<Value, TransportError>>
	where
		'a: 'r,
	{
		match self.stages.split_first() {
			Some((stage, rest)) => stage.handle(request, Next { stages: rest }),
			None => {
				let method = request.method.clone();
				Box::pin(async move { Err(TransportError::unsupported(method)) })
			}
		}
	}
}
