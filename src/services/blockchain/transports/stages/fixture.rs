//! Fixed answers for node-identity methods.

use serde_json::{json, Value};
use std::collections::HashMap;

use crate::services::blockchain::transports::{
	Next, ProviderStage, RpcRequest, StageKind, TransportError,
};

/// Client identifier reported for `web3_clientVersion`
pub const CLIENT_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "/v", env!("CARGO_PKG_VERSION"), "/rust");

/// Answers a fixed set of methods without any network I/O
#[derive(Debug, Clone)]
pub struct FixtureStage {
	fixtures: HashMap<String, Value>,
}

impl FixtureStage {
	pub fn new(fixtures: HashMap<String, Value>) -> Self {
		Self { fixtures }
	}

	/// Fixtures for client version, listening, hashrate, mining and syncing state
	pub fn with_defaults() -> Self {
		let fixtures = [
			("web3_clientVersion", json!(CLIENT_VERSION)),
			("net_listening", json!(true)),
			("eth_hashrate", json!("0x00")),
			("eth_mining", json!(false)),
			("eth_syncing", json!(true)),
		]
		.into_iter()
		.map(|(method, value)| (method.to_string(), value))
		.collect();

		Self::new(fixtures)
	}
}

impl Default for FixtureStage {
	fn default() -> Self {
		Self::with_defaults()
	}
}

#[async_trait::async_trait]
impl ProviderStage for FixtureStage {
	fn kind(&self) -> StageKind {
		StageKind::Fixture
	}

	async fn handle(&self, request: &RpcRequest, next: Next<'_>) -> Result<Value, TransportError> {
		match self.fixtures.get(&request.method) {
			Some(value) => {
				tracing::debug!(method = %request.method, "answered from fixture");
				Ok(value.clone())
			}
			None => next.run(request).await,
		}
	}
}
