//! Response memoization for idempotent queries.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{
	services::blockchain::transports::{Next, ProviderStage, RpcRequest, StageKind, TransportError},
	utils::parse_quantity,
};

/// Methods whose answers never change once a result exists
const PERMANENT_METHODS: &[&str] = &[
	"web3_clientVersion",
	"net_version",
	"eth_chainId",
	"eth_getBlockByHash",
	"eth_getTransactionByHash",
	"eth_getTransactionReceipt",
];

/// Block-scoped methods and the position of their block parameter
const BLOCK_METHODS: &[(&str, usize)] = &[
	("eth_getBlockByNumber", 0),
	("eth_getBalance", 1),
	("eth_getCode", 1),
	("eth_call", 1),
	("eth_getStorageAt", 2),
];

/// Whether `block` always designates the same block
///
/// Numeric quantities and hash references qualify; tags such as `latest` or `pending`
/// move with the chain head.
fn is_pinned_block(block: &Value) -> bool {
	match block {
		Value::Object(reference) => {
			reference.contains_key("blockHash")
				|| reference
					.get("blockNumber")
					.and_then(parse_quantity)
					.is_some()
		}
		other => parse_quantity(other).is_some(),
	}
}

/// Memoizes successful non-null responses for the lifetime of the handle
#[derive(Debug, Default)]
pub struct CacheStage {
	entries: RwLock<HashMap<String, Value>>,
}

impl CacheStage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether the response to `request` may be memoized
	///
	/// Block-scoped queries are only cached when pinned to an explicit block.
	pub fn is_cacheable(request: &RpcRequest) -> bool {
		if PERMANENT_METHODS.contains(&request.method.as_str()) {
			return true;
		}

		BLOCK_METHODS
			.iter()
			.find(|(method, _)| *method == request.method)
			.and_then(|(_, position)| request.param(*position))
			.is_some_and(is_pinned_block)
	}

	/// Number of memoized responses
	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}
}

#[async_trait::async_trait]
impl ProviderStage for CacheStage {
	fn kind(&self) -> StageKind {
		StageKind::Cache
	}

	async fn handle(&self, request: &RpcRequest, next: Next<'_>) -> Result<Value, TransportError> {
		if !Self::is_cacheable(request) {
			return next.run(request).await;
		}

		let key = request.cache_key();
		if let Some(hit) = self.entries.read().await.get(&key) {
			tracing::debug!(method = %request.method, "cache hit");
			return Ok(hit.clone());
		}

		let result = next.run(request).await?;
		if !result.is_null() {
			self.entries.write().await.insert(key, result.clone());
		}
		Ok(result)
	}
}
