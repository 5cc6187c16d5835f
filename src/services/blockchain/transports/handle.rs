//! The started provider pipeline.

use alloy::primitives::Address;
use serde_json::{json, Value};
use std::{
	fmt,
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
};

use crate::{
	services::blockchain::{
		transports::{Next, ProviderStage, RpcRequest, StageKind, TransportError},
		BlockChainError,
	},
	utils::{parse_quantity, to_quantity},
};

struct HandleInner {
	generation: u64,
	stages: Vec<Box<dyn ProviderStage>>,
	stopped: AtomicBool,
}

/// A live, middleware-wrapped connection to one endpoint
///
/// Handles only come out of [`Pipeline::start`](super::Pipeline::start), so an unstarted
/// chain can never be queried. Clones share the same chain; once the owner replaces the
/// handle every clone rejects further requests with [`TransportError::Stopped`].
#[derive(Clone)]
pub struct NodeHandle {
	inner: Arc<HandleInner>,
}

impl NodeHandle {
	pub(crate) fn new(generation: u64, stages: Vec<Box<dyn ProviderStage>>) -> Self {
		Self {
			inner: Arc::new(HandleInner {
				generation,
				stages,
				stopped: AtomicBool::new(false),
			}),
		}
	}

	/// Process-unique generation number, increasing with every started pipeline
	pub fn generation(&self) -> u64 {
		self.inner.generation
	}

	/// URL of the remote endpoint
	pub fn url(&self) -> Option<&str> {
		self.inner.stages.iter().find_map(|stage| stage.endpoint())
	}

	/// Roles of the stages, in chain order
	pub fn stage_kinds(&self) -> Vec<StageKind> {
		self.inner.stages.iter().map(|stage| stage.kind()).collect()
	}

	pub fn is_stopped(&self) -> bool {
		self.inner.stopped.load(Ordering::Acquire)
	}

	/// Marks the handle as replaced; every clone stops accepting requests
	pub(crate) fn stop(&self) {
		self.inner.stopped.store(true, Ordering::Release);
	}

	/// Sends a raw JSON-RPC request through the chain and returns its `result`
	pub async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
		if self.is_stopped() {
			return Err(TransportError::Stopped);
		}

		let request = RpcRequest::new(method, params);
		Next::new(&self.inner.stages).run(&request).await
	}

	/// Executes a read-only `eth_call` against the latest block
	pub async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, TransportError> {
		let params = json!([
			{
				"to": to.to_checksum(None),
				"data": format!("0x{}", hex::encode(data)),
			},
			"latest"
		]);

		let response = self.request("eth_call", params).await?;
		let encoded = response
			.as_str()
			.ok_or_else(|| TransportError::response_parse("eth_call result is not a string"))?;

		hex::decode(encoded.trim_start_matches("0x")).map_err(|e| {
			TransportError::response_parse(format!("eth_call result is not hex: {}", e))
		})
	}

	/// Reads the timestamp (Unix seconds) of block `number`
	pub async fn block_timestamp(&self, number: u64) -> Result<u64, BlockChainError> {
		let block = self
			.request("eth_getBlockByNumber", json!([to_quantity(number), false]))
			.await?;

		if block.is_null() {
			return Err(BlockChainError::resolution_error(format!(
				"Block not found: {}",
				number
			)));
		}

		block
			.get("timestamp")
			.and_then(parse_quantity)
			.ok_or_else(|| {
				BlockChainError::resolution_error(format!(
					"Block {} has no readable timestamp",
					number
				))
			})
	}
}

impl fmt::Debug for NodeHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NodeHandle")
			.field("generation", &self.inner.generation)
			.field("url", &self.url())
			.field("stages", &self.stage_kinds())
			.field("stopped", &self.is_stopped())
			.finish()
	}
}
