//! Locally tracked block and log filters.
//!
//! Filters are emulated on top of `eth_blockNumber`, `eth_getBlockByNumber` and
//! `eth_getLogs`, so nodes without filter support (or load-balanced endpoints that
//! lose filter state between backends) still answer polling clients.

use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::{
	services::blockchain::transports::{
		Next, ProviderStage, RpcRequest, StageKind, TransportError,
	},
	utils::{parse_quantity, to_quantity},
};

const FILTER_NOT_FOUND: i64 = -32000;

#[derive(Debug, Clone)]
enum Filter {
	Block { last_seen: u64 },
	Log { criteria: Map<String, Value>, last_seen: u64 },
}

#[derive(Debug, Default)]
struct FilterState {
	next_id: u64,
	filters: HashMap<String, Filter>,
}

impl FilterState {
	fn install(&mut self, filter: Filter) -> String {
		self.next_id += 1;
		let id = to_quantity(self.next_id);
		self.filters.insert(id.clone(), filter);
		id
	}
}

/// Answers the filter family of methods from local state
#[derive(Debug, Default)]
pub struct FilterStage {
	state: Mutex<FilterState>,
}

impl FilterStage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of installed filters
	pub async fn installed(&self) -> usize {
		self.state.lock().await.filters.len()
	}

	async fn block_number(next: Next<'_>) -> Result<u64, TransportError> {
		let response = next
			.run(&RpcRequest::new("eth_blockNumber", Value::Null))
			.await?;
		parse_quantity(&response)
			.ok_or_else(|| TransportError::response_parse("eth_blockNumber is not a quantity"))
	}

	async fn block_hashes(next: Next<'_>, from: u64, to: u64) -> Result<Vec<Value>, TransportError> {
		let mut hashes = Vec::new();
		for number in from..=to {
			let block = next
				.run(&RpcRequest::new(
					"eth_getBlockByNumber",
					json!([to_quantity(number), false]),
				))
				.await?;
			if let Some(hash) = block.get("hash") {
				hashes.push(hash.clone());
			}
		}
		Ok(hashes)
	}

	async fn logs(
		next: Next<'_>,
		criteria: &Map<String, Value>,
		from: u64,
		to: u64,
	) -> Result<Value, TransportError> {
		let mut range = criteria.clone();
		range.remove("blockHash");
		range.insert("fromBlock".to_string(), json!(to_quantity(from)));
		range.insert("toBlock".to_string(), json!(to_quantity(to)));
		next.run(&RpcRequest::new("eth_getLogs", json!([range])))
			.await
	}

	fn lookup(state: &FilterState, request: &RpcRequest) -> Result<(String, Filter), TransportError> {
		let id = request
			.param(0)
			.and_then(Value::as_str)
			.ok_or_else(|| TransportError::response_parse("filter id must be a string"))?;

		state
			.filters
			.get(id)
			.cloned()
			.map(|filter| (id.to_string(), filter))
			.ok_or_else(|| TransportError::Rpc {
				code: FILTER_NOT_FOUND,
				message: format!("filter not found: {}", id),
			})
	}

	async fn changes(&self, request: &RpcRequest, next: Next<'_>) -> Result<Value, TransportError> {
		let (id, filter) = Self::lookup(&*self.state.lock().await, request)?;
		let current = Self::block_number(next).await?;

		let (changes, updated) = match filter {
			Filter::Block { last_seen } if current > last_seen => (
				Value::Array(Self::block_hashes(next, last_seen + 1, current).await?),
				Filter::Block { last_seen: current },
			),
			Filter::Log {
				criteria,
				last_seen,
			} if current > last_seen => (
				Self::logs(next, &criteria, last_seen + 1, current).await?,
				Filter::Log {
					criteria,
					last_seen: current,
				},
			),
			unchanged => (json!([]), unchanged),
		};

		let mut state = self.state.lock().await;
		if let Some(slot) = state.filters.get_mut(&id) {
			*slot = updated;
		}
		Ok(changes)
	}

	async fn all_logs(&self, request: &RpcRequest, next: Next<'_>) -> Result<Value, TransportError> {
		let (_, filter) = Self::lookup(&*self.state.lock().await, request)?;
		match filter {
			Filter::Log { criteria, .. } => {
				next.run(&RpcRequest::new("eth_getLogs", json!([criteria])))
					.await
			}
			Filter::Block { .. } => Ok(json!([])),
		}
	}
}

#[async_trait::async_trait]
impl ProviderStage for FilterStage {
	fn kind(&self) -> StageKind {
		StageKind::Filter
	}

	async fn handle(&self, request: &RpcRequest, next: Next<'_>) -> Result<Value, TransportError> {
		match request.method.as_str() {
			"eth_newBlockFilter" => {
				let last_seen = Self::block_number(next).await?;
				let id = self.state.lock().await.install(Filter::Block { last_seen });
				tracing::debug!(filter = %id, "installed block filter");
				Ok(json!(id))
			}
			"eth_newFilter" => {
				let criteria = request
					.param(0)
					.and_then(Value::as_object)
					.cloned()
					.unwrap_or_default();
				let last_seen = Self::block_number(next).await?;
				let id = self.state.lock().await.install(Filter::Log {
					criteria,
					last_seen,
				});
				tracing::debug!(filter = %id, "installed log filter");
				Ok(json!(id))
			}
			"eth_getFilterChanges" => self.changes(request, next).await,
			"eth_getFilterLogs" => self.all_logs(request, next).await,
			"eth_uninstallFilter" => {
				let removed = match request.param(0).and_then(Value::as_str) {
					Some(id) => self.state.lock().await.filters.remove(id).is_some(),
					None => false,
				};
				Ok(json!(removed))
			}
			"eth_newPendingTransactionFilter" => Err(TransportError::unsupported(&request.method)),
			_ => next.run(request).await,
		}
	}
}
