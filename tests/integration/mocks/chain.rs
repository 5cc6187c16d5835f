use alloy::{
	dyn_abi::DynSolValue,
	primitives::{keccak256, Address},
};
use serde_json::{json, Value};
use std::{
	collections::HashMap,
	str::FromStr,
	sync::{Arc, Mutex},
};

use ico_resolver::{
	services::blockchain::{Next, ProviderStage, RpcRequest, StageKind, TransportError},
	utils::{parse_quantity, to_quantity},
};

/// Selector of the zero-argument method `name`
pub fn selector(name: &str) -> [u8; 4] {
	let hash = keccak256(format!("{}()", name).as_bytes());
	[hash[0], hash[1], hash[2], hash[3]]
}

/// In-memory chain answering `eth_call`, `eth_getBlockByNumber` and `eth_blockNumber`
///
/// Calls to unknown methods return empty data, like a node calling an address without
/// code. Every request reaching the chain is recorded.
#[derive(Clone, Default)]
pub struct FakeChain {
	returns: HashMap<(Address, [u8; 4]), Vec<u8>>,
	blocks: HashMap<u64, u64>,
	head: u64,
	requests: Arc<Mutex<Vec<RpcRequest>>>,
}

impl FakeChain {
	pub fn new() -> Self {
		Self::default()
	}

	/// `address.method()` returns `value`
	pub fn with_return(mut self, address: &str, method: &str, value: DynSolValue) -> Self {
		let address = Address::from_str(address).unwrap();
		let encoded = DynSolValue::Tuple(vec![value]).abi_encode_params();
		self.returns.insert((address, selector(method)), encoded);
		self
	}

	/// Block `number` carries `timestamp`
	pub fn with_block(mut self, number: u64, timestamp: u64) -> Self {
		self.blocks.insert(number, timestamp);
		self.head = self.head.max(number);
		self
	}

	/// Shared log of the requests reaching the chain
	pub fn requests(&self) -> Arc<Mutex<Vec<RpcRequest>>> {
		self.requests.clone()
	}

	/// Number of recorded requests for `method`
	pub fn count(requests: &Arc<Mutex<Vec<RpcRequest>>>, method: &str) -> usize {
		requests
			.lock()
			.unwrap()
			.iter()
			.filter(|request| request.method == method)
			.count()
	}

	/// Recorded `eth_call` targets, lowercase
	pub fn call_targets(requests: &Arc<Mutex<Vec<RpcRequest>>>) -> Vec<String> {
		requests
			.lock()
			.unwrap()
			.iter()
			.filter(|request| request.method == "eth_call")
			.filter_map(|request| request.param(0)?.get("to")?.as_str().map(str::to_lowercase))
			.collect()
	}

	fn eth_call(&self, request: &RpcRequest) -> Result<Value, TransportError> {
		let call = request.param(0).ok_or_else(|| TransportError::response_parse("no call"))?;
		let to = call
			.get("to")
			.and_then(Value::as_str)
			.and_then(|to| Address::from_str(to).ok())
			.ok_or_else(|| TransportError::response_parse("bad to"))?;
		let data = call
			.get("data")
			.and_then(Value::as_str)
			.and_then(|data| hex::decode(data.trim_start_matches("0x")).ok())
			.ok_or_else(|| TransportError::response_parse("bad data"))?;

		let mut key = [0u8; 4];
		key.copy_from_slice(&data[..4]);
		let output = self.returns.get(&(to, key)).cloned().unwrap_or_default();
		Ok(json!(format!("0x{}", hex::encode(output))))
	}
}

#[async_trait::async_trait]
impl ProviderStage for FakeChain {
	fn kind(&self) -> StageKind {
		StageKind::RemoteRpc
	}

	fn endpoint(&self) -> Option<&str> {
		Some("memory://chain")
	}

	async fn handle(&self, request: &RpcRequest, _next: Next<'_>) -> Result<Value, TransportError> {
		self.requests.lock().unwrap().push(request.clone());

		match request.method.as_str() {
			"eth_call" => self.eth_call(request),
			"eth_blockNumber" => Ok(json!(to_quantity(self.head))),
			"eth_getBlockByNumber" => {
				let number = request.param(0).and_then(parse_quantity).unwrap_or_default();
				Ok(match self.blocks.get(&number) {
					Some(timestamp) => json!({
						"number": to_quantity(number),
						"hash": format!("0x{:064x}", number),
						"timestamp": to_quantity(*timestamp),
					}),
					None => Value::Null,
				})
			}
			other => Err(TransportError::unsupported(other)),
		}
	}
}
