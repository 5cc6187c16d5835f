//! Pending nonce tracking.

use alloy::{
	consensus::{transaction::SignerRecoverable, Transaction, TxEnvelope},
	eips::eip2718::Decodable2718,
	primitives::Address,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{
	services::blockchain::transports::{
		Next, ProviderStage, RpcRequest, StageKind, TransportError,
	},
	utils::{parse_address, parse_quantity, to_quantity},
};

const PENDING_TAG: &str = "pending";

/// Sender and nonce of a signed raw transaction, if it can be decoded
fn decode_sent(raw: &str) -> Option<(Address, u64)> {
	let bytes = hex::decode(raw.trim_start_matches("0x")).ok()?;
	let envelope = TxEnvelope::decode_2718(&mut bytes.as_slice()).ok()?;
	let sender = envelope.recover_signer().ok()?;
	Some((sender, envelope.nonce()))
}

/// Answers `eth_getTransactionCount(address, "pending")` from observed traffic
#[derive(Debug, Default)]
pub struct NonceTrackerStage {
	nonces: RwLock<HashMap<Address, u64>>,
}

impl NonceTrackerStage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Locally tracked pending nonce for `address`
	pub async fn tracked(&self, address: &Address) -> Option<u64> {
		self.nonces.read().await.get(address).copied()
	}

	/// Records a sent transaction; an undecodable one invalidates every entry
	pub async fn observe_sent(&self, sent: Option<(Address, u64)>) {
		let mut nonces = self.nonces.write().await;
		match sent {
			Some((sender, nonce)) => {
				let entry = nonces.entry(sender).or_insert(0);
				*entry = (*entry).max(nonce + 1);
			}
			None => {
				tracing::debug!("undecodable raw transaction, forgetting tracked nonces");
				nonces.clear();
			}
		}
	}

	async fn pending_count(
		&self,
		request: &RpcRequest,
		address: Address,
		next: Next<'_>,
	) -> Result<Value, TransportError> {
		if let Some(nonce) = self.tracked(&address).await {
			return Ok(json!(to_quantity(nonce)));
		}

		let result = next.run(request).await?;
		if let Some(nonce) = parse_quantity(&result) {
			self.nonces.write().await.insert(address, nonce);
		}
		Ok(result)
	}
}

#[async_trait::async_trait]
impl ProviderStage for NonceTrackerStage {
	fn kind(&self) -> StageKind {
		StageKind::NonceTracker
	}

	async fn handle(&self, request: &RpcRequest, next: Next<'_>) -> Result<Value, TransportError> {
		match request.method.as_str() {
			"eth_getTransactionCount"
				if request.param(1).and_then(Value::as_str) == Some(PENDING_TAG) =>
			{
				match request
					.param(0)
					.and_then(Value::as_str)
					.and_then(|address| parse_address(address).ok())
				{
					Some(address) => self.pending_count(request, address, next).await,
					None => next.run(request).await,
				}
			}
			"eth_sendRawTransaction" => {
				let result = next.run(request).await?;
				let sent = request.param(0).and_then(Value::as_str).and_then(decode_sent);
				self.observe_sent(sent).await;
				Ok(result)
			}
			_ => next.run(request).await,
		}
	}
}
