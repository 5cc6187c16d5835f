//! Reachability probe gating node handle creation.

use serde_json::{json, Value};
use std::time::Duration;

use crate::{models::EndpointConfig, services::blockchain::BlockChainError};

/// Checks that an endpoint answers JSON-RPC before a handle is vended
///
/// Every probe uses a throwaway HTTP client; nothing is kept between probes.
#[derive(Debug, Clone)]
pub struct ConnectionGuard {
	endpoint: String,
	timeout: Duration,
}

impl ConnectionGuard {
	pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
		Self {
			endpoint: endpoint.into(),
			timeout,
		}
	}

	pub fn from_config(config: &EndpointConfig) -> Self {
		Self::new(
			config.rpc_url.clone(),
			Duration::from_millis(config.probe_timeout_ms),
		)
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Posts `net_listening` to `endpoint_url`.
	///
	/// Returns true only for a 2xx answer whose JSON-RPC `result` is `true`.
	pub async fn is_reachable(endpoint_url: &str, timeout: Duration) -> bool {
		let client = match reqwest::Client::builder().timeout(timeout).build() {
			Ok(client) => client,
			Err(e) => {
				tracing::warn!("Failed to create probe client: {}", e);
				return false;
			}
		};

		let probe = json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "net_listening",
			"params": []
		});

		let response = match client.post(endpoint_url).json(&probe).send().await {
			Ok(response) if response.status().is_success() => response,
			Ok(response) => {
				tracing::debug!(status = response.status().as_u16(), "probe rejected");
				return false;
			}
			Err(e) => {
				tracing::debug!(error = %e, "probe failed");
				return false;
			}
		};

		match response.json::<Value>().await {
			Ok(body) => body.get("result") == Some(&Value::Bool(true)),
			Err(_) => false,
		}
	}

	/// Probes the configured endpoint
	pub async fn ensure_connected(&self) -> Result<(), BlockChainError> {
		if Self::is_reachable(&self.endpoint, self.timeout).await {
			Ok(())
		} else {
			Err(BlockChainError::connection_error(format!(
				"{} is not reachable",
				self.endpoint
			)))
		}
	}
}
