//! Terminal stage posting JSON-RPC envelopes to the endpoint.

use reqwest::{Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware};
use serde_json::Value;
use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::{Duration, Instant},
};
use url::Url;

use crate::services::blockchain::{
	transports::{Next, ProviderStage, RpcRequest, StageKind, TransportError},
	BlockChainError,
};

const INTERNAL_ERROR: i64 = -32603;

/// Logs every outgoing HTTP request with its status and latency
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

#[async_trait::async_trait]
impl Middleware for RequestLogger {
	async fn handle(
		&self,
		req: Request,
		extensions: &mut http::Extensions,
		next: reqwest_middleware::Next<'_>,
	) -> reqwest_middleware::Result<Response> {
		let url = req.url().clone();
		let started = Instant::now();
		let result = next.run(req, extensions).await;

		match &result {
			Ok(response) => tracing::debug!(
				%url,
				status = response.status().as_u16(),
				elapsed_ms = started.elapsed().as_millis() as u64,
				"rpc request completed"
			),
			Err(e) => tracing::debug!(%url, error = %e, "rpc request failed"),
		}
		result
	}
}

/// Sends requests to a remote JSON-RPC endpoint over HTTP(S)
pub struct RemoteRpcStage {
	url: Url,
	client: ClientWithMiddleware,
	next_id: AtomicU64,
}

impl RemoteRpcStage {
	/// Creates the stage; malformed or non-http(s) URLs are rejected immediately
	pub fn new(url: &str) -> Result<Self, BlockChainError> {
		let url = Url::parse(url).map_err(|e| {
			BlockChainError::configuration_error(format!("Invalid RPC URL '{}': {}", url, e))
		})?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(BlockChainError::configuration_error(format!(
				"RPC URL must use http or https: {}",
				url
			)));
		}

		let http_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.timeout(Duration::from_secs(30))
			.connect_timeout(Duration::from_secs(20))
			.build()
			.map_err(|e| {
				BlockChainError::configuration_error(format!("Failed to create HTTP client: {}", e))
			})?;

		let client = ClientBuilder::new(http_client).with(RequestLogger).build();

		Ok(Self {
			url,
			client,
			next_id: AtomicU64::new(1),
		})
	}

	fn extract_result(mut body: Value) -> Result<Value, TransportError> {
		if let Some(error) = body.get("error").filter(|error| !error.is_null()) {
			let code = error
				.get("code")
				.and_then(Value::as_i64)
				.unwrap_or(INTERNAL_ERROR);
			let message = error
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("unknown error")
				.to_string();
			return Err(TransportError::Rpc { code, message });
		}

		match body.get_mut("result") {
			Some(result) => Ok(result.take()),
			None => Err(TransportError::response_parse(
				"response has neither result nor error",
			)),
		}
	}
}

impl std::fmt::Debug for RemoteRpcStage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RemoteRpcStage")
			.field("url", &self.url.as_str())
			.finish_non_exhaustive()
	}
}

#[async_trait::async_trait]
impl ProviderStage for RemoteRpcStage {
	fn kind(&self) -> StageKind {
		StageKind::RemoteRpc
	}

	fn endpoint(&self) -> Option<&str> {
		Some(self.url.as_str())
	}

	async fn handle(&self, request: &RpcRequest, _next: Next<'_>) -> Result<Value, TransportError> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		tracing::debug!(method = %request.method, id, "sending rpc request");

		let response = self
			.client
			.post(self.url.clone())
			.json(&request.envelope(id))
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(TransportError::http(format!(
				"Request to {} failed with status {}: {}",
				self.url, status, body
			)));
		}

		let body: Value = response
			.json()
			.await
			.map_err(|e| TransportError::response_parse(e.to_string()))?;
		Self::extract_result(body)
	}
}
