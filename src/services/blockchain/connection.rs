//! Ownership of the current node handle.
//!
//! A [`NodeContext`] is the single owner of the handle every resolution runs against.
//! Its lifecycle is create, start, use, replace: replacing the handle stops the old
//! one, so proxies built from it fail instead of silently talking to a stale chain.

use tracing::instrument;

use crate::{
	models::EndpointConfig,
	services::blockchain::{
		transports::{
			CacheStage, FilterStage, FixtureStage, NodeHandle, NonceTrackerStage, Pipeline,
			ProviderStage, RemoteRpcStage,
		},
		BlockChainError, ConnectionGuard, ReasonCode,
	},
};

/// Outcome of [`NodeContext::establish`], delivered to the dispatch callback
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
	/// The endpoint did not answer the probe; no handle was created
	Failed { reason: ReasonCode },
	/// A fresh handle is now the current one
	Established(NodeHandle),
}

fn boxed(stage: impl ProviderStage + 'static) -> Option<Box<dyn ProviderStage>> {
	Some(Box::new(stage))
}

/// Builds the standard chain: fixture, cache, filter, nonce tracking, remote RPC
pub fn create_engine(rpc_url: &str) -> Result<Pipeline, BlockChainError> {
	Pipeline::compose([
		boxed(FixtureStage::with_defaults()),
		boxed(CacheStage::new()),
		boxed(FilterStage::new()),
		boxed(NonceTrackerStage::new()),
		boxed(RemoteRpcStage::new(rpc_url)?),
	])
}

/// Owner of the current node handle
#[derive(Debug)]
pub struct NodeContext {
	config: EndpointConfig,
	guard: ConnectionGuard,
	current: Option<NodeHandle>,
}

impl NodeContext {
	pub fn new(config: EndpointConfig) -> Self {
		let guard = ConnectionGuard::from_config(&config);
		Self {
			config,
			guard,
			current: None,
		}
	}

	/// The current handle, if a connection was established
	pub fn current(&self) -> Option<&NodeHandle> {
		self.current.as_ref()
	}

	async fn connect(&self) -> Result<NodeHandle, BlockChainError> {
		let handle = create_engine(&self.config.rpc_url)?.start().await?;
		tracing::info!("{} new connection", self.config.rpc_url);
		Ok(handle)
	}

	fn replace(&mut self, handle: NodeHandle) {
		if let Some(old) = self.current.replace(handle) {
			old.stop();
			tracing::debug!(generation = old.generation(), "replaced node handle");
		}
	}

	/// Returns the current handle, creating it on first use.
	///
	/// The endpoint is probed on every call.
	pub async fn handle(&mut self) -> Result<NodeHandle, BlockChainError> {
		self.guard.ensure_connected().await?;

		if let Some(handle) = &self.current {
			return Ok(handle.clone());
		}

		let handle = self.connect().await?;
		self.current = Some(handle.clone());
		Ok(handle)
	}

	/// Probes the endpoint and replaces the current handle with a fresh one
	pub async fn reconnect(&mut self) -> Result<NodeHandle, BlockChainError> {
		self.guard.ensure_connected().await?;
		let handle = self.connect().await?;
		self.replace(handle.clone());
		Ok(handle)
	}

	/// Runs the connection flow and reports its outcome through `dispatch`.
	///
	/// An unreachable endpoint dispatches [`ConnectionEvent::Failed`] and leaves the
	/// current handle untouched. Only errors building the pipeline are returned.
	#[instrument(skip_all, fields(rpc_url = %self.config.rpc_url))]
	pub async fn establish<F>(&mut self, dispatch: F) -> Result<(), BlockChainError>
	where
		F: FnOnce(ConnectionEvent),
	{
		if let Err(error) = self.guard.ensure_connected().await {
			dispatch(ConnectionEvent::Failed {
				reason: error.reason().unwrap_or(ReasonCode::Web3ConnectionFail),
			});
			return Ok(());
		}

		let handle = self.connect().await?;
		self.replace(handle.clone());
		dispatch(ConnectionEvent::Established(handle));
		Ok(())
	}
}
