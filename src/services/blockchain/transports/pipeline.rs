//! Composition of provider stages into a pipeline.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::services::blockchain::{
	transports::{NodeHandle, ProviderStage, StageKind},
	BlockChainError,
};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// An ordered, not yet started chain of stages
pub struct Pipeline {
	stages: Vec<Box<dyn ProviderStage>>,
}

impl Pipeline {
	/// Composes `stages` in the given order.
	///
	/// `None` entries are skipped. The chain must end with exactly one terminal
	/// (remote RPC) stage.
	pub fn compose<I>(stages: I) -> Result<Self, BlockChainError>
	where
		I: IntoIterator<Item = Option<Box<dyn ProviderStage>>>,
	{
		let stages: Vec<Box<dyn ProviderStage>> = stages.into_iter().flatten().collect();

		let terminals: Vec<usize> = stages
			.iter()
			.enumerate()
			.filter(|(_, stage)| stage.kind().is_terminal())
			.map(|(position, _)| position)
			.collect();

		match terminals.as_slice() {
			[] => Err(BlockChainError::configuration_error(
				"Provider pipeline has no remote RPC stage",
			)),
			[position] if *position + 1 == stages.len() => Ok(Self { stages }),
			[_] => Err(BlockChainError::configuration_error(
				"The remote RPC stage must be the last stage of the pipeline",
			)),
			_ => Err(BlockChainError::configuration_error(
				"Provider pipeline has more than one remote RPC stage",
			)),
		}
	}

	/// Roles of the composed stages, in chain order
	pub fn stage_kinds(&self) -> Vec<StageKind> {
		self.stages.iter().map(|stage| stage.kind()).collect()
	}

	/// Starts every stage once and vends the handle.
	///
	/// Consuming the pipeline means a chain can only be started a single time.
	pub async fn start(self) -> Result<NodeHandle, BlockChainError> {
		for stage in &self.stages {
			stage.start().await.map_err(|e| {
				BlockChainError::configuration_error(format!(
					"Failed to start {} stage: {}",
					stage.kind(),
					e
				))
			})?;
		}

		let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
		tracing::debug!(generation, stages = ?self.stage_kinds(), "provider pipeline started");
		Ok(NodeHandle::new(generation, self.stages))
	}
}
