//! Contract proxies bound to a node handle.

use alloy::{
	dyn_abi::{FunctionExt, JsonAbiExt},
	json_abi::{Function, JsonAbi},
	primitives::Address,
};
use std::sync::Arc;

use crate::{
	models::RawValue,
	repositories::{InterfaceRepository, InterfaceRepositoryTrait},
	services::blockchain::{transports::NodeHandle, BlockChainError},
	utils::parse_address,
};

/// A contract's interface description bound to a live handle
///
/// Proxies are built per resolution and never cached; once their handle is replaced
/// every call fails.
#[derive(Debug, Clone)]
pub struct ContractProxy {
	address: Address,
	abi: Arc<JsonAbi>,
	handle: NodeHandle,
}

impl ContractProxy {
	pub fn new(address: Address, abi: Arc<JsonAbi>, handle: NodeHandle) -> Self {
		Self {
			address,
			abi,
			handle,
		}
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn handle(&self) -> &NodeHandle {
		&self.handle
	}

	/// Zero-argument overload of `name`
	fn read_method(&self, name: &str) -> Option<&Function> {
		self.abi
			.function(name)?
			.iter()
			.find(|function| function.inputs.is_empty())
	}

	/// Whether the interface declares a zero-argument method `name`
	pub fn has_method(&self, name: &str) -> bool {
		self.read_method(name).is_some()
	}

	/// Calls the read method `name` and returns its first output.
	///
	/// `None` when the method is not declared, declares no outputs, or the node
	/// returns no data (no code at the address).
	pub async fn call(&self, name: &str) -> Result<Option<RawValue>, BlockChainError> {
		let Some(function) = self.read_method(name) else {
			return Ok(None);
		};
		if function.outputs.is_empty() {
			return Ok(None);
		}

		let data = function.abi_encode_input(&[]).map_err(|e| {
			BlockChainError::configuration_error(format!("Failed to encode {}(): {}", name, e))
		})?;
		let output = self.handle.call(self.address, &data).await?;
		if output.is_empty() {
			tracing::debug!(address = %self.address, method = name, "call returned no data");
			return Ok(None);
		}

		let mut values = function.abi_decode_output(&output).map_err(|e| {
			BlockChainError::resolution_error(format!("Failed to decode {}(): {}", name, e))
		})?;
		if values.is_empty() {
			return Ok(None);
		}

		RawValue::try_from(values.swap_remove(0))
			.map(Some)
			.map_err(BlockChainError::resolution_error)
	}
}

/// Produces contract proxies from interface descriptions
#[derive(Debug)]
pub struct ContractFactory<I: InterfaceRepositoryTrait = InterfaceRepository> {
	interfaces: Arc<I>,
}

impl<I: InterfaceRepositoryTrait> ContractFactory<I> {
	pub fn new(interfaces: I) -> Self {
		Self {
			interfaces: Arc::new(interfaces),
		}
	}

	/// Binds the interface description of `address` to `handle`.
	///
	/// Returns `Ok(None)` while no handle exists yet.
	pub fn get_contract_proxy(
		&self,
		handle: Option<&NodeHandle>,
		address: &str,
	) -> Result<Option<ContractProxy>, BlockChainError> {
		let Some(handle) = handle else {
			return Ok(None);
		};

		let parsed = parse_address(address).map_err(BlockChainError::configuration_error)?;
		let abi = self.interfaces.get(address)?;
		Ok(Some(ContractProxy::new(parsed, abi, handle.clone())))
	}
}

impl<I: InterfaceRepositoryTrait> Clone for ContractFactory<I> {
	fn clone(&self) -> Self {
		Self {
			interfaces: self.interfaces.clone(),
		}
	}
}
