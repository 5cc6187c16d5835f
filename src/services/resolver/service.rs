//! Constant resolver service.
//!
//! Resolution runs in a fixed order:
//!
//! 1. look the descriptor up and pick the query target (`token_contract` or the sale)
//! 2. fetch `name`, `totalSupply`, `symbol` and `decimals` concurrently
//! 3. scale the supply by `10^decimals` (configured default when `decimals` is missing)
//! 4. apply the derivation rules concurrently, in descriptor order
//! 5. re-read `decimals`, overriding whatever the rules stored

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::instrument;

use crate::{
	models::{ConstantRecord, RawValue},
	repositories::{
		InterfaceRepository, InterfaceRepositoryTrait, SaleRepository, SaleRepositoryTrait,
	},
	services::{
		blockchain::{BlockChainError, ContractFactory, ContractProxy, NodeHandle},
		decoder::ValueDecoder,
	},
	utils::{normalize_address, scale_down},
};

/// Resolves sale descriptors into [`ConstantRecord`]s
pub struct ConstantResolver<
	S: SaleRepositoryTrait = SaleRepository,
	I: InterfaceRepositoryTrait = InterfaceRepository,
> {
	sales: Arc<S>,
	factory: ContractFactory<I>,
	decoder: ValueDecoder,
	default_decimals: u8,
}

impl<S: SaleRepositoryTrait, I: InterfaceRepositoryTrait> ConstantResolver<S, I> {
	pub fn new(
		sales: S,
		factory: ContractFactory<I>,
		decoder: ValueDecoder,
		default_decimals: u8,
	) -> Self {
		Self {
			sales: Arc::new(sales),
			factory,
			decoder,
			default_decimals,
		}
	}

	/// Normalized addresses of every configured sale, sorted
	pub fn addresses(&self) -> Vec<String> {
		let mut addresses: Vec<String> = self.sales.get_all().into_keys().collect();
		addresses.sort();
		addresses
	}

	async fn decimals(&self, proxy: &ContractProxy) -> Result<u8, BlockChainError> {
		Ok(proxy
			.call("decimals")
			.await?
			.as_ref()
			.and_then(RawValue::as_u8)
			.unwrap_or(self.default_decimals))
	}

	async fn direct_fields(&self, proxy: &ContractProxy) -> Result<ConstantRecord, BlockChainError> {
		let (name, total_supply, symbol, decimals) = tokio::try_join!(
			proxy.call("name"),
			proxy.call("totalSupply"),
			proxy.call("symbol"),
			self.decimals(proxy),
		)?;

		let total_supply = total_supply
			.as_ref()
			.and_then(RawValue::as_u256)
			.map(|supply| scale_down(supply, decimals));

		Ok(ConstantRecord::new(
			name.map(|value| value.to_string()),
			total_supply,
			symbol.map(|value| value.to_string()),
			decimals,
		))
	}

	/// Resolves the sale at `address` against `handle`
	#[instrument(skip(self, handle), fields(generation = handle.generation()))]
	pub async fn resolve(
		&self,
		handle: &NodeHandle,
		address: &str,
	) -> Result<ConstantRecord, BlockChainError> {
		let descriptor = self
			.sales
			.get(address)
			.ok_or_else(|| BlockChainError::descriptor_not_found(normalize_address(address)))?;

		let target = descriptor.query_address();
		let proxy = self
			.factory
			.get_contract_proxy(Some(handle), target)?
			.ok_or_else(|| BlockChainError::resolution_error("No node handle to resolve against"))?;

		tracing::debug!(sale = %address, target = %target, "resolving sale constants");
		let mut record = self.direct_fields(&proxy).await?;

		let rules: Vec<_> = descriptor.active_rules().collect();
		let derived = try_join_all(
			rules
				.iter()
				.map(|(_, rule)| rule.derive(&proxy, &self.decoder)),
		)
		.await?;
		for ((field, _), value) in rules.iter().zip(derived) {
			record.insert(field, value);
		}

		record.decimals = self.decimals(&proxy).await?;
		Ok(record)
	}
}
