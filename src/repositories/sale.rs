//! Sale descriptor repository.

use std::{collections::HashMap, path::Path};

use crate::{
	models::{ConfigError, ConfigLoader, SaleDescriptor},
	repositories::error::RepositoryError,
	utils::normalize_address,
};

/// Address-keyed table of sale descriptors, loaded once
#[derive(Debug, Clone, Default)]
pub struct SaleRepository {
	pub sales: HashMap<String, SaleDescriptor>,
}

impl SaleRepository {
	/// Loads every descriptor of `path` (default `config/sales`)
	pub fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		let sales = SaleDescriptor::load_all(path).map_err(|e| match e {
			ConfigError::ValidationError(msg) => RepositoryError::validation_error(msg),
			other => RepositoryError::load_error(format!("Failed to load sales: {}", other)),
		})?;
		Ok(SaleRepository { sales })
	}

	/// Builds a repository from already validated descriptors
	pub fn from_descriptors(
		descriptors: impl IntoIterator<Item = SaleDescriptor>,
	) -> Result<Self, RepositoryError> {
		let mut sales = HashMap::new();
		for descriptor in descriptors {
			descriptor.validate()?;
			sales.insert(normalize_address(&descriptor.address), descriptor);
		}
		Ok(SaleRepository { sales })
	}
}

pub trait SaleRepositoryTrait: Send + Sync {
	/// Looks a descriptor up by sale address, in any casing
	fn get(&self, address: &str) -> Option<SaleDescriptor>;
	fn get_all(&self) -> HashMap<String, SaleDescriptor>;
}

impl SaleRepositoryTrait for SaleRepository {
	fn get(&self, address: &str) -> Option<SaleDescriptor> {
		self.sales.get(&normalize_address(address)).cloned()
	}

	fn get_all(&self) -> HashMap<String, SaleDescriptor> {
		self.sales.clone()
	}
}
