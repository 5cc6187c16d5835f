//! Interface description repository.
//!
//! Interface descriptions are JSON ABI files named after the contract address. They are
//! read on first use and kept for the lifetime of the repository since they never change
//! at runtime.

use alloy::json_abi::JsonAbi;
use serde_json::Value;
use std::{
	collections::HashMap,
	path::{Path, PathBuf},
	sync::{Arc, RwLock},
};

use crate::{
	repositories::error::RepositoryError,
	utils::{normalize_address, parse_address},
};

pub trait InterfaceRepositoryTrait: Send + Sync {
	/// Returns the parsed interface description of `address`
	fn get(&self, address: &str) -> Result<Arc<JsonAbi>, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct InterfaceRepository {
	dir: Option<PathBuf>,
	loaded: RwLock<HashMap<String, Arc<JsonAbi>>>,
}

impl InterfaceRepository {
	/// Reads interface descriptions from `dir` on demand
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: Some(dir.into()),
			loaded: RwLock::new(HashMap::new()),
		}
	}

	/// Serves only the given descriptions
	pub fn with_interfaces(interfaces: impl IntoIterator<Item = (String, JsonAbi)>) -> Self {
		let loaded = interfaces
			.into_iter()
			.map(|(address, abi)| (normalize_address(&address), Arc::new(abi)))
			.collect();
		Self {
			dir: None,
			loaded: RwLock::new(loaded),
		}
	}

	/// Parses an interface description.
	///
	/// Accepts a bare ABI array as well as a build artifact object carrying it under `abi`.
	pub fn parse(contents: &str) -> Result<JsonAbi, RepositoryError> {
		let value: Value = serde_json::from_str(contents).map_err(|e| {
			RepositoryError::validation_error(format!("Malformed interface description: {}", e))
		})?;
		let abi = match value {
			Value::Object(mut artifact) => artifact.remove("abi").ok_or_else(|| {
				RepositoryError::validation_error("Interface description object has no 'abi' field")
			})?,
			other => other,
		};
		serde_json::from_value(abi).map_err(|e| {
			RepositoryError::validation_error(format!("Malformed interface description: {}", e))
		})
	}

	fn candidate_paths(dir: &Path, address: &str) -> Vec<PathBuf> {
		let mut names = vec![address.trim().to_string(), normalize_address(address)];
		if let Ok(parsed) = parse_address(address) {
			names.push(parsed.to_checksum(None));
		}
		names.dedup();
		names
			.into_iter()
			.map(|name| dir.join(format!("{}.json", name)))
			.collect()
	}

	fn cached(&self, key: &str) -> Option<Arc<JsonAbi>> {
		self.loaded
			.read()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.get(key)
			.cloned()
	}
}

impl InterfaceRepositoryTrait for InterfaceRepository {
	fn get(&self, address: &str) -> Result<Arc<JsonAbi>, RepositoryError> {
		let key = normalize_address(address);
		if let Some(abi) = self.cached(&key) {
			return Ok(abi);
		}

		let dir = self
			.dir
			.as_ref()
			.ok_or_else(|| RepositoryError::not_found(key.clone()))?;
		let path = Self::candidate_paths(dir, address)
			.into_iter()
			.find(|path| path.is_file())
			.ok_or_else(|| RepositoryError::not_found(key.clone()))?;

		let contents = std::fs::read_to_string(&path).map_err(|e| {
			RepositoryError::load_error(format!("Failed to read {}: {}", path.display(), e))
		})?;
		let abi = Arc::new(Self::parse(&contents)?);

		tracing::debug!(address = %key, path = %path.display(), "loaded interface description");
		self.loaded
			.write()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.insert(key, abi.clone());
		Ok(abi)
	}
}
