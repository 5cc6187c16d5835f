//! Bootstrap module for loading configuration and wiring the services.
//!
//! # Services
//! - `ConstantResolver`: resolves sale descriptors, backed by the sale and interface
//!   repositories of the configured directories
//! - `NodeContext`: owns the node handle the resolver runs against

use std::path::Path;

use crate::{
	models::EndpointConfig,
	repositories::{InterfaceRepository, SaleRepository},
	services::{
		blockchain::{BlockChainError, ContractFactory, NodeContext},
		decoder::ValueDecoder,
		resolver::ConstantResolver,
	},
};

/// Default location of the endpoint configuration
pub const DEFAULT_CONFIG_PATH: &str = "config/app.json";

/// Loads the endpoint configuration at `path`, applying the `RPC_URL` override
pub fn load_config(path: &Path) -> Result<EndpointConfig, BlockChainError> {
	let config = EndpointConfig::load_from_path(path)?.with_env_override()?;
	Ok(config)
}

/// Builds the resolver and an unconnected node context for `config`.
///
/// # Errors
/// Returns a configuration error when the sale descriptors cannot be loaded
pub fn initialize_services(
	config: &EndpointConfig,
) -> Result<(ConstantResolver, NodeContext), BlockChainError> {
	let sales = SaleRepository::new(Some(config.sales_dir.as_path()))?;
	let interfaces = InterfaceRepository::new(&config.abi_dir);

	let resolver = ConstantResolver::new(
		sales,
		ContractFactory::new(interfaces),
		ValueDecoder::new(&config.date_format),
		config.default_decimals,
	);

	Ok((resolver, NodeContext::new(config.clone())))
}
