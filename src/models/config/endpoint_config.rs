//! Loading of the endpoint configuration file.

use std::path::Path;
use url::Url;

use crate::{
	models::{config::error::ConfigError, EndpointConfig},
	utils::is_valid_date_format,
};

/// Environment variable overriding the configured endpoint URL
pub const RPC_URL_ENV: &str = "RPC_URL";

impl EndpointConfig {
	/// Loads `path`, resolves relative directories against the file's directory and
	/// validates the result.
	pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path).map_err(|e| {
			ConfigError::file_error(format!("Failed to open {}: {}", path.display(), e))
		})?;
		let mut config: EndpointConfig = serde_json::from_reader(file)?;

		if let Some(base) = path.parent() {
			if config.abi_dir.is_relative() {
				config.abi_dir = base.join(&config.abi_dir);
			}
			if config.sales_dir.is_relative() {
				config.sales_dir = base.join(&config.sales_dir);
			}
		}

		config.validate()?;
		Ok(config)
	}

	/// Replaces `rpc_url` with the value of `RPC_URL` when it is set
	pub fn with_env_override(self) -> Result<Self, ConfigError> {
		self.with_rpc_override(std::env::var(RPC_URL_ENV).ok())
	}

	fn with_rpc_override(mut self, rpc_url: Option<String>) -> Result<Self, ConfigError> {
		if let Some(rpc_url) = rpc_url.filter(|url| !url.trim().is_empty()) {
			self.rpc_url = rpc_url.trim().to_string();
			self.validate()?;
		}
		Ok(self)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		let url = Url::parse(&self.rpc_url).map_err(|e| {
			ConfigError::validation_error(format!("Invalid rpc_url '{}': {}", self.rpc_url, e))
		})?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfigError::validation_error(
				"rpc_url must start with http:// or https://",
			));
		}

		if !is_valid_date_format(&self.date_format) {
			return Err(ConfigError::validation_error(format!(
				"Invalid date_format '{}'",
				self.date_format
			)));
		}

		if self.probe_timeout_ms == 0 {
			return Err(ConfigError::validation_error(
				"probe_timeout_ms must be greater than 0",
			));
		}

		Ok(())
	}
}
