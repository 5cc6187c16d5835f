//! Configuration loading and validation.

use std::path::Path;

mod endpoint_config;
mod error;
mod sale_config;

pub use endpoint_config::RPC_URL_ENV;
pub use error::ConfigError;

/// Common interface for loading directory-based configuration files
pub trait ConfigLoader: Sized {
	/// Loads every JSON file of `path` (or the default directory) into a keyed collection
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	/// Loads and validates a single file
	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Checks the loaded values
	fn validate(&self) -> Result<(), ConfigError>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
