//! Sale descriptor loading.
//!
//! Every `*.json` file of the sales directory describes one sale. The table is keyed by
//! the normalized sale address, so file names are free-form.

use std::path::Path;

use crate::{
	models::{
		config::error::ConfigError, ConfigLoader, DerivationRule, SaleDescriptor, ValueType,
	},
	utils::{normalize_address, parse_address},
};

impl ConfigLoader for SaleDescriptor {
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let sales_dir = path.unwrap_or(Path::new("config/sales"));
		let mut pairs: Vec<(String, Self)> = Vec::new();

		if !sales_dir.exists() {
			return Err(ConfigError::file_error(format!(
				"sales directory not found: {}",
				sales_dir.display()
			)));
		}

		let mut paths = Vec::new();
		for entry in std::fs::read_dir(sales_dir)? {
			let path = entry?.path();
			if Self::is_json_file(&path) {
				paths.push(path);
			}
		}
		paths.sort();

		for path in paths {
			let descriptor = Self::load_from_path(&path)?;
			let key = normalize_address(&descriptor.address);
			if pairs.iter().any(|(existing, _)| existing == &key) {
				return Err(ConfigError::validation_error(format!(
					"Duplicate sale descriptor for {} in {}",
					key,
					path.display()
				)));
			}
			pairs.push((key, descriptor));
		}

		Ok(T::from_iter(pairs))
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let descriptor: SaleDescriptor = serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(format!("{}: {}", path.display(), e))
		})?;

		descriptor.validate()?;
		Ok(descriptor)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		parse_address(&self.address).map_err(ConfigError::validation_error)?;

		if let Some(token_contract) = &self.token_contract {
			parse_address(token_contract).map_err(ConfigError::validation_error)?;
		}

		for (field, rule) in self.active_rules() {
			if field.trim().is_empty() {
				return Err(ConfigError::validation_error(format!(
					"Sale {} declares a parameter with an empty name",
					self.address
				)));
			}

			if let DerivationRule::Call { method, value_type } = rule {
				if method.trim().is_empty() {
					return Err(ConfigError::validation_error(format!(
						"Parameter '{}' of sale {} has no method",
						field, self.address
					)));
				}
				if *value_type == ValueType::Unknown {
					log::warn!(
						"Parameter '{}' of sale {} uses an unknown type and will render empty",
						field,
						self.address
					);
				}
			}
		}

		Ok(())
	}
}
