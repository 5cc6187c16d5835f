use serde::Serialize;
use std::collections::BTreeMap;

/// Display-ready constants of one sale
///
/// Serializes as a flat object: the token fields followed by every derived field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantRecord {
	pub name: Option<String>,
	/// Supply already divided by `10^decimals`
	pub total_supply: Option<String>,
	pub symbol: Option<String>,
	pub decimals: u8,
	#[serde(flatten)]
	pub derived: BTreeMap<String, Option<String>>,
}

impl ConstantRecord {
	pub fn new(
		name: Option<String>,
		total_supply: Option<String>,
		symbol: Option<String>,
		decimals: u8,
	) -> Self {
		Self {
			name,
			total_supply,
			symbol,
			decimals,
			derived: BTreeMap::new(),
		}
	}

	/// Stores `value` under `field`.
	///
	/// Field names of the token fields overwrite them. A `decimals` value that is not a
	/// valid `u8` leaves the current one in place.
	pub fn insert(&mut self, field: &str, value: Option<String>) {
		match field {
			"name" => self.name = value,
			"symbol" => self.symbol = value,
			"totalSupply" => self.total_supply = value,
			"decimals" => {
				if let Some(decimals) = value.and_then(|v| v.trim().parse().ok()) {
					self.decimals = decimals;
				}
			}
			_ => {
				self.derived.insert(field.to_string(), value);
			}
		}
	}

	/// Looks a field up by its serialized name
	pub fn get(&self, field: &str) -> Option<String> {
		match field {
			"name" => self.name.clone(),
			"symbol" => self.symbol.clone(),
			"totalSupply" => self.total_supply.clone(),
			"decimals" => Some(self.decimals.to_string()),
			_ => self.derived.get(field).cloned().flatten(),
		}
	}
}
