use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::ValueType;

/// Static description of one token sale
///
/// Descriptors are loaded once from configuration and never mutated. The sale contract
/// and the token contract are often distinct deployments, so `token_contract` redirects
/// the direct field queries (`name`, `symbol`, ...) to the token when set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SaleDescriptor {
	/// Address of the sale contract
	pub address: String,
	/// Display label of the sale
	#[serde(default)]
	pub name: Option<String>,
	/// Alternate contract to query for the token fields
	#[serde(default)]
	pub token_contract: Option<String>,
	/// Sale-specific record fields; a `null` rule is skipped
	#[serde(default)]
	pub parameters: BTreeMap<String, Option<DerivationRule>>,
}

impl SaleDescriptor {
	/// Address the direct token fields are read from
	pub fn query_address(&self) -> &str {
		self.token_contract.as_deref().unwrap_or(&self.address)
	}

	/// Iterates over the rules that actually derive a value
	pub fn active_rules(&self) -> impl Iterator<Item = (&String, &DerivationRule)> {
		self.parameters
			.iter()
			.filter_map(|(field, rule)| rule.as_ref().map(|rule| (field, rule)))
	}
}

/// How one record field is computed from a live contract
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivationRule {
	/// Calls a zero-argument read method and decodes its first output
	Call {
		method: String,
		#[serde(rename = "type")]
		value_type: ValueType,
	},
	/// A fixed display value
	Static { value: String },
}
