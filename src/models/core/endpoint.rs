use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::DEFAULT_DATE_FORMAT;

/// Connection and rendering settings shared by every resolution
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
	/// JSON-RPC endpoint of the node
	pub rpc_url: String,
	/// Decimal count assumed for tokens that do not expose `decimals()`
	#[serde(default = "default_decimals")]
	pub default_decimals: u8,
	/// `strftime` pattern used for timestamp and block-number fields
	#[serde(default = "default_date_format")]
	pub date_format: String,
	/// Timeout of the reachability probe in milliseconds
	#[serde(default = "default_probe_timeout_ms")]
	pub probe_timeout_ms: u64,
	/// Directory of interface descriptions, one `<address>.json` ABI per contract
	#[serde(default = "default_abi_dir")]
	pub abi_dir: PathBuf,
	/// Directory of sale descriptors
	#[serde(default = "default_sales_dir")]
	pub sales_dir: PathBuf,
}

fn default_decimals() -> u8 {
	18
}

fn default_date_format() -> String {
	DEFAULT_DATE_FORMAT.to_string()
}

fn default_probe_timeout_ms() -> u64 {
	5_000
}

fn default_abi_dir() -> PathBuf {
	PathBuf::from("config/abis")
}

fn default_sales_dir() -> PathBuf {
	PathBuf::from("config/sales")
}

impl EndpointConfig {
	/// Creates a configuration for `rpc_url` with every other setting defaulted
	pub fn new(rpc_url: impl Into<String>) -> Self {
		Self {
			rpc_url: rpc_url.into(),
			default_decimals: default_decimals(),
			date_format: default_date_format(),
			probe_timeout_ms: default_probe_timeout_ms(),
			abi_dir: default_abi_dir(),
			sales_dir: default_sales_dir(),
		}
	}
}
