//! Parsing utilities
//!
//! Helpers for the string encodings used by JSON-RPC (hex quantities, addresses) and by
//! the configuration files (date patterns).

use alloy::primitives::Address;
use chrono::format::{Item, StrftimeItems};
use serde_json::Value;
use std::str::FromStr;

/// Parses a JSON-RPC hex quantity (`"0x1b4"`) into a `u64`.
///
/// Plain JSON numbers are accepted as well since some nodes return them for
/// block numbers.
pub fn parse_quantity(value: &Value) -> Option<u64> {
	match value {
		Value::String(s) => {
			let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
			if digits.is_empty() {
				return None;
			}
			u64::from_str_radix(digits, 16).ok()
		}
		Value::Number(n) => n.as_u64(),
		_ => None,
	}
}

/// Renders a `u64` as a JSON-RPC hex quantity
pub fn to_quantity(value: u64) -> String {
	format!("0x{:x}", value)
}

/// Normalizes an address string to lowercase with a `0x` prefix.
pub fn normalize_address(address: &str) -> String {
	let trimmed = address.trim();
	let bare = trimmed
		.strip_prefix("0x")
		.or_else(|| trimmed.strip_prefix("0X"))
		.unwrap_or(trimmed);
	format!("0x{}", bare.to_lowercase())
}

/// Parses an address with or without checksum casing
pub fn parse_address(address: &str) -> Result<Address, String> {
	Address::from_str(&normalize_address(address))
		.map_err(|e| format!("Invalid address '{}': {}", address, e))
}

/// Returns true when `format` is a `strftime` pattern chrono can render
pub fn is_valid_date_format(format: &str) -> bool {
	!format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
