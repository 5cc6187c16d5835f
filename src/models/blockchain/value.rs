//! Raw on-chain values and the semantic type tags used to render them.

use alloy::{dyn_abi::DynSolValue, primitives::U256};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Semantic type of a raw value, selecting how it is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ValueType {
	/// Rendered unchanged
	#[serde(rename = "string")]
	String,
	/// Wei amount rendered in whole ether units
	#[serde(rename = "uint256")]
	Uint256,
	/// Unix seconds rendered as a date
	#[serde(rename = "timestamp")]
	Timestamp,
	/// Block number rendered as the date of that block
	#[serde(rename = "blockNumber")]
	BlockNumber,
	/// Any tag this crate does not know; renders as nothing
	#[serde(other)]
	Unknown,
}

/// A primitive returned by a contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
	Text(String),
	Uint(U256),
}

impl RawValue {
	/// Numeric view of the value; decimal and `0x` strings are parsed
	pub fn as_u256(&self) -> Option<U256> {
		match self {
			Self::Uint(value) => Some(*value),
			Self::Text(text) => U256::from_str(text.trim()).ok(),
		}
	}

	pub fn as_u64(&self) -> Option<u64> {
		self.as_u256().and_then(|value| u64::try_from(value).ok())
	}

	pub fn as_u8(&self) -> Option<u8> {
		self.as_u256().and_then(|value| u8::try_from(value).ok())
	}
}

impl fmt::Display for RawValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::Uint(value) => write!(f, "{}", value),
		}
	}
}

impl TryFrom<DynSolValue> for RawValue {
	type Error = String;

	fn try_from(value: DynSolValue) -> Result<Self, Self::Error> {
		match value {
			DynSolValue::Uint(value, _) => Ok(Self::Uint(value)),
			DynSolValue::Int(value, _) => Ok(Self::Text(value.to_string())),
			DynSolValue::String(text) => Ok(Self::Text(text)),
			DynSolValue::Bool(flag) => Ok(Self::Text(flag.to_string())),
			DynSolValue::Address(address) => Ok(Self::Text(address.to_checksum(None))),
			DynSolValue::FixedBytes(word, size) => Ok(Self::Text(format!(
				"0x{}",
				hex::encode(&word[..size.min(32)])
			))),
			DynSolValue::Bytes(bytes) => Ok(Self::Text(format!("0x{}", hex::encode(bytes)))),
			other => Err(format!("Unsupported return value: {:?}", other)),
		}
	}
}
