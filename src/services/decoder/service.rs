//! Value decoder service.
//!
//! Maps a raw value and its declared [`ValueType`] to a display string. Only the
//! `blockNumber` tag touches the network, with a single block lookup.

use crate::{
	models::{RawValue, ValueType},
	services::blockchain::{BlockChainError, NodeHandle},
	utils::{format_date, from_wei, DEFAULT_DATE_FORMAT},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecoder {
	date_format: String,
}

impl ValueDecoder {
	/// Creates a decoder rendering dates with the `strftime` pattern `date_format`
	pub fn new(date_format: impl Into<String>) -> Self {
		Self {
			date_format: date_format.into(),
		}
	}

	/// Renders Unix `seconds` as a UTC date
	pub fn format_timestamp(&self, seconds: u64) -> Option<String> {
		let seconds = i64::try_from(seconds).ok()?;
		format_date(seconds, &self.date_format)
	}

	/// Decodes `raw` under `value_type`.
	///
	/// Values that cannot be read under their tag, and unknown tags, decode to `None`.
	/// Only a failed block lookup is an error.
	pub async fn decode(
		&self,
		raw: &RawValue,
		value_type: ValueType,
		handle: &NodeHandle,
	) -> Result<Option<String>, BlockChainError> {
		let decoded = match value_type {
			ValueType::String => Some(raw.to_string()),
			ValueType::Uint256 => raw.as_u256().map(from_wei),
			ValueType::Timestamp => raw.as_u64().and_then(|seconds| self.format_timestamp(seconds)),
			ValueType::BlockNumber => match raw.as_u64() {
				Some(number) => {
					let seconds = handle.block_timestamp(number).await?;
					self.format_timestamp(seconds)
				}
				None => None,
			},
			ValueType::Unknown => None,
		};
		Ok(decoded)
	}
}

impl Default for ValueDecoder {
	fn default() -> Self {
		Self::new(DEFAULT_DATE_FORMAT)
	}
}
