//! Unit and date conversions used when rendering on-chain values.

use alloy::primitives::U256;
use chrono::{DateTime, Utc};

/// Number of decimals of the base on-chain unit (wei)
pub const ETHER_DECIMALS: u8 = 18;

/// Default `strftime` pattern for date-only rendering
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Divides `value` by `10^decimals` and renders the exact quotient in base 10.
///
/// Trailing zeros of the fractional part are dropped, so `1500` with 3 decimals is `1.5`
/// and `1000` with 3 decimals is `1`.
pub fn scale_down(value: U256, decimals: u8) -> String {
	let digits = value.to_string();
	let decimals = decimals as usize;
	if decimals == 0 {
		return digits;
	}

	let padded = format!("{:0>width$}", digits, width = decimals + 1);
	let (whole, fraction) = padded.split_at(padded.len() - decimals);
	let fraction = fraction.trim_end_matches('0');

	if fraction.is_empty() {
		whole.to_string()
	} else {
		format!("{}.{}", whole, fraction)
	}
}

/// Converts a wei amount to whole ether units
pub fn from_wei(value: U256) -> String {
	scale_down(value, ETHER_DECIMALS)
}

/// Renders Unix `seconds` as a UTC date using `format`.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn format_date(seconds: i64, format: &str) -> Option<String> {
	DateTime::<Utc>::from_timestamp(seconds, 0).map(|date| date.format(format).to_string())
}
