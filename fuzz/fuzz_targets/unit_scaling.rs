#![no_main]

use alloy::primitives::U256;
use ico_resolver::utils::{format_date, scale_down, DEFAULT_DATE_FORMAT};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: ([u8; 32], u8, i64)| {
	let (bytes, decimals, seconds) = input;
	let value = U256::from_be_bytes(bytes);

	let rendered = scale_down(value, decimals);
	assert!(!rendered.is_empty());
	assert!(!rendered.ends_with('.'));
	assert!(rendered.chars().all(|c| c.is_ascii_digit() || c == '.'));

	let _ = format_date(seconds, DEFAULT_DATE_FORMAT);
});
