#![no_main]

use ico_resolver::utils::{normalize_address, parse_address, parse_quantity, to_quantity};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
	let Ok(text) = std::str::from_utf8(data) else {
		return;
	};

	if let Some(quantity) = parse_quantity(&Value::String(text.to_string())) {
		assert_eq!(
			parse_quantity(&Value::String(to_quantity(quantity))),
			Some(quantity)
		);
	}

	let normalized = normalize_address(text);
	assert!(normalized.starts_with("0x"));
	if let Ok(address) = parse_address(text) {
		assert_eq!(parse_address(&address.to_checksum(None)), Ok(address));
	}
});
