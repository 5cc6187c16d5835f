use crate::properties::strategies::{same_day_strategy, u256_strategy};
use alloy::primitives::U256;
use ico_resolver::utils::{format_date, from_wei, scale_down, DEFAULT_DATE_FORMAT};
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_from_wei_is_exact_division(value in u256_strategy()) {
		let unit = U256::from(10u64).pow(U256::from(18u8));
		let rendered = from_wei(value);

		let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
		prop_assert_eq!(whole, (value / unit).to_string());

		let remainder = (value % unit).to_string();
		let expected = format!("{:0>18}", remainder);
		prop_assert_eq!(fraction, expected.trim_end_matches('0'));
	}

	#[test]
	fn test_scale_down_has_no_trailing_zeros(value in u256_strategy(), decimals in 0u8..80) {
		let rendered = scale_down(value, decimals);
		prop_assert!(!rendered.ends_with('.'));
		if rendered.contains('.') {
			prop_assert!(!rendered.ends_with('0'));
		}
		if decimals == 0 {
			prop_assert_eq!(rendered, value.to_string());
		}
	}

	#[test]
	fn test_same_day_renders_same_date((a, b) in same_day_strategy()) {
		let first = format_date(a, DEFAULT_DATE_FORMAT);
		let second = format_date(b, DEFAULT_DATE_FORMAT);
		prop_assert!(first.is_some());
		prop_assert_eq!(&first, &second);
		prop_assert!(!first.unwrap().contains(':'));
	}
}
