use alloy::json_abi::JsonAbi;
use serde_json::json;
use std::collections::BTreeMap;

use ico_resolver::{
	models::{DerivationRule, SaleDescriptor, ValueType},
	repositories::InterfaceRepository,
};

pub const SALE_ADDRESS: &str = "0x1111111111111111111111111111111111111111";
pub const TOKEN_ADDRESS: &str = "0x2222222222222222222222222222222222222222";

/// Interface declaring the zero-argument view methods `methods` as `(name, output type)`
pub fn create_test_abi(methods: &[(&str, &str)]) -> JsonAbi {
	let entries: Vec<_> = methods
		.iter()
		.map(|(name, output)| {
			json!({
				"type": "function",
				"name": name,
				"inputs": [],
				"outputs": [{ "name": "", "type": output }],
				"stateMutability": "view",
			})
		})
		.collect();
	InterfaceRepository::parse(&json!(entries).to_string()).unwrap()
}

/// Interface of a standard token
pub fn create_token_abi() -> JsonAbi {
	create_test_abi(&[
		("name", "string"),
		("symbol", "string"),
		("decimals", "uint8"),
		("totalSupply", "uint256"),
	])
}

pub fn call_rule(method: &str, value_type: ValueType) -> Option<DerivationRule> {
	Some(DerivationRule::Call {
		method: method.to_string(),
		value_type,
	})
}

pub fn static_rule(value: &str) -> Option<DerivationRule> {
	Some(DerivationRule::Static {
		value: value.to_string(),
	})
}

pub fn create_test_descriptor(
	address: &str,
	token_contract: Option<&str>,
	parameters: Vec<(&str, Option<DerivationRule>)>,
) -> SaleDescriptor {
	SaleDescriptor {
		address: address.to_string(),
		name: Some("Test sale".to_string()),
		token_contract: token_contract.map(str::to_string),
		parameters: parameters
			.into_iter()
			.map(|(field, rule)| (field.to_string(), rule))
			.collect::<BTreeMap<_, _>>(),
	}
}
