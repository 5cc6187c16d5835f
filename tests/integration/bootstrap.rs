use alloy::{dyn_abi::DynSolValue, primitives::U256};
use serde_json::json;
use std::{fs, path::Path};
use tempfile::TempDir;

use crate::integration::mocks::{boxed, start, FakeChain, SALE_ADDRESS, TOKEN_ADDRESS};
use ico_resolver::{
	bootstrap::{initialize_services, load_config},
	services::blockchain::BlockChainError,
};

fn write_json(path: &Path, value: serde_json::Value) {
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn write_config(dir: &TempDir) -> std::path::PathBuf {
	let config_path = dir.path().join("app.json");
	write_json(
		&config_path,
		json!({
			"rpc_url": "http://localhost:8545",
			"default_decimals": 0,
			"abi_dir": "abis",
			"sales_dir": "sales",
		}),
	);

	write_json(
		&dir.path().join("sales").join("sale.json"),
		json!({
			"address": SALE_ADDRESS,
			"name": "Example sale",
			"token_contract": TOKEN_ADDRESS,
			"parameters": {
				"startDate": { "kind": "call", "method": "startTime", "type": "timestamp" },
				"website": { "kind": "static", "value": "https://sale.example" },
				"bonus": null
			}
		}),
	);

	write_json(
		&dir.path().join("abis").join(format!("{}.json", TOKEN_ADDRESS)),
		json!([
			{ "type": "function", "name": "symbol", "inputs": [], "outputs": [{ "name": "", "type": "string" }], "stateMutability": "view" },
			{ "type": "function", "name": "totalSupply", "inputs": [], "outputs": [{ "name": "", "type": "uint256" }], "stateMutability": "view" },
			{ "type": "function", "name": "startTime", "inputs": [], "outputs": [{ "name": "", "type": "uint64" }], "stateMutability": "view" }
		]),
	);

	config_path
}

#[tokio::test]
async fn test_services_resolve_from_configuration_files() {
	let dir = TempDir::new().unwrap();
	let config = load_config(&write_config(&dir)).unwrap();
	assert_eq!(config.abi_dir, dir.path().join("abis"));
	assert_eq!(config.default_decimals, 0);

	let (resolver, context) = initialize_services(&config).unwrap();
	assert!(context.current().is_none());
	assert_eq!(resolver.addresses(), vec![SALE_ADDRESS.to_string()]);

	let chain = FakeChain::new()
		.with_return(TOKEN_ADDRESS, "symbol", DynSolValue::String("EXS".into()))
		.with_return(TOKEN_ADDRESS, "totalSupply", DynSolValue::Uint(U256::from(21_000_000u64), 256))
		.with_return(TOKEN_ADDRESS, "startTime", DynSolValue::Uint(U256::from(1_500_000_000u64), 64));
	let handle = start(vec![boxed(chain)]).await;

	let record = resolver.resolve(&handle, SALE_ADDRESS).await.unwrap();
	assert_eq!(
		serde_json::to_value(&record).unwrap(),
		json!({
			"name": null,
			"totalSupply": "21000000",
			"symbol": "EXS",
			"decimals": 0,
			"startDate": "2017-07-14",
			"website": "https://sale.example",
		})
	);
}

#[test]
fn test_missing_sales_directory_is_configuration_error() {
	let dir = TempDir::new().unwrap();
	let config_path = write_config(&dir);
	fs::remove_dir_all(dir.path().join("sales")).unwrap();

	let config = load_config(&config_path).unwrap();
	assert!(matches!(
		initialize_services(&config),
		Err(BlockChainError::ConfigurationError(_))
	));
}

#[test]
fn test_invalid_configuration_is_rejected() {
	let dir = TempDir::new().unwrap();
	let config_path = dir.path().join("app.json");
	write_json(&config_path, json!({ "rpc_url": "http://localhost:8545", "date_format": "" }));

	assert!(matches!(
		load_config(&config_path),
		Err(BlockChainError::ConfigurationError(_))
	));
}
