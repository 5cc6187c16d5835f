use alloy::{dyn_abi::DynSolValue, primitives::U256};
use std::collections::HashMap;
use tracing_test::traced_test;

use crate::integration::mocks::{
	boxed, call_rule, create_test_abi, create_test_descriptor, create_token_abi, start,
	static_rule, FakeChain, MockSaleRepository, SALE_ADDRESS, TOKEN_ADDRESS,
};
use ico_resolver::{
	models::{SaleDescriptor, ValueType},
	repositories::{InterfaceRepository, SaleRepository},
	services::{
		blockchain::{BlockChainError, ContractFactory, NodeHandle},
		decoder::ValueDecoder,
		resolver::ConstantResolver,
	},
};

fn uint(value: u128) -> DynSolValue {
	DynSolValue::Uint(U256::from(value), 256)
}

fn resolver(
	descriptors: Vec<SaleDescriptor>,
	interfaces: Vec<(&str, alloy::json_abi::JsonAbi)>,
) -> ConstantResolver {
	ConstantResolver::new(
		SaleRepository::from_descriptors(descriptors).unwrap(),
		ContractFactory::new(InterfaceRepository::with_interfaces(
			interfaces
				.into_iter()
				.map(|(address, abi)| (address.to_string(), abi)),
		)),
		ValueDecoder::default(),
		18,
	)
}

fn token_chain() -> FakeChain {
	FakeChain::new()
		.with_return(TOKEN_ADDRESS, "name", DynSolValue::String("Token".into()))
		.with_return(TOKEN_ADDRESS, "symbol", DynSolValue::String("TKN".into()))
		.with_return(TOKEN_ADDRESS, "decimals", DynSolValue::Uint(U256::from(8u8), 8))
		.with_return(TOKEN_ADDRESS, "totalSupply", uint(150_000_000_000))
}

#[tokio::test]
async fn test_resolves_direct_fields_and_rules() {
	let chain = token_chain()
		.with_return(TOKEN_ADDRESS, "startTime", uint(1_500_000_000))
		.with_return(TOKEN_ADDRESS, "startBlock", uint(4_000_000))
		.with_return(TOKEN_ADDRESS, "cap", uint(2_500_000_000_000_000_000))
		.with_block(4_000_000, 1_500_086_400);
	let handle = start(vec![boxed(chain)]).await;

	let mut abi = vec![
		("name", "string"),
		("symbol", "string"),
		("decimals", "uint8"),
		("totalSupply", "uint256"),
	];
	abi.extend([("startTime", "uint256"), ("startBlock", "uint256"), ("cap", "uint256")]);

	let resolver = resolver(
		vec![create_test_descriptor(
			TOKEN_ADDRESS,
			None,
			vec![
				("startDate", call_rule("startTime", ValueType::Timestamp)),
				("openingDate", call_rule("startBlock", ValueType::BlockNumber)),
				("hardCap", call_rule("cap", ValueType::Uint256)),
				("currency", static_rule("ETH")),
				("ignored", None),
				("mystery", call_rule("cap", ValueType::Unknown)),
			],
		)],
		vec![(TOKEN_ADDRESS, create_test_abi(&abi))],
	);

	let record = resolver.resolve(&handle, TOKEN_ADDRESS).await.unwrap();
	assert_eq!(record.name.as_deref(), Some("Token"));
	assert_eq!(record.symbol.as_deref(), Some("TKN"));
	assert_eq!(record.decimals, 8);
	assert_eq!(record.total_supply.as_deref(), Some("1500"));
	assert_eq!(record.get("startDate").as_deref(), Some("2017-07-14"));
	assert_eq!(record.get("openingDate").as_deref(), Some("2017-07-15"));
	assert_eq!(record.get("hardCap").as_deref(), Some("2.5"));
	assert_eq!(record.get("currency").as_deref(), Some("ETH"));
	assert!(!record.derived.contains_key("ignored"));
	assert_eq!(record.derived.get("mystery"), Some(&None));

	let json = serde_json::to_value(&record).unwrap();
	assert_eq!(json["totalSupply"], "1500");
	assert_eq!(json["hardCap"], "2.5");
}

#[tokio::test]
async fn test_token_contract_receives_direct_queries() {
	let chain = token_chain();
	let requests = chain.requests();
	let handle = start(vec![boxed(chain)]).await;

	let resolver = resolver(
		vec![create_test_descriptor(SALE_ADDRESS, Some(TOKEN_ADDRESS), vec![])],
		vec![(TOKEN_ADDRESS, create_token_abi())],
	);

	let record = resolver.resolve(&handle, SALE_ADDRESS).await.unwrap();
	assert_eq!(record.symbol.as_deref(), Some("TKN"));

	let targets = FakeChain::call_targets(&requests);
	assert!(!targets.is_empty());
	assert!(targets.iter().all(|target| target == TOKEN_ADDRESS));
}

#[tokio::test]
async fn test_missing_methods_are_null() {
	let chain = FakeChain::new().with_return(TOKEN_ADDRESS, "rate", uint(400));
	let handle = start(vec![boxed(chain)]).await;

	let resolver = resolver(
		vec![create_test_descriptor(
			TOKEN_ADDRESS,
			None,
			vec![("rate", call_rule("rate", ValueType::String))],
		)],
		vec![(TOKEN_ADDRESS, create_test_abi(&[("rate", "uint256")]))],
	);

	let record = resolver.resolve(&handle, TOKEN_ADDRESS).await.unwrap();
	assert_eq!(record.name, None);
	assert_eq!(record.symbol, None);
	assert_eq!(record.total_supply, None);
	assert_eq!(record.decimals, 18);
	assert_eq!(record.get("rate").as_deref(), Some("400"));
}

#[tokio::test]
async fn test_default_decimals_scale_supply() {
	let chain = FakeChain::new().with_return(TOKEN_ADDRESS, "totalSupply", uint(5 * 10u128.pow(18)));
	let handle = start(vec![boxed(chain)]).await;

	let resolver = resolver(
		vec![create_test_descriptor(TOKEN_ADDRESS, None, vec![])],
		vec![(TOKEN_ADDRESS, create_test_abi(&[("totalSupply", "uint256")]))],
	);

	let record = resolver.resolve(&handle, TOKEN_ADDRESS).await.unwrap();
	assert_eq!(record.decimals, 18);
	assert_eq!(record.total_supply.as_deref(), Some("5"));
}

#[tokio::test]
async fn test_final_decimals_come_from_contract() {
	let handle = start(vec![boxed(token_chain())]).await;

	let resolver = resolver(
		vec![create_test_descriptor(
			TOKEN_ADDRESS,
			None,
			vec![("decimals", static_rule("2")), ("name", static_rule("Renamed"))],
		)],
		vec![(TOKEN_ADDRESS, create_token_abi())],
	);

	let record = resolver.resolve(&handle, TOKEN_ADDRESS).await.unwrap();
	assert_eq!(record.decimals, 8);
	assert_eq!(record.name.as_deref(), Some("Renamed"));
}

#[tokio::test]
async fn test_unknown_sale() {
	let handle = start(vec![boxed(token_chain())]).await;
	let resolver = resolver(vec![], vec![]);

	assert!(matches!(
		resolver.resolve(&handle, SALE_ADDRESS).await,
		Err(BlockChainError::DescriptorNotFound(address)) if address == SALE_ADDRESS
	));
}

#[tokio::test]
async fn test_missing_interface() {
	let handle = start(vec![boxed(token_chain())]).await;
	let resolver = resolver(vec![create_test_descriptor(TOKEN_ADDRESS, None, vec![])], vec![]);

	assert!(matches!(
		resolver.resolve(&handle, TOKEN_ADDRESS).await,
		Err(BlockChainError::DescriptorNotFound(_))
	));
}

async fn failing_handle() -> NodeHandle {
	// A block rule pointing at a block the chain never produced
	start(vec![boxed(token_chain().with_return(TOKEN_ADDRESS, "startBlock", uint(99)))]).await
}

#[tokio::test]
async fn test_hard_failure_discards_record() {
	let handle = failing_handle().await;
	let resolver = resolver(
		vec![create_test_descriptor(
			TOKEN_ADDRESS,
			None,
			vec![("openingDate", call_rule("startBlock", ValueType::BlockNumber))],
		)],
		vec![(
			TOKEN_ADDRESS,
			create_test_abi(&[("name", "string"), ("startBlock", "uint256")]),
		)],
	);

	assert!(matches!(
		resolver.resolve(&handle, TOKEN_ADDRESS).await,
		Err(BlockChainError::ResolutionError(_))
	));
}

#[tokio::test]
async fn test_resolver_with_mocked_sales() {
	let mut sales = MockSaleRepository::new();
	sales
		.expect_get()
		.withf(|address| address == SALE_ADDRESS)
		.times(1)
		.returning(|_| Some(create_test_descriptor(SALE_ADDRESS, Some(TOKEN_ADDRESS), vec![])));
	sales.expect_get_all().returning(|| {
		HashMap::from([(
			SALE_ADDRESS.to_string(),
			create_test_descriptor(SALE_ADDRESS, Some(TOKEN_ADDRESS), vec![]),
		)])
	});

	let resolver = ConstantResolver::new(
		sales,
		ContractFactory::new(InterfaceRepository::with_interfaces([(
			TOKEN_ADDRESS.to_string(),
			create_token_abi(),
		)])),
		ValueDecoder::default(),
		18,
	);
	assert_eq!(resolver.addresses(), vec![SALE_ADDRESS.to_string()]);

	let handle = start(vec![boxed(token_chain())]).await;
	let record = resolver.resolve(&handle, SALE_ADDRESS).await.unwrap();
	assert_eq!(record.name.as_deref(), Some("Token"));
	assert_eq!(record.total_supply.as_deref(), Some("1500"));
}

#[tokio::test]
#[traced_test]
async fn test_resolve_runs_in_span() {
	let handle = start(vec![boxed(token_chain())]).await;
	let resolver = resolver(
		vec![create_test_descriptor(TOKEN_ADDRESS, None, vec![])],
		vec![(TOKEN_ADDRESS, create_token_abi())],
	);

	let record = resolver.resolve(&handle, TOKEN_ADDRESS).await.unwrap();
	assert_eq!(record.symbol.as_deref(), Some("TKN"));
	assert!(logs_contain("resolve{"));
	assert!(logs_contain("resolving sale constants"));
}
