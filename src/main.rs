//! Token-sale constant resolver entry point.
//!
//! Loads the endpoint configuration and sale descriptors, establishes a node
//! connection and prints the resolved constant record of every requested sale as
//! pretty JSON.
//!
//! # Flow
//! 1. Loads `.env`, the endpoint configuration and the sale descriptors
//! 2. Probes the endpoint and starts the provider pipeline
//! 3. Resolves each sale (all configured sales when no `--address` is given)
//! 4. Exits with an error when any sale failed to resolve

use anyhow::{anyhow, bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use dotenvy::dotenv;
use std::{
	env::{set_var, var},
	path::PathBuf,
};
use tracing::{error, info};

use ico_resolver::{
	bootstrap::{initialize_services, load_config, DEFAULT_CONFIG_PATH},
	services::blockchain::{ConnectionEvent, ConnectionGuard},
	utils::logging::{setup_logging, LOG_LEVEL_ENV},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	let matches = Command::new("ico-resolver")
		.version(env!("CARGO_PKG_VERSION"))
		.about("Resolves token-sale contracts into display-ready constant records.")
		.arg(
			Arg::new("config")
				.long("config")
				.help("Path to the endpoint configuration (default: config/app.json)")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("address")
				.long("address")
				.help("Sale contract to resolve; may be repeated (default: every configured sale)")
				.value_name("ADDRESS")
				.action(ArgAction::Append),
		)
		.arg(
			Arg::new("probe")
				.long("probe")
				.help("Only check that the endpoint is reachable")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.get_matches();

	dotenv().ok();

	// CLI log level only applies when the environment does not set one
	if let Some(level) = matches.get_one::<String>("log-level") {
		if var(LOG_LEVEL_ENV).is_err() {
			set_var(LOG_LEVEL_ENV, level);
		}
	}

	setup_logging().unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let config_path = matches
		.get_one::<String>("config")
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
	let config = load_config(&config_path)
		.with_context(|| format!("Failed to load {}", config_path.display()))?;

	if matches.get_flag("probe") {
		ConnectionGuard::from_config(&config).ensure_connected().await?;
		info!("{} is reachable", config.rpc_url);
		return Ok(());
	}

	let (resolver, mut context) = initialize_services(&config)
		.map_err(|e| anyhow!("Failed to initialize services: {}", e))?;

	let mut outcome = None;
	context
		.establish(|event| outcome = Some(event))
		.await?;

	let handle = match outcome {
		Some(ConnectionEvent::Established(handle)) => handle,
		Some(ConnectionEvent::Failed { reason }) => {
			bail!("{}: {} is not reachable", reason, config.rpc_url)
		}
		None => bail!("No connection outcome was reported"),
	};

	let addresses: Vec<String> = match matches.get_many::<String>("address") {
		Some(addresses) => addresses.cloned().collect(),
		None => resolver.addresses(),
	};

	let mut failures = 0usize;
	for address in &addresses {
		match resolver.resolve(&handle, address).await {
			Ok(record) => {
				let rendered = serde_json::to_string_pretty(&record)?;
				println!("{}: {}", address, rendered);
			}
			Err(e) => {
				error!("Failed to resolve {}: {}", address, e);
				failures += 1;
			}
		}
	}

	if failures > 0 {
		bail!("{} of {} sales failed to resolve", failures, addresses.len());
	}
	Ok(())
}
