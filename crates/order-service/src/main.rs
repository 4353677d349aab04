use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use order_config::{ConfigLoader, ResolverConfig};
use order_types::OrderRequest;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod service;

#[derive(Parser)]
#[command(name = "nft-order-resolver")]
#[command(about = "Resolves NFT order requests into Wyvern v2.3 orders", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	/// Overrides `resolver.log_level` from the configuration
	#[arg(long, env = "RESOLVER_LOG_LEVEL")]
	log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Resolve an order request and print the unsigned order
	Resolve {
		/// JSON file holding the order request
		#[arg(short, long, value_name = "FILE")]
		request: PathBuf,

		/// Print the resolved build parameters instead of the order
		#[arg(long)]
		params_only: bool,
	},
	/// Validate the configuration file
	Validate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParamsOutput<'a> {
	kind: String,
	params: &'a order_types::ResolvedBuildParams,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	// Initialize tracing
	let log_level = cli
		.log_level
		.clone()
		.unwrap_or_else(|| config.resolver.log_level.clone());
	setup_tracing(&log_level)?;

	match cli.command {
		Commands::Resolve {
			request,
			params_only,
		} => resolve(&config, &request, params_only).await,
		Commands::Validate => validate_config(&cli.config, &config).await,
	}
}

async fn resolve(config: &ResolverConfig, request_path: &Path, params_only: bool) -> Result<()> {
	let content = tokio::fs::read_to_string(request_path)
		.await
		.with_context(|| format!("Failed to read order request: {:?}", request_path))?;
	let request: OrderRequest =
		serde_json::from_str(&content).context("Failed to parse order request")?;

	let resolver = service::build_resolver(config)
		.await
		.context("Failed to build resolver")?;

	let output = if params_only {
		let (builder, params) = resolver
			.resolve_params(&request)
			.await
			.context("Failed to resolve order parameters")?;
		serde_json::to_string_pretty(&ParamsOutput {
			kind: builder.kind(),
			params: &params,
		})?
	} else {
		let order = resolver
			.resolve_order(&request)
			.await
			.context("Failed to resolve order")?;
		serde_json::to_string_pretty(&order)?
	};

	println!("{}", output);
	Ok(())
}

async fn validate_config(path: &Path, config: &ResolverConfig) -> Result<()> {
	// Backends validate their own tables on construction.
	service::build_resolver(config)
		.await
		.context("Failed to build resolver")?;

	info!("Configuration {:?} is valid", path);
	info!("Chain: {}", config.resolver.chain_id);
	info!("Catalog: {}", config.catalog.implementation);
	info!("Chain state: {}", config.chain_state.implementation);

	let surcharge = &config.fees.surcharge;
	if surcharge.enabled {
		info!(
			"Surcharge: {} bps to {} on {}",
			surcharge.bps, surcharge.recipient, surcharge.orderbook
		);
	} else {
		info!("Surcharge: disabled");
	}

	Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	Ok(())
}
