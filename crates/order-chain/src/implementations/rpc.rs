//! JSON-RPC chain-state provider.
//!
//! Reads the maker's counter straight from the exchange contract using an
//! Alloy HTTP provider.

use crate::{ChainStateError, ChainStateInterface};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;
use order_types::{Address, ConfigSchema, Field, FieldType, Schema, ValidationError, U256};
use tracing::debug;

sol! {
	/// Replay-protection counters of the Wyvern v2.3 exchange.
	#[sol(rpc)]
	interface IWyvernExchange {
		function nonces(address owner) external view returns (uint256);
	}
}

/// Chain-state provider backed by an Ethereum JSON-RPC endpoint.
pub struct RpcChainState {
	provider: DynProvider,
	/// Exchange contract holding the counters.
	exchange: Address,
}

impl RpcChainState {
	/// Creates a provider for the given endpoint and exchange contract.
	pub fn new(rpc_url: &str, exchange: Address) -> Result<Self, ChainStateError> {
		let url = rpc_url
			.parse()
			.map_err(|e| ChainStateError::Configuration(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().connect_http(url).erased();

		Ok(Self { provider, exchange })
	}
}

#[async_trait]
impl ChainStateInterface for RpcChainState {
	async fn replay_counter(&self, maker: Address) -> Result<U256, ChainStateError> {
		debug!("Reading exchange nonce for {}", maker);

		let exchange = IWyvernExchange::new(self.exchange, self.provider.clone());
		exchange.nonces(maker).call().await.map_err(|e| match e {
			alloy::contract::Error::TransportError(e) => ChainStateError::Network(format!(
				"nonces({}) on {} unreachable: {}",
				maker, self.exchange, e
			)),
			e => ChainStateError::Call(format!(
				"nonces({}) on {} failed: {}",
				maker, self.exchange, e
			)),
		})
	}
}

/// Configuration schema for the RPC chain-state provider.
pub struct RpcChainStateSchema;

impl ConfigSchema for RpcChainStateSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![
				Field::new("rpc_url", FieldType::String).with_validator(|value| {
					let url = value.as_str().unwrap_or_default();
					if url.starts_with("http://") || url.starts_with("https://") {
						Ok(())
					} else {
						Err("RPC URL must start with http:// or https://".to_string())
					}
				}),
				Field::new("exchange", FieldType::Address),
			],
			// Optional fields
			vec![],
		);

		schema.validate(config)
	}
}

/// Factory function to create an RPC chain-state provider from configuration.
///
/// Counters are read from `exchange`, the contract orders are built against.
///
/// Configuration parameters:
/// - `rpc_url`: HTTP(S) JSON-RPC endpoint
/// - `exchange`: optional, must equal `exchange` when set
pub fn create_chain_state(
	config: &toml::Value,
	exchange: Address,
) -> Result<Box<dyn ChainStateInterface>, ChainStateError> {
	RpcChainStateSchema
		.validate(config)
		.map_err(|e| ChainStateError::Configuration(e.to_string()))?;

	let rpc_url = config
		.get("rpc_url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| ChainStateError::Configuration("rpc_url is required".to_string()))?;

	if let Some(configured) = config.get("exchange").and_then(|v| v.as_str()) {
		let configured = configured.parse::<Address>().map_err(|e| {
			ChainStateError::Configuration(format!("Invalid exchange address: {}", e))
		})?;
		if configured != exchange {
			return Err(ChainStateError::Configuration(format!(
				"exchange {} does not match the network exchange {}",
				configured, exchange
			)));
		}
	}

	Ok(Box::new(RpcChainState::new(rpc_url, exchange)?))
}
