//! Chain-state access for the order resolver.
//!
//! The resolver needs exactly one piece of on-chain state: the maker's
//! replay-protection counter on the exchange. It is read, never reserved;
//! ordering between concurrent orders of the same maker is left to the
//! submission layer.

use async_trait::async_trait;
use order_types::{Address, U256};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod fixed;
	pub mod rpc;
}

/// Errors that can occur while reading chain state.
#[derive(Debug, Error)]
pub enum ChainStateError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Contract call failed: {0}")]
	Call(String),
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the interface for chain-state providers.
#[async_trait]
pub trait ChainStateInterface: Send + Sync {
	/// Returns the maker's current replay-protection counter.
	async fn replay_counter(&self, maker: Address) -> Result<U256, ChainStateError>;
}

/// Factory function to create a chain-state provider from configuration.
///
/// `exchange` is the contract orders are built against.
///
/// Supported implementations:
/// - `rpc`: reads `nonces(maker)` from `exchange` over JSON-RPC
/// - `fixed`: serves counters from the config table
pub fn create_chain_state(
	implementation: &str,
	config: &toml::Value,
	exchange: Address,
) -> Result<Box<dyn ChainStateInterface>, ChainStateError> {
	match implementation {
		"rpc" => implementations::rpc::create_chain_state(config, exchange),
		"fixed" => implementations::fixed::create_chain_state(config),
		other => Err(ChainStateError::Configuration(format!(
			"Unknown chain state implementation: {}",
			other
		))),
	}
}
