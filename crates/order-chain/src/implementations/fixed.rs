//! Fixed chain-state provider.
//!
//! Serves counters from configuration instead of the chain. Useful offline
//! and for makers known to have never cancelled an order (counter 0).

use crate::{ChainStateError, ChainStateInterface};
use async_trait::async_trait;
use order_types::{Address, ConfigSchema, Field, FieldType, Schema, ValidationError, U256};
use std::collections::HashMap;

/// Chain-state provider returning preconfigured counters.
#[derive(Debug, Default, Clone)]
pub struct FixedChainState {
	default: U256,
	counters: HashMap<Address, U256>,
}

impl FixedChainState {
	pub fn new(default: U256) -> Self {
		Self {
			default,
			counters: HashMap::new(),
		}
	}

	pub fn with_counter(mut self, maker: Address, counter: U256) -> Self {
		self.counters.insert(maker, counter);
		self
	}
}

#[async_trait]
impl ChainStateInterface for FixedChainState {
	async fn replay_counter(&self, maker: Address) -> Result<U256, ChainStateError> {
		Ok(self.counters.get(&maker).copied().unwrap_or(self.default))
	}
}

/// Configuration schema for the fixed chain-state provider.
pub struct FixedChainStateSchema;

impl ConfigSchema for FixedChainStateSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![],
			// Optional fields
			vec![
				Field::new(
					"default",
					FieldType::Integer {
						min: Some(0),
						max: None,
					},
				),
				Field::new("counters", FieldType::Table),
			],
		);

		schema.validate(config)
	}
}

/// Factory function to create a fixed chain-state provider from configuration.
///
/// Configuration parameters:
/// - `default`: counter for makers not listed (default: 0)
/// - `counters`: table of maker address to counter
pub fn create_chain_state(
	config: &toml::Value,
) -> Result<Box<dyn ChainStateInterface>, ChainStateError> {
	FixedChainStateSchema
		.validate(config)
		.map_err(|e| ChainStateError::Configuration(e.to_string()))?;

	let default = config
		.get("default")
		.and_then(|v| v.as_integer())
		.unwrap_or(0) as u64;

	let mut state = FixedChainState::new(U256::from(default));

	if let Some(counters) = config.get("counters").and_then(|v| v.as_table()) {
		for (maker, counter) in counters {
			let maker = maker.parse::<Address>().map_err(|e| {
				ChainStateError::Configuration(format!("Invalid maker address {}: {}", maker, e))
			})?;
			let counter = counter
				.as_integer()
				.filter(|counter| *counter >= 0)
				.ok_or_else(|| {
					ChainStateError::Configuration(format!(
						"Counter for {} must be a non-negative integer",
						maker
					))
				})?;
			state = state.with_counter(maker, U256::from(counter as u64));
		}
	}

	Ok(Box::new(state))
}
