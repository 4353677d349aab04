//! Configuration structures for the resolver.

use alloy::primitives::{address, Address};
use order_types::NetworkAddresses;
use serde::{Deserialize, Serialize};

/// Root configuration object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
	/// Active chain and logging
	pub resolver: ResolverSettings,
	/// Overrides for the built-in address book
	#[serde(default)]
	pub network: NetworkOverrides,
	/// Fee policy
	#[serde(default)]
	pub fees: FeeConfig,
	/// Token catalog backend
	pub catalog: ImplementationConfig,
	/// Replay counter backend
	pub chain_state: ImplementationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
	pub chain_id: u64,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Addresses replacing, or supplying, entries of the built-in address book.
///
/// On chains without a built-in entry `exchange` and `wrapped_native` are
/// mandatory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkOverrides {
	pub exchange: Option<Address>,
	pub wrapped_native: Option<Address>,
	pub native: Option<Address>,
	pub token_list_verifier: Option<Address>,
	pub token_range_verifier: Option<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeConfig {
	#[serde(default)]
	pub surcharge: SurchargeConfig,
}

/// Marketplace that adds its own fee on top of whatever the order carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurchargeConfig {
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	#[serde(default = "default_surcharge_orderbook")]
	pub orderbook: String,
	#[serde(default = "default_surcharge_bps")]
	pub bps: u32,
	#[serde(default = "default_surcharge_recipient")]
	pub recipient: Address,
}

impl Default for SurchargeConfig {
	fn default() -> Self {
		Self {
			enabled: default_enabled(),
			orderbook: default_surcharge_orderbook(),
			bps: default_surcharge_bps(),
			recipient: default_surcharge_recipient(),
		}
	}
}

/// Selects a backend by name and passes it a free-form table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationConfig {
	pub implementation: String,
	#[serde(default = "empty_table")]
	pub config: toml::Value,
}

impl ResolverConfig {
	/// Address book for the active chain, built-in entries merged with the
	/// configured overrides. `None` when the chain is unknown and the
	/// overrides do not fill the gap.
	pub fn network_addresses(&self) -> Option<NetworkAddresses> {
		let overrides = &self.network;
		let mut addresses = match NetworkAddresses::for_chain(self.resolver.chain_id) {
			Some(addresses) => addresses,
			None => NetworkAddresses {
				chain_id: self.resolver.chain_id,
				exchange: overrides.exchange?,
				wrapped_native: overrides.wrapped_native?,
				native: Address::ZERO,
				token_list_verifier: None,
				token_range_verifier: None,
			},
		};

		if let Some(exchange) = overrides.exchange {
			addresses.exchange = exchange;
		}
		if let Some(wrapped_native) = overrides.wrapped_native {
			addresses.wrapped_native = wrapped_native;
		}
		if let Some(native) = overrides.native {
			addresses.native = native;
		}
		if overrides.token_list_verifier.is_some() {
			addresses.token_list_verifier = overrides.token_list_verifier;
		}
		if overrides.token_range_verifier.is_some() {
			addresses.token_range_verifier = overrides.token_range_verifier;
		}

		Some(addresses)
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_enabled() -> bool {
	true
}

fn default_surcharge_orderbook() -> String {
	"opensea".to_string()
}

fn default_surcharge_bps() -> u32 {
	250
}

fn default_surcharge_recipient() -> Address {
	address!("5b3256965e7c3cf26e11fcaf296dfc8807c01073")
}

fn empty_table() -> toml::Value {
	toml::Value::Table(toml::Table::new())
}
