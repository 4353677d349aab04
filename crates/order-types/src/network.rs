//! Per-chain address book.

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::Side;

/// Contract addresses the resolver and the construction strategies depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAddresses {
	pub chain_id: u64,
	/// Wyvern v2.3 exchange.
	pub exchange: Address,
	/// Wrapped native currency, used to denominate bids.
	pub wrapped_native: Address,
	/// Native currency placeholder, used to denominate listings.
	pub native: Address,
	/// Static-call verifier for merkle-rooted token lists.
	pub token_list_verifier: Option<Address>,
	/// Static-call verifier for token id ranges.
	pub token_range_verifier: Option<Address>,
}

impl NetworkAddresses {
	/// Returns the built-in address book for a known chain.
	pub fn for_chain(chain_id: u64) -> Option<Self> {
		match chain_id {
			1 => Some(Self {
				chain_id,
				exchange: address!("7f268357a8c2552623316e2562d90e642bb538e5"),
				wrapped_native: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
				native: Address::ZERO,
				token_list_verifier: None,
				token_range_verifier: None,
			}),
			4 => Some(Self {
				chain_id,
				exchange: address!("dd54d660178b28f6033a953b0e55073cfa7e3744"),
				wrapped_native: address!("c778417e063141139fce010982780140aa0cd5ab"),
				native: Address::ZERO,
				token_list_verifier: None,
				token_range_verifier: None,
			}),
			_ => None,
		}
	}

	/// Bids are denominated in the wrapped native token, listings in native currency.
	pub fn payment_token(&self, side: Side) -> Address {
		match side {
			Side::Buy => self.wrapped_native,
			Side::Sell => self.native,
		}
	}
}
