//! Raw order requests as submitted by callers.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book the maker is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Buy,
	Sell,
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Side::Buy => write!(f, "buy"),
			Side::Sell => write!(f, "sell"),
		}
	}
}

/// A request to build an order, before its scope has been classified.
///
/// The scope is carried as loose optional fields (`contract`/`token_id` for a
/// single token, `collection` with or without an attribute pair for group
/// orders). The scope classifier turns them into a single tagged variant and
/// rejects any combination that does not describe exactly one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
	pub side: Side,
	pub maker: Address,
	pub price: U256,
	/// Orderbook the order is destined for (e.g. "reservoir", "opensea").
	pub orderbook: String,
	/// Explicit fee in basis points.
	#[serde(default)]
	pub fee: Option<u32>,
	#[serde(default)]
	pub fee_recipient: Option<Address>,
	#[serde(default)]
	pub listing_time: Option<u64>,
	#[serde(default)]
	pub expiration_time: Option<u64>,
	#[serde(default)]
	pub salt: Option<U256>,
	#[serde(default)]
	pub contract: Option<Address>,
	#[serde(default)]
	pub token_id: Option<U256>,
	#[serde(default)]
	pub collection: Option<String>,
	#[serde(default)]
	pub attribute_key: Option<String>,
	#[serde(default)]
	pub attribute_value: Option<String>,
}

impl OrderRequest {
	/// Creates a request with no scope fields and no explicit fee.
	pub fn new(side: Side, maker: Address, price: U256, orderbook: impl Into<String>) -> Self {
		Self {
			side,
			maker,
			price,
			orderbook: orderbook.into(),
			fee: None,
			fee_recipient: None,
			listing_time: None,
			expiration_time: None,
			salt: None,
			contract: None,
			token_id: None,
			collection: None,
			attribute_key: None,
			attribute_value: None,
		}
	}

	pub fn with_token(mut self, contract: Address, token_id: U256) -> Self {
		self.contract = Some(contract);
		self.token_id = Some(token_id);
		self
	}

	pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
		self.collection = Some(collection.into());
		self
	}

	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attribute_key = Some(key.into());
		self.attribute_value = Some(value.into());
		self
	}

	pub fn with_fee(mut self, bps: u32, recipient: Option<Address>) -> Self {
		self.fee = Some(bps);
		self.fee_recipient = recipient;
		self
	}
}
