//! Unsigned exchange order produced by construction strategies.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// An unsigned Wyvern v2.3 order.
///
/// Field names and numeric encodings follow the exchange contract's `Order`
/// struct so the value can be hashed and signed without further translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Which strategy produced the order (e.g. "erc721-single-token").
	pub kind: String,
	pub exchange: Address,
	pub maker: Address,
	pub taker: Address,
	pub maker_relayer_fee: u32,
	pub taker_relayer_fee: u32,
	pub fee_recipient: Address,
	/// 0 = protocol fee, 1 = split fee.
	pub fee_method: u8,
	/// 0 = buy, 1 = sell.
	pub side: u8,
	/// 0 = fixed price, 1 = dutch auction.
	pub sale_kind: u8,
	pub target: Address,
	/// 0 = call, 1 = delegate call.
	pub how_to_call: u8,
	pub calldata: Bytes,
	pub replacement_pattern: Bytes,
	pub static_target: Address,
	pub static_extradata: Bytes,
	pub payment_token: Address,
	pub base_price: U256,
	pub extra: U256,
	pub listing_time: u64,
	pub expiration_time: u64,
	pub salt: U256,
	pub nonce: U256,
}
