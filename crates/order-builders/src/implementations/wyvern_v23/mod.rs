//! Wyvern v2.3 construction strategies.
//!
//! Every strategy shares the same envelope: the maker pays the relayer fee
//! (split-fee method), the order is a fixed-price call into the token
//! contract, and the counterparty is left open. Strategies differ in the
//! transfer calldata, which parts of it the taker may replace, and the static
//! call that restricts what the taker may substitute.

use crate::{BuildError, OrderBuilder};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use order_types::{AssetStandard, NetworkAddresses, Order, ResolvedBuildParams, Side};
use std::sync::Arc;

pub mod contract_wide;
pub mod single_token;
pub mod token_list;
pub mod token_range;

pub use contract_wide::ContractWideBuilder;
pub use single_token::SingleTokenBuilder;
pub use token_list::{merkle_root, TokenListBuilder};
pub use token_range::TokenRangeBuilder;

sol! {
	interface IERC721 {
		function transferFrom(address from, address to, uint256 tokenId) external;
	}

	interface IERC1155 {
		function safeTransferFrom(address from, address to, uint256 id, uint256 amount, bytes data) external;
	}

	interface ITokenListVerifier {
		function verifyErc721(bytes32 merkleRoot) external pure;
		function verifyErc1155(bytes32 merkleRoot) external pure;
	}

	interface ITokenRangeVerifier {
		function verifyErc721(uint256 startTokenId, uint256 endTokenId) external pure;
		function verifyErc1155(uint256 startTokenId, uint256 endTokenId) external pure;
	}
}

const SIDE_BUY: u8 = 0;
const SIDE_SELL: u8 = 1;
const FEE_METHOD_SPLIT_FEE: u8 = 1;
const SALE_KIND_FIXED_PRICE: u8 = 0;
const HOW_TO_CALL_CALL: u8 = 0;

/// Calldata word holding the transfer's `from` argument.
pub(crate) const FROM_WORD: usize = 0;
/// Calldata word holding the transfer's `to` argument.
pub(crate) const TO_WORD: usize = 1;
/// Calldata word holding the token id.
pub(crate) const TOKEN_ID_WORD: usize = 2;

/// Returns all eight strategies for the given network.
pub fn builders(network: &NetworkAddresses) -> Vec<Arc<dyn OrderBuilder>> {
	let mut builders: Vec<Arc<dyn OrderBuilder>> = Vec::with_capacity(8);
	for standard in AssetStandard::ALL {
		builders.push(Arc::new(SingleTokenBuilder::new(standard, network.clone())));
		builders.push(Arc::new(TokenListBuilder::new(standard, network.clone())));
		builders.push(Arc::new(ContractWideBuilder::new(standard, network.clone())));
		builders.push(Arc::new(TokenRangeBuilder::new(standard, network.clone())));
	}
	builders
}

/// Encodes a single-token transfer for the given standard.
pub(crate) fn transfer_calldata(
	standard: AssetStandard,
	from: Address,
	to: Address,
	token_id: U256,
) -> Vec<u8> {
	match standard {
		AssetStandard::Erc721 => IERC721::transferFromCall {
			from,
			to,
			tokenId: token_id,
		}
		.abi_encode(),
		AssetStandard::Erc1155 => IERC1155::safeTransferFromCall {
			from,
			to,
			id: token_id,
			amount: U256::from(1),
			data: Bytes::new(),
		}
		.abi_encode(),
	}
}

/// Builds a replacement pattern masking the given calldata words.
pub(crate) fn replacement_pattern(calldata_len: usize, words: &[usize]) -> Vec<u8> {
	let mut pattern = vec![0u8; calldata_len];
	for word in words {
		let start = 4 + word * 32;
		pattern[start..start + 32].fill(0xff);
	}
	pattern
}

/// Calldata for a bid on any token the taker chooses: the taker supplies
/// `from` and the token id, the maker receives.
pub(crate) fn bid_calldata(standard: AssetStandard, maker: Address) -> (Vec<u8>, Vec<u8>) {
	let calldata = transfer_calldata(standard, Address::ZERO, maker, U256::ZERO);
	let pattern = replacement_pattern(calldata.len(), &[FROM_WORD, TOKEN_ID_WORD]);
	(calldata, pattern)
}

/// Strategy-specific part of an order.
pub(crate) struct OrderParts {
	pub target: Address,
	pub calldata: Vec<u8>,
	pub replacement_pattern: Vec<u8>,
	pub static_target: Address,
	pub static_extradata: Vec<u8>,
}

/// Wraps strategy-specific parts in the common Wyvern envelope.
///
/// Missing listing time defaults to now, missing expiration to 0 (never) and
/// missing salt to a random 128-bit value.
pub(crate) fn assemble(
	kind: String,
	network: &NetworkAddresses,
	params: &ResolvedBuildParams,
	parts: OrderParts,
) -> Order {
	let listing_time = params
		.listing_time
		.unwrap_or_else(|| chrono::Utc::now().timestamp().max(0) as u64);
	let salt = params
		.salt
		.unwrap_or_else(|| U256::from(u128::from_be_bytes(*uuid::Uuid::new_v4().as_bytes())));

	Order {
		kind,
		exchange: network.exchange,
		maker: params.maker,
		taker: Address::ZERO,
		maker_relayer_fee: params.fee_bps,
		taker_relayer_fee: 0,
		fee_recipient: params.fee_recipient,
		fee_method: FEE_METHOD_SPLIT_FEE,
		side: match params.side {
			Side::Buy => SIDE_BUY,
			Side::Sell => SIDE_SELL,
		},
		sale_kind: SALE_KIND_FIXED_PRICE,
		target: parts.target,
		how_to_call: HOW_TO_CALL_CALL,
		calldata: parts.calldata.into(),
		replacement_pattern: parts.replacement_pattern.into(),
		static_target: parts.static_target,
		static_extradata: parts.static_extradata.into(),
		payment_token: params.payment_token,
		base_price: params.price,
		extra: U256::ZERO,
		listing_time,
		expiration_time: params.expiration_time.unwrap_or(0),
		salt,
		nonce: params.nonce,
	}
}

/// Group strategies only make sense as bids.
pub(crate) fn require_buy(kind: &str, side: Side) -> Result<(), BuildError> {
	match side {
		Side::Buy => Ok(()),
		Side::Sell => Err(BuildError::UnsupportedSide {
			kind: kind.to_string(),
			side,
		}),
	}
}

#[cfg(test)]
pub(crate) mod test_utils {
	use super::*;
	use order_types::ScopeParams;

	pub const MAKER: Address = Address::repeat_byte(0x11);
	pub const FEE_RECIPIENT: Address = Address::repeat_byte(0x22);
	pub const CONTRACT: Address = Address::repeat_byte(0xaa);

	pub fn network() -> NetworkAddresses {
		NetworkAddresses {
			token_list_verifier: Some(Address::repeat_byte(0x0a)),
			token_range_verifier: Some(Address::repeat_byte(0x0b)),
			..NetworkAddresses::for_chain(1).unwrap()
		}
	}

	pub fn params(side: Side, scope: ScopeParams) -> ResolvedBuildParams {
		let network = network();
		ResolvedBuildParams {
			maker: MAKER,
			side,
			price: U256::from(10u64.pow(18)),
			payment_token: network.payment_token(side),
			fee_bps: 250,
			fee_recipient: FEE_RECIPIENT,
			nonce: U256::from(4),
			listing_time: Some(1_640_000_000),
			expiration_time: None,
			salt: Some(U256::from(77)),
			scope,
		}
	}

	/// Address stored in calldata word `word`.
	pub fn address_word(calldata: &[u8], word: usize) -> Address {
		let start = 4 + word * 32;
		Address::from_slice(&calldata[start + 12..start + 32])
	}

	pub fn uint_word(calldata: &[u8], word: usize) -> U256 {
		let start = 4 + word * 32;
		U256::from_be_slice(&calldata[start..start + 32])
	}

	pub fn masked(pattern: &[u8], word: usize) -> bool {
		let start = 4 + word * 32;
		pattern[start..start + 32].iter().all(|byte| *byte == 0xff)
	}
}
