//! Fully resolved build parameters handed to construction strategies.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{ScopeShape, Side};

/// Scope-specific part of the build parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScopeParams {
	SingleToken {
		contract: Address,
		token_id: U256,
	},
	TokenList {
		contract: Address,
		token_ids: Vec<U256>,
	},
	ContractWide {
		contract: Address,
	},
	TokenRange {
		contract: Address,
		start_token_id: U256,
		end_token_id: U256,
	},
}

impl ScopeParams {
	pub fn shape(&self) -> ScopeShape {
		match self {
			ScopeParams::SingleToken { .. } => ScopeShape::SingleToken,
			ScopeParams::TokenList { .. } => ScopeShape::TokenList,
			ScopeParams::ContractWide { .. } => ScopeShape::ContractWide,
			ScopeParams::TokenRange { .. } => ScopeShape::TokenRange,
		}
	}

	pub fn contract(&self) -> Address {
		match self {
			ScopeParams::SingleToken { contract, .. }
			| ScopeParams::TokenList { contract, .. }
			| ScopeParams::ContractWide { contract }
			| ScopeParams::TokenRange { contract, .. } => *contract,
		}
	}
}

/// Everything a construction strategy needs to build an unsigned order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBuildParams {
	pub maker: Address,
	pub side: Side,
	pub price: U256,
	pub payment_token: Address,
	pub fee_bps: u32,
	pub fee_recipient: Address,
	/// Maker's replay-protection counter on the exchange.
	pub nonce: U256,
	pub listing_time: Option<u64>,
	pub expiration_time: Option<u64>,
	pub salt: Option<U256>,
	pub scope: ScopeParams,
}
