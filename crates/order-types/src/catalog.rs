//! Records read from the token/collection catalog.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token standard implemented by a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStandard {
	Erc721,
	Erc1155,
}

impl AssetStandard {
	pub const ALL: [AssetStandard; 2] = [AssetStandard::Erc721, AssetStandard::Erc1155];
}

impl fmt::Display for AssetStandard {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AssetStandard::Erc721 => write!(f, "erc721"),
			AssetStandard::Erc1155 => write!(f, "erc1155"),
		}
	}
}

/// Collection-level default fee.
///
/// Stores may hold a rate without a recipient (or the reverse); such a policy
/// is never applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoyaltyPolicy {
	pub bps: u32,
	#[serde(default)]
	pub recipient: Option<Address>,
}

impl RoyaltyPolicy {
	pub fn new(bps: u32, recipient: Address) -> Self {
		Self {
			bps,
			recipient: Some(recipient),
		}
	}

	/// Returns the rate and recipient if the policy can be charged.
	pub fn applicable(&self) -> Option<(u32, Address)> {
		match self.recipient {
			Some(recipient) if self.bps > 0 => Some((self.bps, recipient)),
			_ => None,
		}
	}
}

/// What the token store knows about a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
	pub collection_id: String,
	pub asset_standard: AssetStandard,
}

/// A token matched by an attribute lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeToken {
	pub contract: Address,
	pub token_id: U256,
	pub asset_standard: AssetStandard,
}

/// Decoded form of a collection's scope-encoding string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TokenSetDescriptor {
	/// Every token of a contract.
	ContractWide { contract: Address },
	/// Token ids `start..=end` of a contract.
	Range {
		contract: Address,
		start_token_id: U256,
		end_token_id: U256,
	},
	Unsupported,
}
