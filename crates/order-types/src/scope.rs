//! Order scope variants.
//!
//! A scope names the set of tokens an order applies to. `OrderScope` is what
//! the classifier produces from a raw request; `ScopeShape` is the finer
//! distinction construction strategies are keyed by, known only once a
//! collection's token set has been decoded.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified scope of an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OrderScope {
	/// One specific token.
	SingleToken { contract: Address, token_id: U256 },
	/// Every token of a collection carrying an attribute key/value pair.
	AttributeSet {
		collection: String,
		key: String,
		value: String,
	},
	/// A whole collection.
	Collection { collection: String },
}

impl OrderScope {
	pub fn kind(&self) -> ScopeKind {
		match self {
			OrderScope::SingleToken { .. } => ScopeKind::SingleToken,
			OrderScope::AttributeSet { .. } => ScopeKind::AttributeSet,
			OrderScope::Collection { .. } => ScopeKind::Collection,
		}
	}
}

/// Discriminant of [`OrderScope`], used for error context and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
	SingleToken,
	AttributeSet,
	Collection,
}

impl fmt::Display for ScopeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ScopeKind::SingleToken => write!(f, "single-token"),
			ScopeKind::AttributeSet => write!(f, "attribute-set"),
			ScopeKind::Collection => write!(f, "collection"),
		}
	}
}

/// Shape of the token set a construction strategy encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeShape {
	SingleToken,
	TokenList,
	ContractWide,
	TokenRange,
}

impl ScopeShape {
	pub const ALL: [ScopeShape; 4] = [
		ScopeShape::SingleToken,
		ScopeShape::TokenList,
		ScopeShape::ContractWide,
		ScopeShape::TokenRange,
	];
}

impl fmt::Display for ScopeShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ScopeShape::SingleToken => write!(f, "single-token"),
			ScopeShape::TokenList => write!(f, "token-list"),
			ScopeShape::ContractWide => write!(f, "contract-wide"),
			ScopeShape::TokenRange => write!(f, "token-range"),
		}
	}
}
