//! Order construction strategies.
//!
//! A construction strategy turns [`ResolvedBuildParams`] into an unsigned
//! exchange [`Order`]. There is one strategy per (scope shape, asset standard)
//! pair; the resolver picks one through its builder registry and never looks
//! inside the order it gets back.

use order_types::{AssetStandard, Order, ResolvedBuildParams, ScopeShape, Side};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod wyvern_v23;
}

/// Errors that can occur while building an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
	/// The strategy cannot express orders on this side of the book.
	#[error("{kind} orders cannot be placed on the {side} side")]
	UnsupportedSide { kind: String, side: Side },
	/// The parameters carry a scope this strategy does not encode.
	#[error("{kind} builder received {shape} parameters")]
	ScopeMismatch { kind: String, shape: ScopeShape },
	/// A static-call verifier the strategy relies on is not deployed/configured.
	#[error("No {verifier} verifier configured for chain {chain_id}")]
	MissingVerifier {
		verifier: &'static str,
		chain_id: u64,
	},
	#[error("Token list is empty")]
	EmptyTokenList,
}

/// Trait defining the interface for construction strategies.
pub trait OrderBuilder: Send + Sync {
	/// Scope shape this strategy encodes.
	fn shape(&self) -> ScopeShape;

	/// Asset standard this strategy encodes.
	fn standard(&self) -> AssetStandard;

	/// Label stamped on produced orders, e.g. `erc1155-token-range`.
	fn kind(&self) -> String {
		format!("{}-{}", self.standard(), self.shape())
	}

	/// Builds an unsigned order from fully resolved parameters.
	fn build(&self, params: &ResolvedBuildParams) -> Result<Order, BuildError>;
}
