//! Orders on one specific token.

use super::{
	assemble, replacement_pattern, transfer_calldata, OrderParts, FROM_WORD, TO_WORD,
};
use crate::{BuildError, OrderBuilder};
use alloy::primitives::Address;
use order_types::{
	AssetStandard, NetworkAddresses, Order, ResolvedBuildParams, ScopeParams, ScopeShape, Side,
};

/// Listings and bids on a single token.
///
/// Listings transfer from the maker to whoever fills (`to` replaceable);
/// bids transfer to the maker from whoever fills (`from` replaceable).
pub struct SingleTokenBuilder {
	standard: AssetStandard,
	network: NetworkAddresses,
}

impl SingleTokenBuilder {
	pub fn new(standard: AssetStandard, network: NetworkAddresses) -> Self {
		Self { standard, network }
	}
}

impl OrderBuilder for SingleTokenBuilder {
	fn shape(&self) -> ScopeShape {
		ScopeShape::SingleToken
	}

	fn standard(&self) -> AssetStandard {
		self.standard
	}

	fn build(&self, params: &ResolvedBuildParams) -> Result<Order, BuildError> {
		let ScopeParams::SingleToken { contract, token_id } = &params.scope else {
			return Err(BuildError::ScopeMismatch {
				kind: self.kind(),
				shape: params.scope.shape(),
			});
		};

		let (calldata, masked_word) = match params.side {
			Side::Sell => (
				transfer_calldata(self.standard, params.maker, Address::ZERO, *token_id),
				TO_WORD,
			),
			Side::Buy => (
				transfer_calldata(self.standard, Address::ZERO, params.maker, *token_id),
				FROM_WORD,
			),
		};
		let pattern = replacement_pattern(calldata.len(), &[masked_word]);

		Ok(assemble(
			self.kind(),
			&self.network,
			params,
			OrderParts {
				target: *contract,
				calldata,
				replacement_pattern: pattern,
				static_target: Address::ZERO,
				static_extradata: Vec::new(),
			},
		))
	}
}
