//! Bids on any token within an id range of a contract.

use super::{assemble, bid_calldata, require_buy, ITokenRangeVerifier, OrderParts};
use crate::{BuildError, OrderBuilder};
use alloy::primitives::U256;
use alloy::sol_types::SolCall;
use order_types::{
	AssetStandard, NetworkAddresses, Order, ResolvedBuildParams, ScopeParams, ScopeShape,
};

/// Like a contract-wide bid, with a static call checking the substituted
/// token id lies within `start..=end`.
pub struct TokenRangeBuilder {
	standard: AssetStandard,
	network: NetworkAddresses,
}

impl TokenRangeBuilder {
	pub fn new(standard: AssetStandard, network: NetworkAddresses) -> Self {
		Self { standard, network }
	}

	fn extradata(&self, start_token_id: U256, end_token_id: U256) -> Vec<u8> {
		match self.standard {
			AssetStandard::Erc721 => ITokenRangeVerifier::verifyErc721Call {
				startTokenId: start_token_id,
				endTokenId: end_token_id,
			}
			.abi_encode(),
			AssetStandard::Erc1155 => ITokenRangeVerifier::verifyErc1155Call {
				startTokenId: start_token_id,
				endTokenId: end_token_id,
			}
			.abi_encode(),
		}
	}
}

impl OrderBuilder for TokenRangeBuilder {
	fn shape(&self) -> ScopeShape {
		ScopeShape::TokenRange
	}

	fn standard(&self) -> AssetStandard {
		self.standard
	}

	fn build(&self, params: &ResolvedBuildParams) -> Result<Order, BuildError> {
		let ScopeParams::TokenRange {
			contract,
			start_token_id,
			end_token_id,
		} = &params.scope
		else {
			return Err(BuildError::ScopeMismatch {
				kind: self.kind(),
				shape: params.scope.shape(),
			});
		};
		require_buy(&self.kind(), params.side)?;

		let verifier = self
			.network
			.token_range_verifier
			.ok_or(BuildError::MissingVerifier {
				verifier: "token range",
				chain_id: self.network.chain_id,
			})?;

		let (calldata, pattern) = bid_calldata(self.standard, params.maker);

		Ok(assemble(
			self.kind(),
			&self.network,
			params,
			OrderParts {
				target: *contract,
				calldata,
				replacement_pattern: pattern,
				static_target: verifier,
				static_extradata: self.extradata(*start_token_id, *end_token_id),
			},
		))
	}
}
