//! Bids on any token out of an explicit list.

use super::{assemble, bid_calldata, require_buy, ITokenListVerifier, OrderParts};
use crate::{BuildError, OrderBuilder};
use alloy::primitives::{keccak256, B256, U256};
use alloy::sol_types::SolCall;
use order_types::{
	AssetStandard, NetworkAddresses, Order, ResolvedBuildParams, ScopeParams, ScopeShape,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Merkle root over a set of token ids.
///
/// Ids are deduplicated and sorted, leaves are `keccak256(id)` over the
/// 32-byte big-endian id, and each parent hashes its children in ascending
/// order. An odd node is carried to the next layer unchanged. Returns `None`
/// for an empty set.
pub fn merkle_root(token_ids: &[U256]) -> Option<B256> {
	let ids: BTreeSet<U256> = token_ids.iter().copied().collect();
	let mut layer: Vec<B256> = ids
		.iter()
		.map(|id| keccak256(id.to_be_bytes::<32>()))
		.collect();

	while layer.len() > 1 {
		layer = layer
			.chunks(2)
			.map(|pair| match pair {
				[left, right] => hash_pair(left, right),
				_ => pair[0],
			})
			.collect();
	}

	layer.first().copied()
}

fn hash_pair(a: &B256, b: &B256) -> B256 {
	let (low, high) = if a <= b { (a, b) } else { (b, a) };
	let mut buf = [0u8; 64];
	buf[..32].copy_from_slice(low.as_slice());
	buf[32..].copy_from_slice(high.as_slice());
	keccak256(buf)
}

/// Like a contract-wide bid, with a static call checking the substituted
/// token id against a merkle root of the allowed ids.
pub struct TokenListBuilder {
	standard: AssetStandard,
	network: NetworkAddresses,
}

impl TokenListBuilder {
	pub fn new(standard: AssetStandard, network: NetworkAddresses) -> Self {
		Self { standard, network }
	}

	fn extradata(&self, root: B256) -> Vec<u8> {
		match self.standard {
			AssetStandard::Erc721 => {
				ITokenListVerifier::verifyErc721Call { merkleRoot: root }.abi_encode()
			}
			AssetStandard::Erc1155 => {
				ITokenListVerifier::verifyErc1155Call { merkleRoot: root }.abi_encode()
			}
		}
	}
}

impl OrderBuilder for TokenListBuilder {
	fn shape(&self) -> ScopeShape {
		ScopeShape::TokenList
	}

	fn standard(&self) -> AssetStandard {
		self.standard
	}

	fn build(&self, params: &ResolvedBuildParams) -> Result<Order, BuildError> {
		let ScopeParams::TokenList {
			contract,
			token_ids,
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
			.token_list_verifier
			.ok_or(BuildError::MissingVerifier {
				verifier: "token list",
				chain_id: self.network.chain_id,
			})?;
		let root = merkle_root(token_ids).ok_or(BuildError::EmptyTokenList)?;
		debug!("Token list of {} ids has root {}", token_ids.len(), root);

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
				static_extradata: self.extradata(root),
			},
		))
	}
}
