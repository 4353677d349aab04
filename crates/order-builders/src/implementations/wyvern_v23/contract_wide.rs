//! Bids on any token of a contract.

use super::{assemble, bid_calldata, require_buy, OrderParts};
use crate::{BuildError, OrderBuilder};
use alloy::primitives::Address;
use order_types::{
	AssetStandard, NetworkAddresses, Order, ResolvedBuildParams, ScopeParams, ScopeShape,
};

pub struct ContractWideBuilder {
	standard: AssetStandard,
	network: NetworkAddresses,
}

impl ContractWideBuilder {
	pub fn new(standard: AssetStandard, network: NetworkAddresses) -> Self {
		Self { standard, network }
	}
}

impl OrderBuilder for ContractWideBuilder {
	fn shape(&self) -> ScopeShape {
		ScopeShape::ContractWide
	}

	fn standard(&self) -> AssetStandard {
		self.standard
	}

	fn build(&self, params: &ResolvedBuildParams) -> Result<Order, BuildError> {
		let ScopeParams::ContractWide { contract } = &params.scope else {
			return Err(BuildError::ScopeMismatch {
				kind: self.kind(),
				shape: params.scope.shape(),
			});
		};
		require_buy(&self.kind(), params.side)?;

		let (calldata, pattern) = bid_calldata(self.standard, params.maker);

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
