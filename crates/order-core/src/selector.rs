//! Construction strategy selection.

use crate::ResolveError;
use order_builders::{implementations::wyvern_v23, OrderBuilder};
use order_types::{Address, AssetStandard, AttributeToken, NetworkAddresses, ScopeShape};
use std::collections::HashMap;
use std::sync::Arc;

/// Construction strategies keyed by scope shape and asset standard.
#[derive(Clone, Default)]
pub struct BuilderRegistry {
	builders: HashMap<(ScopeShape, AssetStandard), Arc<dyn OrderBuilder>>,
}

impl BuilderRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with all eight Wyvern v2.3 strategies.
	pub fn wyvern_v23(network: &NetworkAddresses) -> Self {
		let mut registry = Self::new();
		for builder in wyvern_v23::builders(network) {
			registry.register(builder);
		}
		registry
	}

	/// Registers a strategy under its own shape and standard, replacing any
	/// previous occupant of that cell.
	pub fn register(&mut self, builder: Arc<dyn OrderBuilder>) -> Option<Arc<dyn OrderBuilder>> {
		self.builders
			.insert((builder.shape(), builder.standard()), builder)
	}

	pub fn select(&self, shape: ScopeShape, standard: AssetStandard) -> Option<Arc<dyn OrderBuilder>> {
		self.builders.get(&(shape, standard)).cloned()
	}

	pub fn len(&self) -> usize {
		self.builders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.builders.is_empty()
	}
}

/// Checks that every token of an attribute set lives in one contract and
/// follows one standard, returning both.
pub fn check_homogeneous(
	tokens: &[AttributeToken],
	collection: &str,
	key: &str,
	value: &str,
) -> Result<(Address, AssetStandard), ResolveError> {
	let Some(first) = tokens.first() else {
		return Err(ResolveError::EmptyAttributeSet {
			collection: collection.to_string(),
			key: key.to_string(),
			value: value.to_string(),
		});
	};

	if tokens
		.iter()
		.any(|token| token.contract != first.contract || token.asset_standard != first.asset_standard)
	{
		return Err(ResolveError::HeterogeneousAttributeSet {
			collection: collection.to_string(),
			key: key.to_string(),
			value: value.to_string(),
		});
	}

	Ok((first.contract, first.asset_standard))
}
