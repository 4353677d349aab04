// order-core/src/error.rs

use order_builders::BuildError;
use order_types::{Address, AssetStandard, ScopeKind, ScopeShape, U256};
use std::fmt;
use thiserror::Error;

/// Which collaborator a failed lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
	Token,
	Royalty,
	ScopeEncoding,
	Attributes,
	AssetStandard,
	ReplayCounter,
}

impl fmt::Display for Lookup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Lookup::Token => write!(f, "token"),
			Lookup::Royalty => write!(f, "royalty"),
			Lookup::ScopeEncoding => write!(f, "scope encoding"),
			Lookup::Attributes => write!(f, "attributes"),
			Lookup::AssetStandard => write!(f, "asset standard"),
			Lookup::ReplayCounter => write!(f, "replay counter"),
		}
	}
}

#[derive(Error, Debug)]
pub enum ResolveError {
	#[error("Invalid scope: {0}")]
	InvalidScope(String),

	#[error("Token {token_id} of contract {contract} not found")]
	TokenNotFound { contract: Address, token_id: U256 },

	#[error("No tokens of collection {collection} carry {key}={value}")]
	EmptyAttributeSet {
		collection: String,
		key: String,
		value: String,
	},

	#[error("Tokens of collection {collection} with {key}={value} span several contracts or standards")]
	HeterogeneousAttributeSet {
		collection: String,
		key: String,
		value: String,
	},

	#[error("Collection {collection} has an unsupported scope encoding: {encoding:?}")]
	UnsupportedCollectionScope {
		collection: String,
		encoding: Option<String>,
	},

	#[error("No builder available for {standard} {shape} orders")]
	NoBuilderAvailable {
		shape: ScopeShape,
		standard: AssetStandard,
	},

	#[error("Failed to construct {standard} {shape} order: {source}")]
	ConstructionFailed {
		shape: ScopeShape,
		standard: AssetStandard,
		#[source]
		source: BuildError,
	},

	#[error("{lookup} lookup failed for {scope} order: {message}")]
	LookupFailed {
		lookup: Lookup,
		scope: ScopeKind,
		message: String,
	},
}

impl ResolveError {
	pub(crate) fn lookup(lookup: Lookup, scope: ScopeKind, err: impl fmt::Display) -> Self {
		ResolveError::LookupFailed {
			lookup,
			scope,
			message: err.to_string(),
		}
	}
}
