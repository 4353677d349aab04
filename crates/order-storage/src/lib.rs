//! Catalog storage for the order resolver.
//!
//! The resolver only ever reads from the catalog: token records, collection
//! royalty and scope-encoding metadata, attribute memberships and contract
//! standards. Each concern is a separate port so tests and alternative
//! backends can provide exactly what they need.

use async_trait::async_trait;
use order_types::{Address, AssetStandard, AttributeToken, RoyaltyPolicy, TokenRecord, U256};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

pub use implementations::memory::{CatalogSnapshot, MemoryCatalog};

/// Errors that can occur during catalog lookups.
#[derive(Debug, Error)]
pub enum StorageError {
	/// The requested record does not exist.
	#[error("Not found: {0}")]
	NotFound(String),
	/// Records exist but reference each other inconsistently.
	#[error("Integrity error: {0}")]
	Integrity(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Backend error: {0}")]
	Backend(String),
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Token records, keyed by contract and token id.
#[async_trait]
pub trait TokenStore: Send + Sync {
	/// Returns the owning collection and standard of a token.
	///
	/// Fails with [`StorageError::NotFound`] when the token is unknown.
	async fn get_token(&self, contract: Address, token_id: U256)
		-> Result<TokenRecord, StorageError>;
}

/// Collection-level metadata.
#[async_trait]
pub trait CollectionStore: Send + Sync {
	/// Returns the collection's royalty policy, if one is configured.
	async fn get_royalty(&self, collection_id: &str)
		-> Result<Option<RoyaltyPolicy>, StorageError>;

	/// Returns the collection's raw scope-encoding string, if any.
	async fn get_scope_encoding(&self, collection_id: &str)
		-> Result<Option<String>, StorageError>;
}

/// Attribute memberships.
#[async_trait]
pub trait AttributeStore: Send + Sync {
	/// Returns every token of the collection carrying `key = value`.
	async fn find_tokens(
		&self,
		collection_id: &str,
		key: &str,
		value: &str,
	) -> Result<Vec<AttributeToken>, StorageError>;
}

/// Contract metadata.
#[async_trait]
pub trait ContractRegistry: Send + Sync {
	async fn get_asset_standard(&self, contract: Address) -> Result<AssetStandard, StorageError>;
}

/// Factory function to create a catalog from configuration.
///
/// Supported implementations:
/// - `memory`: catalog records inlined in the config table
/// - `file`: JSON snapshot loaded from `path`
pub async fn create_catalog(
	implementation: &str,
	config: &toml::Value,
) -> Result<MemoryCatalog, StorageError> {
	match implementation {
		"memory" => implementations::memory::create_catalog(config),
		"file" => implementations::file::create_catalog(config).await,
		other => Err(StorageError::Configuration(format!(
			"Unknown catalog implementation: {}",
			other
		))),
	}
}
