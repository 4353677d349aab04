//! In-memory catalog.
//!
//! Holds contracts, collections, tokens and attribute memberships as plain
//! maps and answers the catalog ports by joining them the same way the
//! relational catalog does: token and attribute standards come from the
//! owning contract's record.

use crate::{AttributeStore, CollectionStore, ContractRegistry, StorageError, TokenStore};
use async_trait::async_trait;
use order_types::{
	Address, AssetStandard, AttributeToken, ConfigSchema, Field, FieldType, RoyaltyPolicy, Schema,
	TokenRecord, ValidationError, U256,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serializable catalog contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
	#[serde(default)]
	pub contracts: Vec<ContractEntry>,
	#[serde(default)]
	pub collections: Vec<CollectionEntry>,
	#[serde(default)]
	pub tokens: Vec<TokenEntry>,
	#[serde(default)]
	pub attributes: Vec<AttributeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractEntry {
	pub address: Address,
	pub kind: AssetStandard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
	pub id: String,
	#[serde(default)]
	pub royalty_bps: Option<u32>,
	#[serde(default)]
	pub royalty_recipient: Option<Address>,
	/// Scope-encoding string, e.g. `contract:0x…` or `range:0x…:1:100`.
	#[serde(default)]
	pub token_set_id: Option<String>,
}

impl CollectionEntry {
	fn royalty(&self) -> Option<RoyaltyPolicy> {
		match (self.royalty_bps, self.royalty_recipient) {
			(None, None) => None,
			(bps, recipient) => Some(RoyaltyPolicy {
				bps: bps.unwrap_or(0),
				recipient,
			}),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEntry {
	pub contract: Address,
	pub token_id: U256,
	pub collection_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeEntry {
	pub collection_id: String,
	pub key: String,
	pub value: String,
	pub contract: Address,
	pub token_id: U256,
}

/// Read-only catalog kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
	contracts: HashMap<Address, AssetStandard>,
	collections: HashMap<String, CollectionEntry>,
	tokens: HashMap<(Address, U256), String>,
	/// Insertion order is the order lookups return matches in.
	attributes: Vec<AttributeEntry>,
}

impl MemoryCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
		let mut catalog = Self::new();
		for contract in snapshot.contracts {
			catalog = catalog.with_contract(contract.address, contract.kind);
		}
		for collection in snapshot.collections {
			catalog
				.collections
				.insert(collection.id.clone(), collection);
		}
		for token in snapshot.tokens {
			catalog = catalog.with_token(token.contract, token.token_id, token.collection_id);
		}
		catalog.attributes.extend(snapshot.attributes);
		catalog
	}

	pub fn with_contract(mut self, address: Address, kind: AssetStandard) -> Self {
		self.contracts.insert(address, kind);
		self
	}

	pub fn with_collection(
		mut self,
		id: impl Into<String>,
		royalty: Option<RoyaltyPolicy>,
		token_set_id: Option<&str>,
	) -> Self {
		let id = id.into();
		let (royalty_bps, royalty_recipient) = match royalty {
			Some(policy) => (Some(policy.bps), policy.recipient),
			None => (None, None),
		};
		self.collections.insert(
			id.clone(),
			CollectionEntry {
				id,
				royalty_bps,
				royalty_recipient,
				token_set_id: token_set_id.map(str::to_string),
			},
		);
		self
	}

	pub fn with_token(
		mut self,
		contract: Address,
		token_id: U256,
		collection_id: impl Into<String>,
	) -> Self {
		self.tokens
			.insert((contract, token_id), collection_id.into());
		self
	}

	pub fn with_attribute(
		mut self,
		collection_id: impl Into<String>,
		key: impl Into<String>,
		value: impl Into<String>,
		contract: Address,
		token_id: U256,
	) -> Self {
		self.attributes.push(AttributeEntry {
			collection_id: collection_id.into(),
			key: key.into(),
			value: value.into(),
			contract,
			token_id,
		});
		self
	}

	fn collection(&self, collection_id: &str) -> Result<&CollectionEntry, StorageError> {
		self.collections
			.get(collection_id)
			.ok_or_else(|| StorageError::NotFound(format!("collection {}", collection_id)))
	}
}

#[async_trait]
impl TokenStore for MemoryCatalog {
	async fn get_token(
		&self,
		contract: Address,
		token_id: U256,
	) -> Result<TokenRecord, StorageError> {
		let collection_id = self
			.tokens
			.get(&(contract, token_id))
			.ok_or_else(|| StorageError::NotFound(format!("token {}:{}", contract, token_id)))?;

		let asset_standard = self.contracts.get(&contract).copied().ok_or_else(|| {
			StorageError::Integrity(format!(
				"token {}:{} references unregistered contract",
				contract, token_id
			))
		})?;

		Ok(TokenRecord {
			collection_id: collection_id.clone(),
			asset_standard,
		})
	}
}

#[async_trait]
impl CollectionStore for MemoryCatalog {
	async fn get_royalty(
		&self,
		collection_id: &str,
	) -> Result<Option<RoyaltyPolicy>, StorageError> {
		Ok(self.collection(collection_id)?.royalty())
	}

	async fn get_scope_encoding(
		&self,
		collection_id: &str,
	) -> Result<Option<String>, StorageError> {
		Ok(self.collection(collection_id)?.token_set_id.clone())
	}
}

#[async_trait]
impl AttributeStore for MemoryCatalog {
	async fn find_tokens(
		&self,
		collection_id: &str,
		key: &str,
		value: &str,
	) -> Result<Vec<AttributeToken>, StorageError> {
		// Collections without a token set are not orderable as a group.
		let orderable = self
			.collections
			.get(collection_id)
			.is_some_and(|collection| collection.token_set_id.is_some());
		if !orderable {
			return Ok(Vec::new());
		}

		Ok(self
			.attributes
			.iter()
			.filter(|entry| {
				entry.collection_id == collection_id && entry.key == key && entry.value == value
			})
			.filter_map(|entry| {
				self.contracts
					.get(&entry.contract)
					.map(|standard| AttributeToken {
						contract: entry.contract,
						token_id: entry.token_id,
						asset_standard: *standard,
					})
			})
			.collect())
	}
}

#[async_trait]
impl ContractRegistry for MemoryCatalog {
	async fn get_asset_standard(&self, contract: Address) -> Result<AssetStandard, StorageError> {
		self.contracts
			.get(&contract)
			.copied()
			.ok_or_else(|| StorageError::NotFound(format!("contract {}", contract)))
	}
}

/// Configuration schema for the in-memory catalog.
///
/// The table mirrors [`CatalogSnapshot`]; every section is optional.
pub struct MemoryCatalogSchema;

impl ConfigSchema for MemoryCatalogSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let sections = ["contracts", "collections", "tokens", "attributes"]
			.into_iter()
			.map(|name| Field::new(name, FieldType::Array(Box::new(FieldType::Table))))
			.collect();

		Schema::new(vec![], sections).validate(config)
	}
}

/// Factory function to create an in-memory catalog from configuration.
pub fn create_catalog(config: &toml::Value) -> Result<MemoryCatalog, StorageError> {
	MemoryCatalogSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;

	let snapshot: CatalogSnapshot = config
		.clone()
		.try_into()
		.map_err(|e: toml::de::Error| StorageError::Serialization(e.to_string()))?;

	Ok(MemoryCatalog::from_snapshot(snapshot))
}
