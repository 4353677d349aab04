//! File-backed catalog.
//!
//! Loads a JSON [`CatalogSnapshot`] from disk once and serves it from memory.

use crate::implementations::memory::{CatalogSnapshot, MemoryCatalog};
use crate::StorageError;
use order_types::{ConfigSchema, Field, FieldType, Schema, ValidationError};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Reads a catalog snapshot from a JSON file.
pub async fn load_snapshot(path: &Path) -> Result<CatalogSnapshot, StorageError> {
	debug!("Reading catalog snapshot from {:?}", path);

	let bytes = match fs::read(path).await {
		Ok(bytes) => bytes,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
			return Err(StorageError::NotFound(format!(
				"catalog file {}",
				path.display()
			)))
		}
		Err(e) => return Err(StorageError::Backend(e.to_string())),
	};

	serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Loads a JSON snapshot into a [`MemoryCatalog`].
pub async fn load_catalog(path: &Path) -> Result<MemoryCatalog, StorageError> {
	let snapshot = load_snapshot(path).await?;
	info!(
		"Loaded catalog from {:?}: {} contracts, {} collections, {} tokens, {} attributes",
		path,
		snapshot.contracts.len(),
		snapshot.collections.len(),
		snapshot.tokens.len(),
		snapshot.attributes.len()
	);
	Ok(MemoryCatalog::from_snapshot(snapshot))
}

/// Configuration schema for the file catalog.
pub struct FileCatalogSchema;

impl ConfigSchema for FileCatalogSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![Field::new("path", FieldType::String).with_validator(|value| {
				match value.as_str() {
					Some(path) if !path.trim().is_empty() => Ok(()),
					_ => Err("path must not be empty".to_string()),
				}
			})],
			// Optional fields
			vec![],
		);

		schema.validate(config)
	}
}

/// Factory function to create a file-backed catalog from configuration.
///
/// Configuration parameters:
/// - `path`: location of the JSON snapshot
pub async fn create_catalog(config: &toml::Value) -> Result<MemoryCatalog, StorageError> {
	FileCatalogSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;

	let path = config
		.get("path")
		.and_then(|v| v.as_str())
		.ok_or_else(|| StorageError::Configuration("path is required".to_string()))?;

	load_catalog(Path::new(path)).await
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{CollectionStore, TokenStore};
	use order_types::{Address, AssetStandard, U256};
	use std::io::Write;

	const SNAPSHOT: &str = r#"{
		"contracts": [
			{ "address": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "kind": "erc721" }
		],
		"collections": [
			{
				"id": "bayc",
				"royaltyBps": 250,
				"royaltyRecipient": "0x2222222222222222222222222222222222222222",
				"tokenSetId": "contract:0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
			}
		],
		"tokens": [
			{
				"contract": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
				"tokenId": "1",
				"collectionId": "bayc"
			}
		]
	}"#;

	#[tokio::test]
	async fn test_load_catalog_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(SNAPSHOT.as_bytes()).unwrap();

		let config = toml::Value::Table(toml::Table::from_iter([(
			"path".to_string(),
			toml::Value::String(file.path().display().to_string()),
		)]));

		let catalog = create_catalog(&config).await.unwrap();
		let record = catalog
			.get_token(Address::repeat_byte(0xaa), U256::from(1))
			.await
			.unwrap();
		assert_eq!(record.asset_standard, AssetStandard::Erc721);
		assert_eq!(
			catalog.get_scope_encoding("bayc").await.unwrap().as_deref(),
			Some("contract:0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")
		);
	}

	#[tokio::test]
	async fn test_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = load_catalog(&dir.path().join("absent.json")).await;
		assert!(matches!(result, Err(StorageError::NotFound(_))));
	}

	#[tokio::test]
	async fn test_malformed_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(b"{ not json").unwrap();

		let result = load_catalog(file.path()).await;
		assert!(matches!(result, Err(StorageError::Serialization(_))));
	}

	#[tokio::test]
	async fn test_config_requires_path() {
		let config = toml::Value::Table(toml::Table::new());
		let result = create_catalog(&config).await;
		assert!(matches!(result, Err(StorageError::Configuration(_))));
	}
}
