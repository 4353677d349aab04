//! Order parameter resolution.
//!
//! Sequences scope classification, catalog and chain-state lookups, fee
//! composition and strategy selection. Every step is awaited in order, and
//! the first failure aborts the resolution without retries.

use crate::{
	check_homogeneous, classify, decode, BuilderRegistry, FeeResolver, Lookup, ResolveError,
};
use order_builders::OrderBuilder;
use order_chain::ChainStateInterface;
use order_storage::{AttributeStore, CollectionStore, ContractRegistry, StorageError, TokenStore};
use order_types::{
	AssetStandard, NetworkAddresses, Order, OrderRequest, OrderScope, ResolvedBuildParams,
	RoyaltyPolicy, ScopeKind, ScopeParams, TokenSetDescriptor,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-only catalog ports the resolver consults.
#[derive(Clone)]
pub struct Catalog {
	pub tokens: Arc<dyn TokenStore>,
	pub collections: Arc<dyn CollectionStore>,
	pub attributes: Arc<dyn AttributeStore>,
	pub contracts: Arc<dyn ContractRegistry>,
}

impl Catalog {
	/// Serves every port from one backend.
	pub fn from_shared<T>(catalog: Arc<T>) -> Self
	where
		T: TokenStore + CollectionStore + AttributeStore + ContractRegistry + 'static,
	{
		Self {
			tokens: catalog.clone(),
			collections: catalog.clone(),
			attributes: catalog.clone(),
			contracts: catalog,
		}
	}
}

/// Turns order requests into resolved build parameters and unsigned orders.
pub struct OrderResolver {
	catalog: Catalog,
	chain_state: Arc<dyn ChainStateInterface>,
	network: NetworkAddresses,
	fees: FeeResolver,
	builders: BuilderRegistry,
}

impl OrderResolver {
	/// Creates a resolver using the Wyvern v2.3 strategies for `network`.
	pub fn new(
		catalog: Catalog,
		chain_state: Arc<dyn ChainStateInterface>,
		network: NetworkAddresses,
		fees: FeeResolver,
	) -> Self {
		let builders = BuilderRegistry::wyvern_v23(&network);
		Self {
			catalog,
			chain_state,
			network,
			fees,
			builders,
		}
	}

	/// Replaces the strategy registry.
	pub fn with_builders(mut self, builders: BuilderRegistry) -> Self {
		self.builders = builders;
		self
	}

	/// Resolves a request into build parameters and the strategy that will
	/// turn them into an order.
	pub async fn resolve_params(
		&self,
		request: &OrderRequest,
	) -> Result<(Arc<dyn OrderBuilder>, ResolvedBuildParams), ResolveError> {
		let result = self.try_resolve_params(request).await;
		if let Err(e) = &result {
			warn!(
				"Failed to resolve {} order of {}: {}",
				request.side, request.maker, e
			);
		}
		result
	}

	/// Resolves a request all the way to an unsigned order.
	pub async fn resolve_order(&self, request: &OrderRequest) -> Result<Order, ResolveError> {
		let (builder, params) = self.resolve_params(request).await?;

		let order = builder
			.build(&params)
			.map_err(|source| ResolveError::ConstructionFailed {
				shape: builder.shape(),
				standard: builder.standard(),
				source,
			})
			.inspect_err(|e| warn!("Failed to construct order of {}: {}", request.maker, e))?;

		info!(
			"Resolved {} {} order of {} ({} bps to {})",
			order.kind, request.side, order.maker, params.fee_bps, params.fee_recipient
		);
		Ok(order)
	}

	async fn try_resolve_params(
		&self,
		request: &OrderRequest,
	) -> Result<(Arc<dyn OrderBuilder>, ResolvedBuildParams), ResolveError> {
		let scope = classify(request)?;
		let kind = scope.kind();
		debug!("Classified {} order of {} as {}", request.side, request.maker, kind);

		let nonce = self
			.chain_state
			.replay_counter(request.maker)
			.await
			.map_err(|e| ResolveError::lookup(Lookup::ReplayCounter, kind, e))?;

		let payment_token = self.network.payment_token(request.side);

		let (royalty, standard, scope_params) = match scope {
			OrderScope::SingleToken { contract, token_id } => {
				let token = self
					.catalog
					.tokens
					.get_token(contract, token_id)
					.await
					.map_err(|e| match e {
						StorageError::NotFound(_) => {
							ResolveError::TokenNotFound { contract, token_id }
						}
						other => ResolveError::lookup(Lookup::Token, kind, other),
					})?;
				let royalty = self.royalty(&token.collection_id, kind).await?;

				(
					royalty,
					token.asset_standard,
					ScopeParams::SingleToken { contract, token_id },
				)
			}
			OrderScope::AttributeSet {
				collection,
				key,
				value,
			} => {
				let royalty = self.royalty(&collection, kind).await?;
				let tokens = self
					.catalog
					.attributes
					.find_tokens(&collection, &key, &value)
					.await
					.map_err(|e| ResolveError::lookup(Lookup::Attributes, kind, e))?;
				let (contract, standard) = check_homogeneous(&tokens, &collection, &key, &value)?;
				debug!("{}={} matched {} tokens of {}", key, value, tokens.len(), collection);

				(
					royalty,
					standard,
					ScopeParams::TokenList {
						contract,
						token_ids: tokens.iter().map(|token| token.token_id).collect(),
					},
				)
			}
			OrderScope::Collection { collection } => {
				let royalty = self.royalty(&collection, kind).await?;
				let encoding = self
					.catalog
					.collections
					.get_scope_encoding(&collection)
					.await
					.map_err(|e| ResolveError::lookup(Lookup::ScopeEncoding, kind, e))?;

				let scope_params = match decode(encoding.as_deref()) {
					TokenSetDescriptor::ContractWide { contract } => {
						ScopeParams::ContractWide { contract }
					}
					TokenSetDescriptor::Range {
						contract,
						start_token_id,
						end_token_id,
					} => ScopeParams::TokenRange {
						contract,
						start_token_id,
						end_token_id,
					},
					TokenSetDescriptor::Unsupported => {
						return Err(ResolveError::UnsupportedCollectionScope {
							collection,
							encoding,
						})
					}
				};
				let standard = self.asset_standard(&scope_params, kind).await?;

				(royalty, standard, scope_params)
			}
		};

		let (fee_bps, fee_recipient) = self.fees.resolve(
			request.fee,
			request.fee_recipient,
			request.maker,
			royalty.as_ref(),
			&request.orderbook,
		);

		let shape = scope_params.shape();
		let builder = self
			.builders
			.select(shape, standard)
			.ok_or(ResolveError::NoBuilderAvailable { shape, standard })?;

		let params = ResolvedBuildParams {
			maker: request.maker,
			side: request.side,
			price: request.price,
			payment_token,
			fee_bps,
			fee_recipient,
			nonce,
			listing_time: request.listing_time,
			expiration_time: request.expiration_time,
			salt: request.salt,
			scope: scope_params,
		};
		debug!("Resolved {} {} parameters", standard, shape);

		Ok((builder, params))
	}

	async fn royalty(
		&self,
		collection: &str,
		kind: ScopeKind,
	) -> Result<Option<RoyaltyPolicy>, ResolveError> {
		self.catalog
			.collections
			.get_royalty(collection)
			.await
			.map_err(|e| ResolveError::lookup(Lookup::Royalty, kind, e))
	}

	async fn asset_standard(
		&self,
		scope: &ScopeParams,
		kind: ScopeKind,
	) -> Result<AssetStandard, ResolveError> {
		self.catalog
			.contracts
			.get_asset_standard(scope.contract())
			.await
			.map_err(|e| ResolveError::lookup(Lookup::AssetStandard, kind, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MarketplaceSurcharge;
	use alloy::primitives::address;
	use async_trait::async_trait;
	use order_builders::BuildError;
	use order_chain::{implementations::fixed::FixedChainState, ChainStateError};
	use order_storage::MemoryCatalog;
	use order_types::{Address, ScopeShape, Side, U256};

	const MAKER: Address = Address::repeat_byte(0x11);
	const ROYALTY_RECIPIENT: Address = Address::repeat_byte(0x22);
	const MARKETPLACE: Address = address!("5b3256965e7c3cf26e11fcaf296dfc8807c01073");
	const PUNKS: Address = Address::repeat_byte(0xaa);
	const EDITIONS: Address = Address::repeat_byte(0xbb);
	const OTHER: Address = Address::repeat_byte(0xcc);
	const UNREGISTERED: Address = Address::repeat_byte(0xdd);

	fn catalog() -> MemoryCatalog {
		let punks = format!("contract:{}", PUNKS);
		let editions = format!("range:{}:1:100", EDITIONS);
		let orphans = format!("contract:{}", UNREGISTERED);

		MemoryCatalog::new()
			.with_contract(PUNKS, AssetStandard::Erc721)
			.with_contract(EDITIONS, AssetStandard::Erc1155)
			.with_contract(OTHER, AssetStandard::Erc721)
			.with_collection(
				"punks",
				Some(RoyaltyPolicy::new(250, ROYALTY_RECIPIENT)),
				Some(punks.as_str()),
			)
			.with_collection(
				"editions",
				Some(RoyaltyPolicy::new(500, ROYALTY_RECIPIENT)),
				Some(editions.as_str()),
			)
			.with_collection("mixed", None, Some(punks.as_str()))
			.with_collection("legacy", None, Some("list:whatever"))
			.with_collection("orphans", None, Some(orphans.as_str()))
			.with_token(PUNKS, U256::from(7), "punks")
			.with_token(PUNKS, U256::from(3), "punks")
			.with_token(PUNKS, U256::from(5), "punks")
			.with_token(OTHER, U256::from(1), "mixed")
			.with_attribute("punks", "hat", "cap", PUNKS, U256::from(7))
			.with_attribute("punks", "hat", "cap", PUNKS, U256::from(3))
			.with_attribute("mixed", "eyes", "laser", PUNKS, U256::from(5))
			.with_attribute("mixed", "eyes", "laser", OTHER, U256::from(1))
	}

	fn network() -> NetworkAddresses {
		NetworkAddresses {
			token_list_verifier: Some(Address::repeat_byte(0x0a)),
			token_range_verifier: Some(Address::repeat_byte(0x0b)),
			..NetworkAddresses::for_chain(1).unwrap()
		}
	}

	fn resolver_with(chain_state: Arc<dyn ChainStateInterface>) -> OrderResolver {
		OrderResolver::new(
			Catalog::from_shared(Arc::new(catalog())),
			chain_state,
			network(),
			FeeResolver::new(Some(MarketplaceSurcharge {
				orderbook: "opensea".to_string(),
				bps: 250,
				recipient: MARKETPLACE,
			})),
		)
	}

	fn resolver() -> OrderResolver {
		resolver_with(Arc::new(
			FixedChainState::new(U256::ZERO).with_counter(MAKER, U256::from(9)),
		))
	}

	fn request(side: Side, orderbook: &str) -> OrderRequest {
		OrderRequest::new(side, MAKER, U256::from(10u64.pow(18)), orderbook)
	}

	struct OfflineAttributes;

	#[async_trait]
	impl AttributeStore for OfflineAttributes {
		async fn find_tokens(
			&self,
			_collection_id: &str,
			_key: &str,
			_value: &str,
		) -> Result<Vec<order_types::AttributeToken>, StorageError> {
			Err(StorageError::Backend("attributes table unavailable".to_string()))
		}
	}

	struct UnreachableChain;

	#[async_trait]
	impl ChainStateInterface for UnreachableChain {
		async fn replay_counter(&self, _maker: Address) -> Result<U256, ChainStateError> {
			Err(ChainStateError::Network("connection refused".to_string()))
		}
	}

	#[tokio::test]
	async fn test_single_token_listing() {
		let request = request(Side::Sell, "reservoir").with_token(PUNKS, U256::from(7));
		let (builder, params) = resolver().resolve_params(&request).await.unwrap();

		assert_eq!(builder.kind(), "erc721-single-token");
		assert_eq!(params.fee_bps, 250);
		assert_eq!(params.fee_recipient, ROYALTY_RECIPIENT);
		assert_eq!(params.payment_token, Address::ZERO);
		assert_eq!(params.nonce, U256::from(9));
		assert_eq!(
			params.scope,
			ScopeParams::SingleToken {
				contract: PUNKS,
				token_id: U256::from(7)
			}
		);

		let order = resolver().resolve_order(&request).await.unwrap();
		assert_eq!(order.kind, "erc721-single-token");
		assert_eq!(order.maker_relayer_fee, 250);
		assert_eq!(order.fee_recipient, ROYALTY_RECIPIENT);
		assert_eq!(order.exchange, network().exchange);
		assert_eq!(order.nonce, U256::from(9));
	}

	#[tokio::test]
	async fn test_collection_range_bid_on_surcharge_marketplace() {
		let request = request(Side::Buy, "opensea").with_collection("editions");
		let (builder, params) = resolver().resolve_params(&request).await.unwrap();

		assert_eq!(builder.shape(), ScopeShape::TokenRange);
		assert_eq!(builder.standard(), AssetStandard::Erc1155);
		assert_eq!(params.fee_bps, 750);
		assert_eq!(params.fee_recipient, MARKETPLACE);
		assert_eq!(params.payment_token, network().wrapped_native);
		assert_eq!(
			params.scope,
			ScopeParams::TokenRange {
				contract: EDITIONS,
				start_token_id: U256::from(1),
				end_token_id: U256::from(100),
			}
		);

		let order = resolver().resolve_order(&request).await.unwrap();
		assert_eq!(order.kind, "erc1155-token-range");
		assert_eq!(order.static_target, Address::repeat_byte(0x0b));
	}

	#[tokio::test]
	async fn test_contract_wide_bid() {
		let request = request(Side::Buy, "reservoir")
			.with_collection("punks")
			.with_fee(100, Some(OTHER));
		let (builder, params) = resolver().resolve_params(&request).await.unwrap();

		assert_eq!(builder.kind(), "erc721-contract-wide");
		assert_eq!(params.scope, ScopeParams::ContractWide { contract: PUNKS });
		// Explicit fee wins over the 250 bps royalty.
		assert_eq!((params.fee_bps, params.fee_recipient), (100, OTHER));
	}

	#[tokio::test]
	async fn test_attribute_bid() {
		let request = request(Side::Buy, "reservoir")
			.with_collection("punks")
			.with_attribute("hat", "cap");
		let (builder, params) = resolver().resolve_params(&request).await.unwrap();

		assert_eq!(builder.kind(), "erc721-token-list");
		assert_eq!(
			params.scope,
			ScopeParams::TokenList {
				contract: PUNKS,
				token_ids: vec![U256::from(7), U256::from(3)],
			}
		);

		let order = resolver().resolve_order(&request).await.unwrap();
		assert_eq!(order.static_target, Address::repeat_byte(0x0a));
	}

	#[tokio::test]
	async fn test_attribute_set_errors() {
		let heterogeneous = request(Side::Buy, "reservoir")
			.with_collection("mixed")
			.with_attribute("eyes", "laser");
		assert!(matches!(
			resolver().resolve_params(&heterogeneous).await,
			Err(ResolveError::HeterogeneousAttributeSet { .. })
		));

		let empty = request(Side::Buy, "reservoir")
			.with_collection("punks")
			.with_attribute("hat", "crown");
		assert!(matches!(
			resolver().resolve_params(&empty).await,
			Err(ResolveError::EmptyAttributeSet { value, .. }) if value == "crown"
		));
	}

	#[tokio::test]
	async fn test_lookup_errors() {
		let missing_token = request(Side::Sell, "reservoir").with_token(PUNKS, U256::from(404));
		assert!(matches!(
			resolver().resolve_params(&missing_token).await,
			Err(ResolveError::TokenNotFound { contract, .. }) if contract == PUNKS
		));

		let unknown_collection = request(Side::Buy, "reservoir").with_collection("nope");
		assert!(matches!(
			resolver().resolve_params(&unknown_collection).await,
			Err(ResolveError::LookupFailed {
				lookup: Lookup::Royalty,
				scope: ScopeKind::Collection,
				..
			})
		));

		let unsupported = request(Side::Buy, "reservoir").with_collection("legacy");
		assert!(matches!(
			resolver().resolve_params(&unsupported).await,
			Err(ResolveError::UnsupportedCollectionScope { encoding: Some(encoding), .. })
				if encoding == "list:whatever"
		));

		// The decoded contract has no registered standard.
		let unregistered = request(Side::Buy, "reservoir").with_collection("orphans");
		assert!(matches!(
			resolver().resolve_params(&unregistered).await,
			Err(ResolveError::LookupFailed {
				lookup: Lookup::AssetStandard,
				scope: ScopeKind::Collection,
				..
			})
		));
	}

	#[tokio::test]
	async fn test_attribute_store_failure() {
		let mut catalog = Catalog::from_shared(Arc::new(catalog()));
		catalog.attributes = Arc::new(OfflineAttributes);
		let resolver = OrderResolver::new(
			catalog,
			Arc::new(FixedChainState::new(U256::ZERO)),
			network(),
			FeeResolver::new(None),
		);

		let request = request(Side::Buy, "reservoir")
			.with_collection("punks")
			.with_attribute("hat", "cap");
		assert!(matches!(
			resolver.resolve_params(&request).await,
			Err(ResolveError::LookupFailed {
				lookup: Lookup::Attributes,
				scope: ScopeKind::AttributeSet,
				..
			})
		));
	}

	#[tokio::test]
	async fn test_replay_counter_failure() {
		let resolver = resolver_with(Arc::new(UnreachableChain));
		let request = request(Side::Sell, "reservoir").with_token(PUNKS, U256::from(7));

		assert!(matches!(
			resolver.resolve_params(&request).await,
			Err(ResolveError::LookupFailed {
				lookup: Lookup::ReplayCounter,
				scope: ScopeKind::SingleToken,
				..
			})
		));

		// Classification fails before chain state is consulted.
		let invalid = self::request(Side::Sell, "reservoir");
		assert!(matches!(
			resolver.resolve_params(&invalid).await,
			Err(ResolveError::InvalidScope(_))
		));
	}

	#[tokio::test]
	async fn test_no_builder_available() {
		let resolver = resolver().with_builders(BuilderRegistry::new());
		let request = request(Side::Buy, "reservoir").with_collection("punks");

		assert!(matches!(
			resolver.resolve_order(&request).await,
			Err(ResolveError::NoBuilderAvailable {
				shape: ScopeShape::ContractWide,
				standard: AssetStandard::Erc721,
			})
		));
	}

	#[tokio::test]
	async fn test_construction_failure_propagates() {
		let request = request(Side::Sell, "reservoir").with_collection("punks");

		// Parameters resolve, the strategy refuses group listings.
		assert!(resolver().resolve_params(&request).await.is_ok());
		assert!(matches!(
			resolver().resolve_order(&request).await,
			Err(ResolveError::ConstructionFailed {
				shape: ScopeShape::ContractWide,
				standard: AssetStandard::Erc721,
				source: BuildError::UnsupportedSide { .. },
			})
		));
	}

	#[tokio::test]
	async fn test_fees_are_deterministic() {
		let request = request(Side::Buy, "opensea").with_collection("punks");
		let (_, first) = resolver().resolve_params(&request).await.unwrap();
		let (_, second) = resolver().resolve_params(&request).await.unwrap();

		assert_eq!(
			(first.fee_bps, first.fee_recipient),
			(second.fee_bps, second.fee_recipient)
		);
		assert_eq!(first.fee_bps, 500);
	}
}
