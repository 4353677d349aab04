//! Wiring of the resolver from configuration.

use anyhow::{Context, Result};
use order_config::ResolverConfig;
use order_core::{Catalog, FeeResolver, MarketplaceSurcharge, OrderResolver};
use std::sync::Arc;
use tracing::info;

/// Builds a resolver with the catalog, chain state and fee policy named in
/// the configuration.
pub async fn build_resolver(config: &ResolverConfig) -> Result<OrderResolver> {
	let network = config.network_addresses().with_context(|| {
		format!(
			"No addresses available for chain {}",
			config.resolver.chain_id
		)
	})?;

	let catalog = order_storage::create_catalog(
		&config.catalog.implementation,
		&config.catalog.config,
	)
	.await
	.context("Failed to create catalog")?;

	let chain_state = order_chain::create_chain_state(
		&config.chain_state.implementation,
		&config.chain_state.config,
		network.exchange,
	)
	.context("Failed to create chain state")?;

	let surcharge = &config.fees.surcharge;
	let fees = FeeResolver::new(surcharge.enabled.then(|| MarketplaceSurcharge {
		orderbook: surcharge.orderbook.clone(),
		bps: surcharge.bps,
		recipient: surcharge.recipient,
	}));

	info!(
		"Resolver ready on chain {} (catalog: {}, chain state: {})",
		network.chain_id, config.catalog.implementation, config.chain_state.implementation
	);

	Ok(OrderResolver::new(
		Catalog::from_shared(Arc::new(catalog)),
		Arc::from(chain_state),
		network,
		fees,
	))
}
