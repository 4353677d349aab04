//! Resolution of NFT order requests into exchange order parameters.
//!
//! [`OrderResolver`] is the entry point. It classifies the request's scope,
//! reads what it needs from the catalog and chain-state ports, composes the
//! fee, and hands the resulting [`order_types::ResolvedBuildParams`] to the
//! construction strategy registered for the scope shape and asset standard.

pub mod error;
pub mod fees;
pub mod resolver;
pub mod scope;
pub mod selector;
pub mod token_set;

pub use error::{Lookup, ResolveError};
pub use fees::{FeeResolver, MarketplaceSurcharge};
pub use resolver::{Catalog, OrderResolver};
pub use scope::classify;
pub use selector::{check_homogeneous, BuilderRegistry};
pub use token_set::decode;
