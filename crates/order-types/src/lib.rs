//! Shared types for the NFT order resolver.
//!
//! Everything that crosses a crate boundary lives here: the raw order request,
//! the classified scope, catalog records read from storage, the resolved
//! build parameters handed to construction strategies and the order object
//! they produce.

pub mod catalog;
pub mod network;
pub mod order;
pub mod params;
pub mod request;
pub mod scope;
pub mod validation;

pub use alloy::primitives::{Address, Bytes, U256};
pub use catalog::*;
pub use network::*;
pub use order::*;
pub use params::*;
pub use request::*;
pub use scope::*;
pub use validation::*;
