//! Decoding of collection scope-encoding strings.

use order_types::{Address, TokenSetDescriptor, U256};
use std::str::FromStr;
use tracing::warn;

/// Parses `contract:<address>` or `range:<address>:<start>:<end>`.
///
/// Anything else, including an absent encoding or fields that do not parse,
/// decodes to [`TokenSetDescriptor::Unsupported`].
pub fn decode(encoding: Option<&str>) -> TokenSetDescriptor {
	let Some(encoding) = encoding else {
		return TokenSetDescriptor::Unsupported;
	};

	let fields: Vec<&str> = encoding.split(':').collect();
	let decoded = match fields.as_slice() {
		["contract", contract, ..] => Address::from_str(contract)
			.map(|contract| TokenSetDescriptor::ContractWide { contract })
			.ok(),
		["range", contract, start, end, ..] => parse_range(contract, start, end),
		_ => return TokenSetDescriptor::Unsupported,
	};

	decoded.unwrap_or_else(|| {
		warn!("Undecodable scope encoding: {}", encoding);
		TokenSetDescriptor::Unsupported
	})
}

fn parse_range(contract: &str, start: &str, end: &str) -> Option<TokenSetDescriptor> {
	Some(TokenSetDescriptor::Range {
		contract: Address::from_str(contract).ok()?,
		start_token_id: U256::from_str(start).ok()?,
		end_token_id: U256::from_str(end).ok()?,
	})
}
