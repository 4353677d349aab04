//! Scope classification.

use crate::ResolveError;
use order_types::{OrderRequest, OrderScope};

/// Maps the loose scope fields of a request onto exactly one scope variant.
///
/// Token fields (`contract`, `tokenId`) and collection fields (`collection`,
/// `attributeKey`, `attributeValue`) are mutually exclusive. Within each
/// group, partially supplied fields are rejected.
pub fn classify(request: &OrderRequest) -> Result<OrderScope, ResolveError> {
	let token_touched = request.contract.is_some() || request.token_id.is_some();
	let collection_touched = request.collection.is_some()
		|| request.attribute_key.is_some()
		|| request.attribute_value.is_some();

	match (token_touched, collection_touched) {
		(true, true) => Err(ResolveError::InvalidScope(
			"token and collection fields are mutually exclusive".to_string(),
		)),
		(true, false) => match (request.contract, request.token_id) {
			(Some(contract), Some(token_id)) => Ok(OrderScope::SingleToken { contract, token_id }),
			_ => Err(ResolveError::InvalidScope(
				"contract and tokenId must be given together".to_string(),
			)),
		},
		(false, true) => {
			let collection = request.collection.clone().ok_or_else(|| {
				ResolveError::InvalidScope("attribute fields require a collection".to_string())
			})?;

			match (&request.attribute_key, &request.attribute_value) {
				(Some(key), Some(value)) => Ok(OrderScope::AttributeSet {
					collection,
					key: key.clone(),
					value: value.clone(),
				}),
				(None, None) => Ok(OrderScope::Collection { collection }),
				_ => Err(ResolveError::InvalidScope(
					"attributeKey and attributeValue must be given together".to_string(),
				)),
			}
		}
		(false, false) => Err(ResolveError::InvalidScope(
			"no token, attribute or collection given".to_string(),
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use order_types::{Address, Side, U256};

	fn request() -> OrderRequest {
		OrderRequest::new(Side::Buy, Address::repeat_byte(0x11), U256::from(1), "reservoir")
	}

	#[test]
	fn test_single_token() {
		let contract = Address::repeat_byte(0xaa);
		let scope = classify(&request().with_token(contract, U256::from(7))).unwrap();

		assert_eq!(
			scope,
			OrderScope::SingleToken {
				contract,
				token_id: U256::from(7)
			}
		);
	}

	#[test]
	fn test_attribute_set_and_collection() {
		let scope = classify(
			&request()
				.with_collection("apes")
				.with_attribute("fur", "gold"),
		)
		.unwrap();
		assert_eq!(
			scope,
			OrderScope::AttributeSet {
				collection: "apes".to_string(),
				key: "fur".to_string(),
				value: "gold".to_string(),
			}
		);

		let scope = classify(&request().with_collection("apes")).unwrap();
		assert_eq!(
			scope,
			OrderScope::Collection {
				collection: "apes".to_string()
			}
		);
	}

	#[test]
	fn test_rejects_ambiguous_or_partial() {
		let contract = Address::repeat_byte(0xaa);
		let invalid = [
			request(),
			request()
				.with_token(contract, U256::from(1))
				.with_collection("apes"),
			OrderRequest {
				token_id: Some(U256::from(1)),
				..request()
			},
			OrderRequest {
				contract: Some(contract),
				..request()
			},
			OrderRequest {
				attribute_key: Some("fur".to_string()),
				..request().with_collection("apes")
			},
			OrderRequest {
				attribute_value: Some("gold".to_string()),
				..request().with_collection("apes")
			},
			request().with_attribute("fur", "gold"),
		];

		for request in invalid {
			assert!(
				matches!(classify(&request), Err(ResolveError::InvalidScope(_))),
				"accepted {:?}",
				request
			);
		}
	}
}
