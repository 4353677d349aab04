//! Fee composition.

use order_types::{Address, RoyaltyPolicy};
use tracing::debug;

/// A marketplace that adds a fixed fee to every order posted to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceSurcharge {
	pub orderbook: String,
	pub bps: u32,
	pub recipient: Address,
}

/// Computes the fee rate and recipient an order carries.
#[derive(Debug, Clone, Default)]
pub struct FeeResolver {
	surcharge: Option<MarketplaceSurcharge>,
}

impl FeeResolver {
	pub fn new(surcharge: Option<MarketplaceSurcharge>) -> Self {
		Self { surcharge }
	}

	/// Returns `(fee_bps, fee_recipient)`.
	///
	/// A non-zero caller fee, or a caller recipient other than the maker,
	/// takes precedence over the collection royalty. The surcharge of the
	/// configured marketplace is always added on top and takes over the
	/// recipient.
	pub fn resolve(
		&self,
		fee: Option<u32>,
		fee_recipient: Option<Address>,
		maker: Address,
		royalty: Option<&RoyaltyPolicy>,
		orderbook: &str,
	) -> (u32, Address) {
		let fee = fee.unwrap_or(0);
		let recipient = fee_recipient.unwrap_or(maker);

		let (mut bps, mut recipient) = if fee != 0 || recipient != maker {
			(fee, recipient)
		} else {
			royalty
				.and_then(RoyaltyPolicy::applicable)
				.unwrap_or((0, maker))
		};

		if let Some(surcharge) = self
			.surcharge
			.as_ref()
			.filter(|surcharge| surcharge.orderbook == orderbook)
		{
			debug!("Adding {} bps {} surcharge", surcharge.bps, surcharge.orderbook);
			bps = bps.saturating_add(surcharge.bps);
			recipient = surcharge.recipient;
		}

		(bps, recipient)
	}
}
