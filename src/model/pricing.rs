//! Market price snapshots per product and per SKU.

// self
use crate::{_prelude::*, paginate::Identified};

/// Aggregated prices for one product sub-type (for example "Normal" or "Foil").
///
/// Prices the service has no data for are `None` and serialize as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPriceSet {
	/// Product the prices belong to.
	pub product_id: u32,
	/// Lowest listed price.
	pub low_price: Option<f64>,
	/// Market price derived from recent sales.
	pub market_price: Option<f64>,
	/// Median listed price.
	pub mid_price: Option<f64>,
	/// Lowest price among direct-eligible listings.
	pub direct_low_price: Option<f64>,
	/// Sub-type the row describes.
	pub sub_type_name: String,
}
impl Identified for ProductPriceSet {
	type Key = (u32, String);

	fn identity(&self) -> Self::Key {
		(self.product_id, self.sub_type_name.clone())
	}
}

/// Prices for one SKU.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkuPriceSet {
	/// SKU the prices belong to.
	pub sku_id: u32,
	/// Lowest listed price.
	pub low_price: Option<f64>,
	/// Lowest shipping cost among listings.
	pub lowest_shipping: Option<f64>,
	/// Lowest price including shipping.
	pub lowest_listing_price: Option<f64>,
	/// Market price derived from recent sales.
	pub market_price: Option<f64>,
	/// Lowest price among direct-eligible listings.
	pub direct_low_price: Option<f64>,
}
impl Identified for SkuPriceSet {
	type Key = u32;

	fn identity(&self) -> u32 {
		self.sku_id
	}
}
