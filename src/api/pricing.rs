//! Market price lookups.

// self
use super::{Client, check_id_count, join_ids};
use crate::{
	_prelude::*,
	model::{ProductPriceSet, SkuPriceSet},
};

impl Client {
	/// Market prices of up to 250 products, one row per product sub-type.
	pub async fn get_market_prices_by_products(
		&self,
		product_ids: &[u32],
	) -> Result<Vec<ProductPriceSet>> {
		check_id_count(product_ids)?;

		self.get_path(&format!("pricing/product/{}", join_ids(product_ids)), &[]).await?.results()
	}

	/// Market prices of up to 250 SKUs.
	pub async fn get_market_prices_by_skus(&self, sku_ids: &[u32]) -> Result<Vec<SkuPriceSet>> {
		check_id_count(sku_ids)?;

		self.get_path(&format!("pricing/sku/{}", join_ids(sku_ids)), &[]).await?.results()
	}
}
