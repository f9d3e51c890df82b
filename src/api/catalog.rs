//! Catalog operations: categories, groups, products, SKUs, and printings.

// self
use super::{Client, MAX_ITEMS_IN_RESPONSE, check_id_count, join_ids, join_product_types};
use crate::{
	_prelude::*,
	model::{Category, Group, Printing, Product, Sku},
};

const CATEGORIES: &str = "catalog/categories";
const GROUPS: &str = "catalog/groups";
const PRODUCTS: &str = "catalog/products";

impl Client {
	/// Number of products in `category`, restricted to `product_types` when non-empty.
	pub async fn total_products<S>(&self, category: u32, product_types: &[S]) -> Result<usize>
	where
		S: AsRef<str>,
	{
		self.query_total(PRODUCTS, category, product_types).await
	}

	/// Number of groups (sets) in `category`.
	pub async fn total_groups(&self, category: u32) -> Result<usize> {
		self.query_total::<&str>(GROUPS, category, &[]).await
	}

	/// Number of categories matching `category`.
	pub async fn total_categories(&self, category: u32) -> Result<usize> {
		self.query_total::<&str>(CATEGORIES, category, &[]).await
	}

	/// Printings (finishes) defined for `category`.
	pub async fn list_category_printings(&self, category: u32) -> Result<Vec<Printing>> {
		self.get_path(&format!("{CATEGORIES}/{category}/printings"), &[]).await?.results()
	}

	/// Details of up to 250 products, with extended fields and optionally their SKUs.
	pub async fn get_products_details(
		&self,
		product_ids: &[u32],
		include_skus: bool,
	) -> Result<Vec<Product>> {
		check_id_count(product_ids)?;

		let mut query = vec![("getExtendedFields", "true".to_owned())];

		if include_skus {
			query.push(("includeSkus", "true".to_owned()));
		}

		self.get_path(&format!("{PRODUCTS}/{}", join_ids(product_ids)), &query).await?.results()
	}

	/// One page (up to 100 items) of the products in `category` starting at `offset`.
	pub async fn list_all_products<S>(
		&self,
		category: u32,
		product_types: &[S],
		include_skus: bool,
		offset: usize,
	) -> Result<Vec<Product>>
	where
		S: AsRef<str>,
	{
		let mut query =
			vec![("getExtendedFields", "true".to_owned()), ("categoryId", category.to_string())];

		if let Some(types) = join_product_types(product_types) {
			query.push(("productTypes", types));
		}
		if include_skus {
			query.push(("includeSkus", "true".to_owned()));
		}

		query.push(("offset", offset.to_string()));
		query.push(("limit", MAX_ITEMS_IN_RESPONSE.to_string()));

		self.get_path(PRODUCTS, &query).await?.results()
	}

	/// SKUs of one product.
	pub async fn list_product_skus(&self, product_id: u32) -> Result<Vec<Sku>> {
		self.get_path(&format!("{PRODUCTS}/product/{product_id}/skus"), &[]).await?.results()
	}

	/// One page (up to 100 items) of the groups in `category` starting at `offset`.
	pub async fn list_all_category_groups(&self, category: u32, offset: usize) -> Result<Vec<Group>> {
		let query = [
			("categoryId", category.to_string()),
			("offset", offset.to_string()),
			("limit", MAX_ITEMS_IN_RESPONSE.to_string()),
		];

		self.get_path(GROUPS, &query).await?.results()
	}

	/// Details of up to 250 categories.
	pub async fn get_categories_details(&self, category_ids: &[u32]) -> Result<Vec<Category>> {
		check_id_count(category_ids)?;

		self.get_path(&format!("{CATEGORIES}/{}", join_ids(category_ids)), &[]).await?.results()
	}
}
