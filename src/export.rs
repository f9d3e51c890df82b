//! Whole-category snapshots: category details, every group, and every product.

// self
use crate::{
	_prelude::*,
	api::{Client, MAX_ITEMS_IN_RESPONSE},
	error::{ApiError, ConfigError},
	model::{ALL_PRODUCT_TYPES, Category, Group, Product},
	obs::{CallKind, CallSpan},
	paginate::{self, PagePlan},
};

/// Snapshot of one category, serialized as `{ "category", "groups", "products" }`.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryDump {
	/// Category details.
	pub category: Category,
	/// Every group of the category, in service order.
	pub groups: Vec<Group>,
	/// Every fetched product, ascending by product id.
	pub products: Vec<Product>,
	/// Offsets of product pages that could not be fetched.
	#[serde(skip)]
	pub failed_offsets: Vec<usize>,
}
impl CategoryDump {
	/// Returns `true` when no product page was skipped.
	pub fn is_complete(&self) -> bool {
		self.failed_offsets.is_empty()
	}
}

/// Knobs for [`dump_category`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
	/// Concurrent product page fetchers.
	pub workers: usize,
	/// Product types to include; empty means no filter.
	pub product_types: Vec<String>,
	/// Whether products carry their SKUs.
	pub include_skus: bool,
}
impl Default for ExportOptions {
	fn default() -> Self {
		Self {
			workers: 8,
			product_types: ALL_PRODUCT_TYPES.iter().map(|kind| (*kind).to_owned()).collect(),
			include_skus: true,
		}
	}
}

/// Exports `category_id` through `client`.
///
/// Category details and groups are fetched sequentially and any failure aborts the export.
/// Product pages are fanned out over `options.workers` workers; a failed page is logged and
/// skipped, and its offset is reported in [`CategoryDump::failed_offsets`]. Products are
/// sorted ascending by id before returning.
pub async fn dump_category(
	client: &Client,
	category_id: u32,
	options: &ExportOptions,
) -> Result<CategoryDump> {
	if category_id == 0 {
		return Err(ConfigError::MissingCategory.into());
	}
	if options.workers == 0 {
		return Err(ConfigError::InvalidWorkerCount.into());
	}

	CallSpan::new(CallKind::Export, "dump_category").observe(export(client, category_id, options)).await
}

async fn export(client: &Client, category_id: u32, options: &ExportOptions) -> Result<CategoryDump> {
	let category = client
		.get_categories_details(&[category_id])
		.await?
		.into_iter()
		.next()
		.ok_or(ApiError::MissingResult { what: "category", id: category_id })?;

	tracing::info!(category_id, name = %category.name, "Retrieved category details.");

	let total_groups = client.total_groups(category_id).await?;
	let mut groups = Vec::new();

	for offset in PagePlan::new(total_groups, MAX_ITEMS_IN_RESPONSE).offsets() {
		groups.extend(client.list_all_category_groups(category_id, offset).await?);
	}

	tracing::info!(count = groups.len(), "Found groups.");

	let total_products = client.total_products(category_id, &options.product_types[..]).await?;

	tracing::info!(count = total_products, "Found products.");

	let fetch_client = client.clone();
	let product_types: Arc<[String]> = options.product_types.clone().into();
	let include_skus = options.include_skus;
	let harvest = paginate::fetch_all(
		PagePlan::new(total_products, MAX_ITEMS_IN_RESPONSE),
		options.workers,
		client.cancel_signal(),
		move |offset| {
			let client = fetch_client.clone();
			let product_types = product_types.clone();

			async move {
				client.list_all_products(category_id, &product_types[..], include_skus, offset).await
			}
		},
	)
	.await?
	.sorted();
	let failed_offsets = harvest.failed_offsets();

	if !failed_offsets.is_empty() {
		tracing::warn!(
			fetched = harvest.items.len(),
			expected = total_products,
			?failed_offsets,
			"Export is incomplete; some product pages failed."
		);
	}

	Ok(CategoryDump { category, groups, products: harvest.items, failed_offsets })
}
