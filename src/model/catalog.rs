//! Catalog records: categories, groups, products, SKUs, and printings.

// self
use crate::{_prelude::*, paginate::Identified};

/// Top-level product line (a game or accessory family).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
	/// Category identifier.
	pub category_id: u32,
	/// Display name.
	pub name: String,
	/// Last modification timestamp as reported by the service.
	pub modified_on: String,
	/// Storefront display name.
	pub display_name: String,
	/// URL slug used by the storefront.
	pub seo_category_name: String,
	/// Label the storefront uses for sealed products.
	pub sealed_label: String,
	/// Label the storefront uses for singles.
	pub non_sealed_label: String,
	/// Link to the category's condition guide.
	pub condition_guide_url: String,
	/// Whether the mobile app can scan cards of this category.
	pub is_scannable: bool,
	/// Storefront popularity rank.
	pub popularity: i64,
}
impl Identified for Category {
	type Key = u32;

	fn identity(&self) -> u32 {
		self.category_id
	}
}

/// Set or expansion inside a category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
	/// Group identifier.
	pub group_id: u32,
	/// Display name.
	pub name: String,
	/// Set code.
	pub abbreviation: String,
	/// Marks supplemental (non-main-line) sets.
	pub supplemental: bool,
	/// Release timestamp.
	pub published_on: String,
	/// Last modification timestamp as reported by the service.
	pub modified_on: String,
	/// Category identifier.
	pub category_id: u32,
}
impl Identified for Group {
	type Key = u32;

	fn identity(&self) -> u32 {
		self.group_id
	}
}

/// Name/value attribute attached to a product when extended fields are requested.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendedData {
	/// Machine-readable attribute key.
	pub name: String,
	/// Human-readable attribute label.
	pub display_name: String,
	/// Attribute value.
	pub value: String,
}

/// Sellable item: a single card or a sealed product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
	/// Product identifier.
	pub product_id: u32,
	/// Display name.
	pub name: String,
	/// Name stripped of punctuation, as used for search.
	pub clean_name: String,
	/// Product image location.
	pub image_url: String,
	/// Group identifier.
	pub group_id: u32,
	/// Storefront page.
	pub url: String,
	/// Last modification timestamp as reported by the service.
	pub modified_on: String,
	/// Only populated by catalog calls that request SKUs.
	#[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
	pub skus: Vec<Sku>,
	/// Only populated by catalog calls that request extended fields.
	#[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
	pub extended_data: Vec<ExtendedData>,
}
impl Identified for Product {
	type Key = u32;

	fn identity(&self) -> u32 {
		self.product_id
	}
}

/// Stock-keeping unit: one language/printing/condition combination of a product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sku {
	/// SKU identifier.
	pub sku_id: u32,
	/// Product identifier.
	pub product_id: u32,
	/// Language identifier.
	pub language_id: u32,
	/// Printing identifier.
	pub printing_id: u32,
	/// Condition identifier.
	pub condition_id: u32,
}
impl Identified for Sku {
	type Key = u32;

	fn identity(&self) -> u32 {
		self.sku_id
	}
}

/// Printing variant (for example "Normal" or "Foil") defined for a category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Printing {
	/// Printing identifier.
	pub printing_id: u32,
	/// Display name.
	pub name: String,
	/// Sort position in listings.
	pub display_order: i32,
	/// Last modification timestamp as reported by the service.
	pub modified_on: String,
}
impl Identified for Printing {
	type Key = u32;

	fn identity(&self) -> u32 {
		self.printing_id
	}
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
