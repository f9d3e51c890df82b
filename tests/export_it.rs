mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
use tcgplayer::{
	error::{ApiError, ConfigError, Error},
	export::{self, ExportOptions},
};
// self
use common::*;

const CATEGORY: u32 = 1;
const GROUPS: usize = 10;
const PRODUCTS: usize = 250;

fn product_page(offset: usize) -> Value {
	// Newest first, so the exporter has to restore ascending order.
	let ids = (offset..(offset + 100).min(PRODUCTS)).rev();

	Value::Array(
		ids.map(|idx| json!({ "productId": 5_000 + idx, "name": format!("Card {idx}"), "groupId": idx % GROUPS + 1 }))
			.collect(),
	)
}

async fn mock_category(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path(&format!("catalog/categories/{CATEGORY}")));
			then.status(200).json_body(envelope(
				1,
				json!([{ "categoryId": CATEGORY, "name": "Magic", "displayName": "Magic: The Gathering" }]),
			));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("catalog/groups")).query_param("limit", "1");
			then.status(200).json_body(envelope(GROUPS, json!([])));
		})
		.await;
	server
		.mock_async(|when, then| {
			let groups: Vec<Value> = (1..=GROUPS)
				.map(|id| json!({ "groupId": id, "name": format!("Set {id}"), "categoryId": CATEGORY }))
				.collect();

			when.method(GET)
				.path(api_path("catalog/groups"))
				.query_param("offset", "0")
				.query_param("limit", "100");
			then.status(200).json_body(envelope(GROUPS, Value::Array(groups)));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("catalog/products")).query_param("limit", "1");
			then.status(200).json_body(envelope(PRODUCTS, json!([])));
		})
		.await;
}

async fn mock_product_page(server: &MockServer, offset: usize) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path(api_path("catalog/products"))
				.query_param("categoryId", CATEGORY.to_string())
				.query_param("includeSkus", "true")
				.query_param("getExtendedFields", "true")
				.query_param("offset", offset.to_string())
				.query_param("limit", "100");
			then.status(200).json_body(envelope(PRODUCTS, product_page(offset)));
		})
		.await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn category_export_is_complete_and_ordered() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let token = mock_token(&server).await;

	mock_category(&server).await;

	let mut pages = Vec::new();

	for offset in [0, 100, 200] {
		pages.push(mock_product_page(&server, offset).await);
	}

	let client = build_client(&server);
	let options = ExportOptions { workers: 4, ..Default::default() };
	let dump = export::dump_category(&client, CATEGORY, &options).await?;

	assert!(dump.is_complete());
	assert_eq!(dump.category.category_id, CATEGORY);
	assert_eq!(dump.groups.len(), GROUPS);
	assert_eq!(dump.products.len(), PRODUCTS);
	assert!(dump.products.windows(2).all(|pair| pair[0].product_id < pair[1].product_id));

	for page in &pages {
		page.assert_calls_async(1).await;
	}

	token.assert_calls_async(1).await;

	let json = serde_json::to_value(&dump)?;

	assert_eq!(json["products"][0]["productId"], 5_000);
	assert_eq!(json["groups"][9]["groupId"], 10);

	Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_product_page_is_skipped_and_reported() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;

	mock_category(&server).await;
	mock_product_page(&server, 0).await;
	mock_product_page(&server, 200).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("catalog/products")).query_param("offset", "100");
			then.status(400).json_body(json!({
				"totalItems": 0,
				"success": false,
				"errors": ["Invalid offset."],
				"results": []
			}));
		})
		.await;

	let client = build_client(&server);
	let options = ExportOptions { workers: 3, ..Default::default() };
	let dump = export::dump_category(&client, CATEGORY, &options).await?;

	assert!(!dump.is_complete());
	assert_eq!(dump.failed_offsets, vec![100]);
	assert_eq!(dump.products.len(), PRODUCTS - 100);
	assert!(dump.products.iter().all(|product| !(5_100..5_200).contains(&product.product_id)));

	Ok(())
}

#[tokio::test]
async fn missing_category_details_abort_the_export() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;
	let _empty = server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("catalog/categories/999"));
			then.status(200).json_body(envelope(0, json!([])));
		})
		.await;
	let client = build_client(&server);
	let err = export::dump_category(&client, 999, &ExportOptions::default())
		.await
		.expect_err("A category without details cannot be exported.");

	assert!(matches!(err, Error::Api(ApiError::MissingResult { what: "category", id: 999 })));
}

#[tokio::test]
async fn oversized_group_count_fails_on_the_first_page() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path(&format!("catalog/categories/{CATEGORY}")));
			then.status(200).json_body(envelope(
				1,
				json!([{ "categoryId": CATEGORY, "name": "Magic", "displayName": "Magic: The Gathering" }]),
			));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("catalog/groups")).query_param("limit", "1");
			then.status(200).json_body(envelope(1 << 60, json!([])));
		})
		.await;

	let first_page = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(api_path("catalog/groups"))
				.query_param("offset", "0")
				.query_param("limit", "100");
			then.status(400).json_body(json!({
				"totalItems": 0,
				"success": false,
				"errors": ["Invalid offset."],
				"results": []
			}));
		})
		.await;
	let client = build_client(&server);
	let err = export::dump_category(&client, CATEGORY, &ExportOptions::default())
		.await
		.expect_err("A rejected group page aborts the export.");

	assert!(matches!(err, Error::Api(ApiError::Rejected { status: 400, .. })));

	first_page.assert_calls_async(1).await;
}

#[tokio::test]
async fn zero_category_is_rejected_before_any_request() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server).await;
	let client = build_client(&server);
	let err = export::dump_category(&client, 0, &ExportOptions::default())
		.await
		.expect_err("Category 0 is not a category.");

	assert!(matches!(err, Error::Config(ConfigError::MissingCategory)));

	token.assert_calls_async(0).await;
}
