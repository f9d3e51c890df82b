#![allow(dead_code)]

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
use tcgplayer::{
	api::{Client, Endpoints},
	auth::Credential,
	http::RetryPolicy,
	rate_limit::RateLimit,
};

pub const PUBLIC_KEY: &str = "public-test-key";
pub const PRIVATE_KEY: &str = "private-test-key";
pub const ACCESS_TOKEN: &str = "catalog-token";
pub const API_ROOT: &str = "/v1.39.0";

pub fn endpoints(server: &MockServer) -> Endpoints {
	Endpoints::new(&server.url("/token"), &server.url(API_ROOT))
		.expect("Mock endpoints should parse.")
}

pub fn fast_retry_policy() -> RetryPolicy {
	RetryPolicy::default()
		.with_max_retries(2)
		.with_backoff(Duration::from_millis(1), Duration::from_millis(5))
}

pub fn build_client(server: &MockServer) -> Client {
	build_client_with(server, Credential::new(PUBLIC_KEY, PRIVATE_KEY))
}

pub fn build_client_with(server: &MockServer, credential: Credential) -> Client {
	Client::builder(credential)
		.endpoints(endpoints(server))
		.rate_limit(RateLimit::new(10_000., 1_000))
		.retry_policy(fast_retry_policy())
		.build()
		.expect("Test client should build.")
}

/// Token endpoint answering with a token valid for two weeks.
pub async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.form_urlencoded_tuple("grant_type", "client_credentials")
				.form_urlencoded_tuple("client_id", PUBLIC_KEY)
				.form_urlencoded_tuple("client_secret", PRIVATE_KEY);
			then.status(200).header("content-type", "application/json").json_body(json!({
				"access_token": ACCESS_TOKEN,
				"token_type": "bearer",
				"expires_in": 1_209_599,
			}));
		})
		.await
}

pub fn api_path(path: &str) -> String {
	format!("{API_ROOT}/{path}")
}

pub fn envelope(total_items: usize, results: Value) -> Value {
	json!({
		"totalItems": total_items,
		"success": true,
		"errors": [],
		"results": results,
	})
}
