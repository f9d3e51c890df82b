//! Transport primitives for authenticated, retried TCGplayer calls.
//!
//! Every outbound request flows through [`HttpTransport`], an object-safe trait over
//! `http` request/response values. The client stacks three implementations:
//!
//! - [`ReqwestHttpClient`] performs the actual network I/O;
//! - [`AuthenticatingTransport`] throttles, validates the credential pair, and injects the
//!   bearer token;
//! - [`Retrying`] re-runs transient failures with exponential backoff, sending every attempt
//!   back through the authenticating layer.
//!
//! Custom transports (test doubles, proxies) only need to implement [`HttpTransport`].

pub mod auth;
pub mod retry;

pub use auth::*;
pub use retry::*;

// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing a single request.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared behind
/// `Arc<dyn HttpTransport>` by every worker of the pagination engine. Non-2xx responses
/// are returned as `Ok`; only failures to obtain a response are errors.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` and resolves to the full response.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}
impl<T> HttpTransport for Arc<T>
where
	T: ?Sized + HttpTransport,
{
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		(**self).send(request)
	}
}

/// Captures metadata from the most recent HTTP response for downstream error mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the endpoint, if available.
	pub status: Option<u16>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ResponseMetadata {
	/// Extracts status and retry hint from a response.
	pub fn from_response(response: &HttpResponse) -> Self {
		Self {
			status: Some(response.status().as_u16()),
			retry_after: retry::parse_retry_after(response.headers()),
		}
	}
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
///
/// The token exchange creates a fresh slot per request and reads it once the `oauth2`
/// request resolves, so error mapping can report the HTTP status.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Builds a bodiless `GET` request for `url`.
pub fn get_request(url: &Url) -> Result<HttpRequest> {
	oauth2::http::Request::builder()
		.method(oauth2::http::Method::GET)
		.uri(url.as_str())
		.header(oauth2::http::header::ACCEPT, "application/json")
		.body(Vec::new())
		.map_err(|e| crate::error::ConfigError::from(e).into())
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
		let request = reqwest::Request::try_from(request).map_err(|e| {
			if e.is_builder() {
				Error::from(ConfigError::http_client_build(e))
			} else {
				TransportError::from(e).into()
			}
		})?;
		let response = self.0.execute(request).await.map_err(TransportError::from)?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let body = response.bytes().await.map_err(TransportError::from)?;
		let mut out = HttpResponse::new(body.to_vec());

		*out.status_mut() = status;
		*out.headers_mut() = headers;

		Ok(out)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(self.execute(request))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn get_request_sets_method_and_uri() {
		let url = Url::parse("https://api.tcgplayer.com/v1.39.0/catalog/groups?categoryId=1")
			.expect("Test URL should parse.");
		let request = get_request(&url).expect("GET request should build.");

		assert_eq!(request.method(), oauth2::http::Method::GET);
		assert_eq!(request.uri().to_string(), url.as_str());
		assert!(request.body().is_empty());
	}

	#[test]
	fn metadata_slot_is_consumed_once() {
		let slot = ResponseMetadataSlot::default();

		slot.store(ResponseMetadata { status: Some(503), retry_after: None });

		assert_eq!(slot.take().and_then(|meta| meta.status), Some(503));
		assert!(slot.take().is_none());
	}
}
