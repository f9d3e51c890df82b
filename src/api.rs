//! Session object exposing the TCGplayer catalog and pricing operations.
//!
//! A [`Client`] owns one credential pair, one [`TokenStore`], and one rate limiter. Clones
//! share all three, so a single client can be handed to every pagination worker.

mod catalog;
mod pricing;

// self
use crate::{
	_prelude::*,
	auth::{Credential, TokenStore},
	cancel::CancelSignal,
	envelope::Envelope,
	error::ConfigError,
	http::{self, AuthenticatingTransport, HttpTransport, RetryPolicy, Retrying},
	obs::{CallKind, CallSpan},
	rate_limit::{RateLimit, RateLimiter},
};

/// Largest page the service returns for list endpoints.
pub const MAX_ITEMS_IN_RESPONSE: usize = 100;
/// Largest number of identifiers accepted by batched lookups.
pub const MAX_IDS_IN_REQUEST: usize = 250;

const DEFAULT_TOKEN_URL: &str = "https://api.tcgplayer.com/token";
const DEFAULT_API_URL: &str = "https://api.tcgplayer.com/v1.39.0/";

/// Splits `ids` into slices small enough for one batched lookup.
pub fn id_batches(ids: &[u32]) -> impl Iterator<Item = &[u32]> {
	ids.chunks(MAX_IDS_IN_REQUEST)
}

/// Token endpoint and versioned API root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Client-credentials token endpoint.
	pub token: Url,
	/// API root every catalog and pricing path is joined onto; always ends with `/`.
	pub api: Url,
}
impl Endpoints {
	/// Parses both endpoints, appending the trailing slash the API root needs for joins.
	pub fn new(token: &str, api: &str) -> Result<Self, ConfigError> {
		let token = Url::parse(token)?;
		let mut api = Url::parse(api)?;

		if !api.path().ends_with('/') {
			let path = format!("{}/", api.path());

			api.set_path(&path);
		}

		Ok(Self { token, api })
	}

	/// Production endpoints.
	pub fn tcgplayer() -> Result<Self, ConfigError> {
		Self::new(DEFAULT_TOKEN_URL, DEFAULT_API_URL)
	}

	fn join(&self, path: &str) -> Result<Url, ConfigError> {
		Ok(self.api.join(path)?)
	}
}

/// Authenticated, throttled, retrying TCGplayer API session.
#[derive(Clone)]
pub struct Client {
	transport: Arc<dyn HttpTransport>,
	tokens: Arc<TokenStore>,
	endpoints: Arc<Endpoints>,
	cancel: CancelSignal,
}
impl Client {
	/// Builds a client with production endpoints and default limits.
	pub fn new(credential: Credential) -> Result<Self> {
		Self::builder(credential).build()
	}

	/// Starts a builder for `credential`.
	pub fn builder(credential: Credential) -> ClientBuilder {
		ClientBuilder::new(credential)
	}

	/// Shared token store of this session.
	pub fn tokens(&self) -> &Arc<TokenStore> {
		&self.tokens
	}

	/// Endpoints this session talks to.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Cancellation signal observed by every rate-limited call of this session.
	pub fn cancel_signal(&self) -> &CancelSignal {
		&self.cancel
	}

	/// Performs an authenticated `GET` of `url` and decodes the response envelope.
	///
	/// Non-2xx responses with error strings fail with
	/// [`ApiError::Rejected`](crate::error::ApiError::Rejected); anything else that parses
	/// is returned as-is so callers can use partial results.
	pub async fn get_request(&self, url: &Url) -> Result<Envelope> {
		CallSpan::new(CallKind::Api, "get_request")
			.observe(async {
				tracing::debug!(url = %url, "Sending API request.");

				let request = http::get_request(url)?;
				let response = self.transport.send(request).await?;

				Envelope::decode(response.body(), response.status())
			})
			.await
	}

	async fn get_path(&self, path: &str, query: &[(&str, String)]) -> Result<Envelope> {
		let mut url = self.endpoints.join(path)?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		self.get_request(&url).await
	}

	async fn query_total<S>(&self, path: &str, category: u32, product_types: &[S]) -> Result<usize>
	where
		S: AsRef<str>,
	{
		let mut query = vec![("categoryId", category.to_string())];

		if let Some(types) = join_product_types(product_types) {
			query.push(("productTypes", types));
		}

		query.push(("limit", "1".to_owned()));

		Ok(self.get_path(path, &query).await?.total_items)
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("endpoints", &self.endpoints)
			.field("tokens", &self.tokens)
			.finish_non_exhaustive()
	}
}

/// Configures a [`Client`].
pub struct ClientBuilder {
	credential: Credential,
	endpoints: Option<Endpoints>,
	rate_limit: RateLimit,
	retry_policy: RetryPolicy,
	token_skew: Duration,
	transport: Option<Arc<dyn HttpTransport>>,
	cancel: CancelSignal,
}
impl ClientBuilder {
	/// Creates a builder with production endpoints and default limits.
	pub fn new(credential: Credential) -> Self {
		Self {
			credential,
			endpoints: None,
			rate_limit: RateLimit::default(),
			retry_policy: RetryPolicy::default(),
			token_skew: TokenStore::DEFAULT_SKEW,
			transport: None,
			cancel: CancelSignal::new(),
		}
	}

	/// Overrides the token endpoint and API root.
	pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Overrides the throttle settings.
	pub fn rate_limit(mut self, rate_limit: RateLimit) -> Self {
		self.rate_limit = rate_limit;

		self
	}

	/// Overrides the connection-level retry policy.
	pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
		self.retry_policy = retry_policy;

		self
	}

	/// Overrides the early-renewal margin applied to access tokens.
	pub fn token_skew(mut self, skew: Duration) -> Self {
		self.token_skew = skew;

		self
	}

	/// Replaces the network transport used for both the token exchange and API calls.
	pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
		self.transport = Some(transport);

		self
	}

	/// Uses `cancel` for every rate-limited call instead of a private signal.
	pub fn cancel_signal(mut self, cancel: CancelSignal) -> Self {
		self.cancel = cancel;

		self
	}

	/// Assembles the transport stack: base transport, then authentication, then retry.
	pub fn build(self) -> Result<Client> {
		let endpoints = match self.endpoints {
			Some(endpoints) => endpoints,
			None => Endpoints::tcgplayer()?,
		};
		let limiter = Arc::new(RateLimiter::new(self.rate_limit)?);
		let base = match self.transport {
			Some(transport) => transport,
			None => default_transport()?,
		};
		let tokens = Arc::new(
			TokenStore::new(self.credential, endpoints.token.clone(), base.clone())
				.with_skew(self.token_skew),
		);
		let authenticated = AuthenticatingTransport::new(
			base,
			tokens.clone(),
			limiter,
			self.cancel.clone(),
		);
		let transport: Arc<dyn HttpTransport> =
			Arc::new(Retrying::new(Arc::new(authenticated), self.retry_policy));

		Ok(Client { transport, tokens, endpoints: Arc::new(endpoints), cancel: self.cancel })
	}
}

#[cfg(feature = "reqwest")]
fn default_transport() -> Result<Arc<dyn HttpTransport>, ConfigError> {
	let client = ReqwestClient::builder()
		.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
		.build()
		.map_err(ConfigError::http_client_build)?;

	Ok(Arc::new(http::ReqwestHttpClient::with_client(client)))
}

#[cfg(not(feature = "reqwest"))]
fn default_transport() -> Result<Arc<dyn HttpTransport>, ConfigError> {
	Err(ConfigError::MissingTransport)
}

fn check_id_count(ids: &[u32]) -> Result<(), ConfigError> {
	if ids.len() > MAX_IDS_IN_REQUEST {
		Err(ConfigError::TooManyIds { count: ids.len(), max: MAX_IDS_IN_REQUEST })
	} else {
		Ok(())
	}
}

fn join_ids(ids: &[u32]) -> String {
	ids.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
}

fn join_product_types<S>(product_types: &[S]) -> Option<String>
where
	S: AsRef<str>,
{
	if product_types.is_empty() {
		return None;
	}

	Some(product_types.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(","))
}
