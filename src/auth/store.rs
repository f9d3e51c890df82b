//! Shared access-token cache with single-flight refresh.
//!
//! [`TokenStore::ensure_valid`] serves the cached token from a read lock while it is
//! usable. Once it is missing or inside the skew window, callers queue on an async
//! single-flight guard: the first one through performs the client-credentials exchange,
//! and everyone queued behind it re-reads the store and adopts the replacement instead of
//! exchanging again. A failed exchange is returned to the caller that ran it and is not
//! cached, so the next caller through the guard tries again.

mod metrics;

pub use metrics::TokenMetrics;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credential},
	http::HttpTransport,
	oauth,
	obs::{CallKind, CallOutcome, CallSpan},
};

/// Owner of the current access token for one credential pair.
pub struct TokenStore {
	credential: Credential,
	token_url: Url,
	transport: Arc<dyn HttpTransport>,
	skew: Duration,
	current: RwLock<Option<AccessToken>>,
	refresh_guard: AsyncMutex<()>,
	metrics: TokenMetrics,
}
impl TokenStore {
	/// Tokens are renewed this long before their stated expiry.
	pub const DEFAULT_SKEW: Duration = Duration::HOUR;

	/// Creates an empty store; the first [`ensure_valid`](Self::ensure_valid) call exchanges
	/// the credential through `transport`.
	pub fn new(
		credential: Credential,
		token_url: Url,
		transport: Arc<dyn HttpTransport>,
	) -> Self {
		Self {
			credential,
			token_url,
			transport,
			skew: Self::DEFAULT_SKEW,
			current: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
			metrics: TokenMetrics::default(),
		}
	}

	/// Overrides the early-renewal margin; negative values are clamped to zero.
	pub fn with_skew(mut self, skew: Duration) -> Self {
		self.skew = if skew.is_negative() { Duration::ZERO } else { skew };

		self
	}

	/// Credential pair the store exchanges.
	pub fn credential(&self) -> &Credential {
		&self.credential
	}

	/// Early-renewal margin.
	pub fn skew(&self) -> Duration {
		self.skew
	}

	/// Refresh counters for this store.
	pub fn metrics(&self) -> &TokenMetrics {
		&self.metrics
	}

	/// Returns the cached token without validating it.
	pub fn current(&self) -> Option<AccessToken> {
		self.current.read().clone()
	}

	/// Drops the cached token so the next call exchanges again.
	pub fn invalidate(&self) {
		*self.current.write() = None;
	}

	/// Returns a usable token, exchanging the credential at most once across concurrent
	/// callers.
	pub async fn ensure_valid(&self) -> Result<AccessToken> {
		let observed = self.current();

		if let Some(token) = observed.as_ref().filter(|token| token.is_usable(self.skew)) {
			return Ok(token.clone());
		}

		let _singleflight = self.refresh_guard.lock().await;
		let latest = self.current();

		// Another caller replaced the token while this one queued on the guard.
		let replaced = |token: &AccessToken| {
			!token.value.is_empty() && Some(token) != observed.as_ref()
		};

		if let Some(token) = latest.filter(replaced) {
			return Ok(token);
		}

		self.refresh_locked().await
	}

	/// Exchanges the credential unconditionally, still honoring the single-flight guard.
	pub async fn force_refresh(&self) -> Result<AccessToken> {
		let _singleflight = self.refresh_guard.lock().await;

		self.refresh_locked().await
	}

	async fn refresh_locked(&self) -> Result<AccessToken> {
		self.metrics.record(CallOutcome::Attempt);

		let result = CallSpan::new(CallKind::TokenExchange, "refresh")
			.observe(async {
				self.credential.ensure_present()?;

				let token = oauth::exchange_client_credentials(
					self.transport.clone(),
					&self.token_url,
					&self.credential,
				)
				.await?;

				tracing::debug!(expires_at = %token.expires_at, "Access token refreshed.");
				*self.current.write() = Some(token.clone());

				Ok::<_, Error>(token)
			})
			.await;

		if let Err(err) = &result {
			tracing::warn!(error = %err, "Access token refresh failed.");
		}

		self.metrics.record(CallOutcome::of(&result));

		result
	}
}
impl Debug for TokenStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenStore")
			.field("credential", &self.credential)
			.field("token_url", &self.token_url.as_str())
			.field("skew", &self.skew)
			.field("token_cached", &self.current.read().is_some())
			.finish()
	}
}
