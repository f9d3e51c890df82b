//! Transport layer that throttles calls and injects the bearer token.

// crates.io
use oauth2::http::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	auth::TokenStore,
	cancel::CancelSignal,
	http::{HttpTransport, TransportFuture},
	rate_limit::RateLimiter,
};

/// Wraps a transport so every request is rate limited and carries a valid bearer token.
///
/// Per call: take a permit from the shared [`RateLimiter`] (failing with
/// [`Error::Cancelled`] when the signal fires), reject an empty credential pair before any
/// network I/O, obtain a usable token from the shared [`TokenStore`] (possibly triggering
/// the single refresh), set `Authorization: Bearer <token>`, and delegate.
pub struct AuthenticatingTransport<T>
where
	T: ?Sized + HttpTransport,
{
	inner: Arc<T>,
	tokens: Arc<TokenStore>,
	limiter: Arc<RateLimiter>,
	cancel: CancelSignal,
}
impl<T> AuthenticatingTransport<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates the layer over `inner`.
	pub fn new(
		inner: Arc<T>,
		tokens: Arc<TokenStore>,
		limiter: Arc<RateLimiter>,
		cancel: CancelSignal,
	) -> Self {
		Self { inner, tokens, limiter, cancel }
	}

	async fn authorize_and_send(&self, mut request: HttpRequest) -> Result<HttpResponse> {
		let _permit = self.limiter.acquire(&self.cancel).await?;

		self.tokens.credential().ensure_present()?;

		let token = self.tokens.ensure_valid().await?;

		request.headers_mut().insert(AUTHORIZATION, token.bearer()?);

		self.inner.send(request).await
	}
}
impl<T> HttpTransport for AuthenticatingTransport<T>
where
	T: ?Sized + HttpTransport,
{
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(self.authorize_and_send(request))
	}
}
