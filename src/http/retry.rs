//! Connection-level retry with exponential backoff.

// std
use std::time::Duration as StdDuration;
// crates.io
use oauth2::http::{HeaderMap, header::RETRY_AFTER};
use rand::Rng;
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{HttpTransport, TransportFuture},
};

/// Backoff schedule applied by [`Retrying`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Retries allowed after the first attempt.
	pub max_retries: u32,
	/// Wait before the first retry; doubled for every following attempt.
	pub min_backoff: StdDuration,
	/// Upper bound for any single wait, including `Retry-After` hints.
	pub max_backoff: StdDuration,
}
impl RetryPolicy {
	/// Policy that never retries.
	pub const fn none() -> Self {
		Self { max_retries: 0, min_backoff: StdDuration::ZERO, max_backoff: StdDuration::ZERO }
	}

	/// Overrides the number of retries.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;

		self
	}

	/// Overrides the backoff bounds.
	pub fn with_backoff(mut self, min: StdDuration, max: StdDuration) -> Self {
		self.min_backoff = min;
		self.max_backoff = max.max(min);

		self
	}

	/// Computes the wait before retry number `attempt` (zero-based).
	///
	/// A server-provided `Retry-After` wins over the exponential schedule; both are capped
	/// at `max_backoff`. Up to a quarter of the exponential wait is added as jitter.
	pub fn backoff(&self, attempt: u32, retry_after: Option<StdDuration>) -> StdDuration {
		if let Some(hint) = retry_after {
			return hint.min(self.max_backoff);
		}

		let base = self.min_backoff.saturating_mul(2_u32.saturating_pow(attempt));
		let base = base.min(self.max_backoff);
		let jitter_ms = u64::try_from(base.as_millis() / 4).unwrap_or(u64::MAX);
		let jitter = if jitter_ms == 0 {
			StdDuration::ZERO
		} else {
			StdDuration::from_millis(rand::rng().random_range(0..=jitter_ms))
		};

		base.saturating_add(jitter).min(self.max_backoff)
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_retries: 4,
			min_backoff: StdDuration::from_secs(1),
			max_backoff: StdDuration::from_secs(30),
		}
	}
}

/// Returns `true` for statuses worth another attempt (throttling and server errors).
pub fn is_retryable_status(status: StatusCode) -> bool {
	status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Transport layer that re-sends transient failures according to a [`RetryPolicy`].
///
/// Network and I/O errors, HTTP 429, and HTTP 5xx are retried. Every other error
/// (authentication, configuration, cancellation) and every other status is returned as-is.
pub struct Retrying<T>
where
	T: ?Sized + HttpTransport,
{
	inner: Arc<T>,
	policy: RetryPolicy,
}
impl<T> Retrying<T>
where
	T: ?Sized + HttpTransport,
{
	/// Wraps `inner` with the provided policy.
	pub fn new(inner: Arc<T>, policy: RetryPolicy) -> Self {
		Self { inner, policy }
	}

	/// Returns the active policy.
	pub fn policy(&self) -> &RetryPolicy {
		&self.policy
	}

	async fn send_with_retries(&self, request: HttpRequest) -> Result<HttpResponse> {
		let mut attempt = 0;

		loop {
			let (status, retry_after) = match self.inner.send(clone_request(&request)).await {
				Ok(response) if !is_retryable_status(response.status()) => return Ok(response),
				Ok(response) => (
					Some(response.status().as_u16()),
					parse_retry_after(response.headers()).map(|hint| hint.unsigned_abs()),
				),
				Err(err) if err.is_transient() && attempt < self.policy.max_retries => {
					tracing::debug!(error = %err, attempt, "Transient transport failure.");

					(None, None)
				},
				Err(err) => return Err(err),
			};

			if attempt >= self.policy.max_retries {
				return Err(TransportError::RetriesExhausted {
					method: request.method().to_string(),
					url: request.uri().to_string(),
					attempts: attempt + 1,
					status,
				}
				.into());
			}

			let wait = self.policy.backoff(attempt, retry_after);

			tracing::debug!(
				uri = %request.uri(),
				status,
				attempt,
				wait_ms = wait.as_millis() as u64,
				"Retrying request."
			);
			tokio::time::sleep(wait).await;

			attempt += 1;
		}
	}
}
impl<T> HttpTransport for Retrying<T>
where
	T: ?Sized + HttpTransport,
{
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(self.send_with_retries(request))
	}
}

fn clone_request(request: &HttpRequest) -> HttpRequest {
	let mut copy = HttpRequest::new(request.body().clone());

	*copy.method_mut() = request.method().clone();
	*copy.uri_mut() = request.uri().clone();
	*copy.version_mut() = request.version();
	*copy.headers_mut() = request.headers().clone();

	copy
}

pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
