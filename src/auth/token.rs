//! Access token record and its usability window.

// self
use crate::{_prelude::*, auth::Secret, error::AuthError};

/// Bearer token issued by the client-credentials exchange.
///
/// Records are immutable; the token store replaces the whole record on refresh so
/// readers never observe a half-written token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub value: Secret,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from `issued_at + expires_in`.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Builds a token that expires `lifetime` after `issued_at`.
	pub fn new(value: impl Into<String>, issued_at: OffsetDateTime, lifetime: Duration) -> Self {
		Self { value: Secret::new(value), issued_at, expires_at: issued_at + lifetime }
	}

	/// Returns `true` while the token is non-empty and `instant` is before
	/// `expires_at - skew`.
	pub fn is_usable_at(&self, instant: OffsetDateTime, skew: Duration) -> bool {
		!self.value.is_empty() && instant < self.expires_at - skew
	}

	/// Convenience helper that checks usability against the current UTC instant.
	pub fn is_usable(&self, skew: Duration) -> bool {
		self.is_usable_at(OffsetDateTime::now_utc(), skew)
	}

	/// Renders the `Authorization` header value for this token.
	pub fn bearer(&self) -> Result<oauth2::http::HeaderValue, AuthError> {
		let mut value =
			oauth2::http::HeaderValue::from_str(&format!("Bearer {}", self.value.expose()))?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("value", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
