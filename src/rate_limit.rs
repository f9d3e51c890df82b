//! Token-bucket throttle shared by every outbound call of a client.
//!
//! The bucket starts full (`burst` permits) and refills continuously at `rate` permits
//! per second. [`RateLimiter::acquire`] takes one permit, sleeping until the bucket has
//! refilled enough or the caller's [`CancelSignal`] fires. Waiters are not queued in
//! order; whichever wakes first after a refill takes the permit.

// crates.io
use tokio::time::Instant;
// self
use crate::{_prelude::*, cancel::CancelSignal, error::ConfigError};

/// Proof that a permit was granted; carries the grant instant for diagnostics.
#[must_use = "a permit represents consumed rate budget"]
#[derive(Clone, Copy, Debug)]
pub struct Permit {
	/// Instant the permit was taken from the bucket.
	pub granted_at: Instant,
}

/// Steady rate and burst capacity of a [`RateLimiter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateLimit {
	/// Refill rate in permits per second.
	pub rate: f64,
	/// Bucket capacity; the number of permits available back-to-back.
	pub burst: u32,
}
impl RateLimit {
	/// Creates a new rate/burst pair.
	pub const fn new(rate: f64, burst: u32) -> Self {
		Self { rate, burst }
	}

	fn validate(self) -> Result<Self, ConfigError> {
		if self.rate.is_finite() && self.rate > 0. && self.burst > 0 {
			Ok(self)
		} else {
			Err(ConfigError::InvalidRateLimit { rate: self.rate, burst: self.burst })
		}
	}
}
impl Default for RateLimit {
	/// High enough to never be the bottleneck for a single exporter, low enough to stay
	/// under the service's published limits.
	fn default() -> Self {
		Self::new(80., 20)
	}
}

#[derive(Debug)]
struct Bucket {
	tokens: f64,
	refilled_at: Instant,
}

/// Thread-safe token bucket.
#[derive(Debug)]
pub struct RateLimiter {
	limit: RateLimit,
	bucket: Mutex<Bucket>,
}
impl RateLimiter {
	/// Creates a full bucket for the provided limit.
	pub fn new(limit: RateLimit) -> Result<Self, ConfigError> {
		let limit = limit.validate()?;

		Ok(Self {
			limit,
			bucket: Mutex::new(Bucket {
				tokens: f64::from(limit.burst),
				refilled_at: Instant::now(),
			}),
		})
	}

	/// Returns the configured limit.
	pub fn limit(&self) -> RateLimit {
		self.limit
	}

	/// Waits for a permit or fails with [`Error::Cancelled`] once `cancel` fires.
	pub async fn acquire(&self, cancel: &CancelSignal) -> Result<Permit> {
		loop {
			cancel.check()?;

			let wait = match self.try_take(Instant::now()) {
				Ok(permit) => return Ok(permit),
				Err(wait) => wait,
			};

			tokio::select! {
				_ = tokio::time::sleep(wait) => {},
				_ = cancel.cancelled() => return Err(Error::Cancelled),
			}
		}
	}

	/// Takes a permit if one is available at `now`; otherwise returns the time until the
	/// next permit refills.
	fn try_take(&self, now: Instant) -> Result<Permit, std::time::Duration> {
		let mut bucket = self.bucket.lock();
		let elapsed = now.saturating_duration_since(bucket.refilled_at).as_secs_f64();

		bucket.tokens = (bucket.tokens + elapsed * self.limit.rate).min(f64::from(self.limit.burst));
		bucket.refilled_at = now;

		if bucket.tokens >= 1. {
			bucket.tokens -= 1.;

			return Ok(Permit { granted_at: now });
		}

		let missing = 1. - bucket.tokens;

		Err(std::time::Duration::from_secs_f64(missing / self.limit.rate))
	}
}
