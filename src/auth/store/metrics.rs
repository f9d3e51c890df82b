// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::CallOutcome;

/// In-process counters for credential exchanges performed by one [`TokenStore`].
///
/// [`TokenStore`]: crate::auth::TokenStore
#[derive(Debug, Default)]
pub struct TokenMetrics {
	exchanges: [AtomicU64; 3],
}
impl TokenMetrics {
	/// Exchanges started against the token endpoint.
	pub fn attempts(&self) -> u64 {
		self.count(CallOutcome::Attempt)
	}

	/// Exchanges that stored a new token.
	pub fn successes(&self) -> u64 {
		self.count(CallOutcome::Success)
	}

	/// Exchanges that returned an error.
	pub fn failures(&self) -> u64 {
		self.count(CallOutcome::Failure)
	}

	pub(crate) fn record(&self, outcome: CallOutcome) {
		self.exchanges[slot(outcome)].fetch_add(1, Ordering::Relaxed);
	}

	fn count(&self, outcome: CallOutcome) -> u64 {
		self.exchanges[slot(outcome)].load(Ordering::Relaxed)
	}
}

const fn slot(outcome: CallOutcome) -> usize {
	match outcome {
		CallOutcome::Attempt => 0,
		CallOutcome::Success => 1,
		CallOutcome::Failure => 2,
	}
}
