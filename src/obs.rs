//! Spans and counters around every outbound call family.
//!
//! [`CallSpan::observe`] wraps a fallible future in a `tcgplayer.call` span (fields `kind`
//! and `stage`) and, with the `metrics` feature, bumps `tcgplayer_call_total{kind,outcome}`
//! once on entry and once with the terminal outcome.

mod metrics;
mod tracing;

pub use tracing::*;

/// Call families observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials exchange against the token endpoint.
	TokenExchange,
	/// Single catalog or pricing request.
	Api,
	/// One page fetched by the pagination engine.
	Page,
	/// Whole-category export.
	Export,
}
impl CallKind {
	/// Label used in span fields and metric labels.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::TokenExchange => "token_exchange",
			Self::Api => "api",
			Self::Page => "page",
			Self::Export => "export",
		}
	}
}

/// Entry or terminal state of one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// The call started.
	Attempt,
	/// The call returned `Ok`.
	Success,
	/// The call returned `Err`.
	Failure,
}
impl CallOutcome {
	/// Label used in metric labels.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Failure => "failure",
		}
	}

	/// Terminal outcome of `result`.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}
}
