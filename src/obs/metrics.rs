// self
use crate::obs::{CallKind, CallOutcome};

#[cfg(feature = "metrics")]
pub(super) fn count(kind: CallKind, outcome: CallOutcome) {
	metrics::counter!(
		"tcgplayer_call_total",
		"kind" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(super) fn count(_: CallKind, _: CallOutcome) {}
