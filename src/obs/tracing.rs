// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome, metrics},
};

/// `tcgplayer.call` span bound to one call family and call site.
#[derive(Clone, Debug)]
pub struct CallSpan {
	kind: CallKind,
	span: tracing::Span,
}
impl CallSpan {
	/// Opens a span for `kind` at `stage`.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		let span = tracing::info_span!("tcgplayer.call", kind = kind.as_str(), stage);

		Self { kind, span }
	}

	/// Call family this span records.
	pub fn kind(&self) -> CallKind {
		self.kind
	}

	/// Runs `fut` inside the span and counts the attempt and its outcome.
	pub async fn observe<Fut, T, E>(&self, fut: Fut) -> Result<T, E>
	where
		Fut: Future<Output = Result<T, E>>,
	{
		use tracing::Instrument;

		metrics::count(self.kind, CallOutcome::Attempt);

		let result = fut.instrument(self.span.clone()).await;

		metrics::count(self.kind, CallOutcome::of(&result));

		result
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn observe_passes_results_through() {
		let span = CallSpan::new(CallKind::Page, "observe");
		let ok: Result<u8, &str> = span.observe(async { Ok(7) }).await;
		let err: Result<u8, &str> = span.observe(async { Err("boom") }).await;

		assert_eq!(ok, Ok(7));
		assert_eq!(err, Err("boom"));
		assert_eq!(span.kind(), CallKind::Page);
		assert_eq!(CallOutcome::of(&err), CallOutcome::Failure);
	}
}
