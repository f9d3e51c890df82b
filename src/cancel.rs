//! Cooperative cancellation shared by throttling, pagination, and the exporter.

// crates.io
use tokio::sync::watch;
// self
use crate::_prelude::*;

/// Cloneable cancellation signal; every clone observes the same state.
///
/// Firing is one-way: once [`CancelSignal::cancel`] is called, every pending and future
/// [`CancelSignal::cancelled`] wait resolves immediately.
#[derive(Clone, Debug)]
pub struct CancelSignal(Arc<watch::Sender<bool>>);
impl CancelSignal {
	/// Creates a signal that has not fired yet.
	pub fn new() -> Self {
		Self(Arc::new(watch::Sender::new(false)))
	}

	/// Fires the signal.
	pub fn cancel(&self) {
		self.0.send_replace(true);
	}

	/// Returns `true` once the signal has fired.
	pub fn is_cancelled(&self) -> bool {
		*self.0.borrow()
	}

	/// Resolves when the signal fires.
	pub async fn cancelled(&self) {
		let mut rx = self.0.subscribe();

		// The sender lives inside `self`, so the channel cannot close while we wait.
		let _ = rx.wait_for(|fired| *fired).await;
	}

	/// Fails with [`Error::Cancelled`] if the signal already fired.
	pub fn check(&self) -> Result<()> {
		if self.is_cancelled() { Err(Error::Cancelled) } else { Ok(()) }
	}
}
impl Default for CancelSignal {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn clones_share_state() {
		let signal = CancelSignal::new();
		let observer = signal.clone();

		assert!(!observer.is_cancelled());
		assert!(observer.check().is_ok());

		let waiter = tokio::spawn(async move { observer.cancelled().await });

		signal.cancel();
		waiter.await.expect("Waiter task should finish once the signal fires.");

		assert!(signal.is_cancelled());
		assert!(matches!(signal.check(), Err(Error::Cancelled)));
	}

	#[tokio::test]
	async fn waiting_after_fire_returns_immediately() {
		let signal = CancelSignal::new();

		signal.cancel();
		signal.cancelled().await;
	}
}
