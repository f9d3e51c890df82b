//! Concurrent pagination engine and deterministic merge.
//!
//! [`fetch_all`] turns a [`PagePlan`] into page offsets, fans them out to a bounded pool of
//! workers, and funnels every fetched item into one result queue. Pages complete out of
//! order, so callers that need a stable snapshot finish with [`PageHarvest::sorted`].

// crates.io
use tokio::{
	sync::mpsc,
	task::{JoinError, JoinSet},
};
// self
use crate::{
	_prelude::*,
	cancel::CancelSignal,
	error::ConfigError,
	obs::{CallKind, CallSpan},
};

const MAX_ITEM_QUEUE: usize = 1_024;

/// Records with a total-order identity key.
pub trait Identified {
	/// Key the merge step orders by.
	type Key: Ord;

	/// Returns the record's identity key.
	fn identity(&self) -> Self::Key;
}

/// Sorts `items` ascending by identity key; equal keys keep their relative order.
pub fn sort_by_identity<T>(items: &mut [T])
where
	T: Identified,
{
	items.sort_by_key(<T as Identified>::identity);
}

/// Collection size and page size of one paginated walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagePlan {
	/// Items the collection holds, as reported by a count query.
	pub total_items: usize,
	/// Items per page.
	pub page_size: usize,
}
impl PagePlan {
	/// Creates a plan.
	pub const fn new(total_items: usize, page_size: usize) -> Self {
		Self { total_items, page_size }
	}

	/// Rejects a zero page size.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.page_size == 0 { Err(ConfigError::InvalidPageSize) } else { Ok(()) }
	}

	/// Number of pages needed to cover the collection.
	pub fn page_count(&self) -> usize {
		if self.page_size == 0 { 0 } else { self.total_items.div_ceil(self.page_size) }
	}

	/// Page offsets in ascending order: `0, page_size, 2 * page_size, ...` below
	/// `total_items`.
	pub fn offsets(&self) -> impl Iterator<Item = usize> + use<> {
		let end = if self.page_size == 0 { 0 } else { self.total_items };

		(0..end).step_by(self.page_size.max(1))
	}
}

/// A page whose fetch failed; its items are absent from the harvest.
#[derive(Debug)]
pub struct PageFailure {
	/// Offset of the failed page.
	pub offset: usize,
	/// Error returned by the page fetcher.
	pub error: Error,
}

/// Items gathered by [`fetch_all`] plus the pages that could not be fetched.
#[derive(Debug)]
pub struct PageHarvest<T> {
	/// Items in arrival order.
	pub items: Vec<T>,
	/// Failed pages, ascending by offset.
	pub failures: Vec<PageFailure>,
}
impl<T> PageHarvest<T> {
	/// Returns `true` when every page was fetched.
	pub fn is_complete(&self) -> bool {
		self.failures.is_empty()
	}

	/// Offsets of the pages that failed.
	pub fn failed_offsets(&self) -> Vec<usize> {
		self.failures.iter().map(|failure| failure.offset).collect()
	}

	/// Orders the items by identity key.
	pub fn sorted(mut self) -> Self
	where
		T: Identified,
	{
		sort_by_identity(&mut self.items);

		self
	}
}

/// Fetches every page of `plan` with `workers` concurrent workers.
///
/// A producer pushes offsets in ascending order into a bounded queue; each worker pulls
/// the next offset, awaits `fetch_page`, and forwards the page's items one by one into a
/// bounded result queue that this function drains. A failing page is logged, recorded in
/// [`PageHarvest::failures`], and skipped; the walk continues. Every offset is fetched at
/// most once.
///
/// Fails with a [`ConfigError`] for a zero page size or zero workers, and with
/// [`Error::Cancelled`] when `cancel` fires before the walk completes.
pub async fn fetch_all<T, F, Fut>(
	plan: PagePlan,
	workers: usize,
	cancel: &CancelSignal,
	fetch_page: F,
) -> Result<PageHarvest<T>>
where
	T: 'static + Send,
	F: 'static + Send + Sync + Fn(usize) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Vec<T>>>,
{
	plan.validate()?;

	if workers == 0 {
		return Err(ConfigError::InvalidWorkerCount.into());
	}

	cancel.check()?;

	tracing::debug!(
		total_items = plan.total_items,
		pages = plan.page_count(),
		workers,
		"Starting paginated fetch."
	);

	let fetch_page = Arc::new(fetch_page);
	let (offset_tx, offset_rx) = mpsc::channel::<usize>(workers);
	let offset_rx = Arc::new(AsyncMutex::new(offset_rx));
	let (item_tx, mut item_rx) = mpsc::channel::<T>(plan.page_size.min(MAX_ITEM_QUEUE));
	let producer = {
		let cancel = cancel.clone();
		let offsets = plan.offsets();

		tokio::spawn(async move {
			for offset in offsets {
				tokio::select! {
					biased;
					_ = cancel.cancelled() => break,
					sent = offset_tx.send(offset) => if sent.is_err() { break },
				}
			}
		})
	};
	let mut pool = JoinSet::new();

	for worker in 0..workers {
		let offset_rx = offset_rx.clone();
		let item_tx = item_tx.clone();
		let fetch_page = fetch_page.clone();
		let cancel = cancel.clone();

		pool.spawn(async move {
			let mut failures = Vec::new();

			loop {
				let next = offset_rx.lock().await.recv().await;
				let Some(offset) = next else { break };

				if cancel.is_cancelled() {
					break;
				}

				match CallSpan::new(CallKind::Page, "fetch_page").observe(fetch_page(offset)).await {
					Ok(items) =>
						for item in items {
							// The receiver only disappears when the caller stopped draining.
							if item_tx.send(item).await.is_err() {
								return failures;
							}
						},
					Err(error) => {
						tracing::warn!(worker, offset, error = %error, "Page fetch failed; skipping.");
						failures.push(PageFailure { offset, error });
					},
				}
			}

			failures
		});
	}

	// Workers hold the only remaining senders, so the queue closes once they all finish.
	drop(item_tx);

	let coordinator = tokio::spawn(async move {
		let mut failures = Vec::new();

		while let Some(joined) = pool.join_next().await {
			failures.extend(joined.unwrap_or_else(resume_if_panicked));
		}

		failures
	});
	// The reported total is untrusted; reserve at most what the pool can have in flight.
	let mut items = Vec::with_capacity(plan.page_size.saturating_mul(workers).min(plan.total_items));

	while let Some(item) = item_rx.recv().await {
		items.push(item);
	}

	let mut failures = match coordinator.await {
		Ok(failures) => failures,
		Err(e) => {
			resume_if_panicked(e);

			return Err(Error::Cancelled);
		},
	};
	let _ = producer.await;

	cancel.check()?;
	failures.sort_by_key(|failure| failure.offset);

	tracing::debug!(items = items.len(), failed_pages = failures.len(), "Paginated fetch finished.");

	Ok(PageHarvest { items, failures })
}

fn resume_if_panicked(e: JoinError) -> Vec<PageFailure> {
	if e.is_panic() {
		std::panic::resume_unwind(e.into_panic());
	}

	Vec::new()
}

#[cfg(test)]
mod tests {
	// std
	use std::{
		collections::BTreeSet,
		sync::atomic::{AtomicUsize, Ordering},
	};
	// self
	use super::*;
	use crate::error::ApiError;

	#[derive(Clone, Debug, PartialEq, Eq)]
	struct Row {
		id: usize,
		arrival: usize,
	}
	impl Identified for Row {
		type Key = usize;

		fn identity(&self) -> usize {
			self.id
		}
	}

	fn page(offset: usize, page_size: usize, total: usize) -> Vec<Row> {
		(offset..(offset + page_size).min(total)).map(|id| Row { id, arrival: 0 }).collect()
	}

	#[test]
	fn offsets_cover_collection_once() {
		let plan = PagePlan::new(250, 100);

		assert_eq!(plan.offsets().collect::<Vec<_>>(), vec![0, 100, 200]);
		assert_eq!(plan.page_count(), 3);
		assert_eq!(PagePlan::new(200, 100).page_count(), 2);
		assert_eq!(PagePlan::new(0, 100).offsets().count(), 0);
		assert!(matches!(PagePlan::new(10, 0).validate(), Err(ConfigError::InvalidPageSize)));
		assert_eq!(PagePlan::new(10, 0).offsets().count(), 0);
	}

	#[test]
	fn sort_is_idempotent_and_order_independent() {
		let forward: Vec<Row> = (0..20).map(|id| Row { id, arrival: 0 }).collect();
		let mut shuffled: Vec<Row> = forward.iter().rev().cloned().collect();

		shuffled.swap(3, 11);
		sort_by_identity(&mut shuffled);

		assert_eq!(shuffled, forward);

		let once = shuffled.clone();

		sort_by_identity(&mut shuffled);

		assert_eq!(shuffled, once);
	}

	#[test]
	fn sort_keeps_equal_keys_in_arrival_order() {
		let mut rows = vec![
			Row { id: 2, arrival: 0 },
			Row { id: 1, arrival: 1 },
			Row { id: 2, arrival: 2 },
		];

		sort_by_identity(&mut rows);

		assert_eq!(rows.iter().map(|row| row.arrival).collect::<Vec<_>>(), vec![1, 0, 2]);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn every_page_is_fetched_exactly_once() {
		let calls = Arc::new(Mutex::new(Vec::new()));
		let seen = calls.clone();
		let harvest = fetch_all(PagePlan::new(1_050, 100), 4, &CancelSignal::new(), move |offset| {
			seen.lock().push(offset);

			async move { Ok(page(offset, 100, 1_050)) }
		})
		.await
		.expect("Fetch should succeed.")
		.sorted();
		let mut calls = calls.lock().clone();

		calls.sort_unstable();

		assert_eq!(calls, (0..1_050).step_by(100).collect::<Vec<_>>());
		assert!(harvest.is_complete());
		assert_eq!(harvest.items.len(), 1_050);
		assert!(harvest.items.iter().enumerate().all(|(idx, row)| row.id == idx));
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn failed_page_is_reported_without_aborting() {
		let harvest = fetch_all(PagePlan::new(250, 100), 3, &CancelSignal::new(), |offset| async move {
			if offset == 100 {
				Err(ApiError::Rejected { status: 500, messages: vec!["boom".into()] }.into())
			} else {
				Ok(page(offset, 100, 250))
			}
		})
		.await
		.expect("A single failed page should not abort the walk.");
		let ids: BTreeSet<_> = harvest.items.iter().map(|row| row.id).collect();

		assert_eq!(harvest.items.len(), 150);
		assert_eq!(harvest.failed_offsets(), vec![100]);
		assert!(!harvest.is_complete());
		assert!(ids.iter().all(|id| !(100..200).contains(id)));
	}

	#[tokio::test]
	async fn zero_workers_or_page_size_is_rejected() {
		let fetch = |_| async { Ok(Vec::<Row>::new()) };
		let cancel = CancelSignal::new();

		assert!(matches!(
			fetch_all(PagePlan::new(10, 5), 0, &cancel, fetch).await,
			Err(Error::Config(ConfigError::InvalidWorkerCount))
		));
		assert!(matches!(
			fetch_all(PagePlan::new(10, 0), 2, &cancel, fetch).await,
			Err(Error::Config(ConfigError::InvalidPageSize))
		));
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
	async fn cancellation_stops_the_walk() {
		let cancel = CancelSignal::new();
		let trigger = cancel.clone();
		let fetched = Arc::new(AtomicUsize::new(0));
		let counter = fetched.clone();
		let result = fetch_all(PagePlan::new(10_000, 10), 2, &cancel, move |offset| {
			if counter.fetch_add(1, Ordering::SeqCst) == 5 {
				trigger.cancel();
			}

			async move { Ok(page(offset, 10, 10_000)) }
		})
		.await;

		assert!(matches!(result, Err(Error::Cancelled)));
		assert!(fetched.load(Ordering::SeqCst) < 1_000);
	}

	#[tokio::test]
	async fn empty_collection_yields_empty_harvest() {
		let harvest = fetch_all(PagePlan::new(0, 100), 8, &CancelSignal::new(), |_| async {
			Ok(Vec::<Row>::new())
		})
		.await
		.expect("Empty walk should succeed.");

		assert!(harvest.items.is_empty());
		assert!(harvest.is_complete());
	}

	#[tokio::test]
	async fn oversized_total_is_not_preallocated() {
		let cancel = CancelSignal::new();
		let trigger = cancel.clone();
		let result = fetch_all(PagePlan::new(usize::MAX / 8, 100), 1, &cancel, move |_| {
			trigger.cancel();

			async { Ok(Vec::<Row>::new()) }
		})
		.await;

		assert!(matches!(result, Err(Error::Cancelled)));
	}
}
