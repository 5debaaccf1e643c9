//! Candle store with TTL refresh and single-flight rebuilds.

use futures::future::{self, BoxFuture, FutureExt, Shared};
use hourbar_aggregate::{Aggregation, TickAggregator};
use hourbar_source::TickSource;
use hourbar_types::{BucketKey, Candle, ReferenceZone};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::{RefreshError, Snapshot, StoreConfig, StoreError, StoreState};

/// Outcome of one rebuild, shared by every caller waiting on it.
type SharedRefresh = Shared<BoxFuture<'static, Result<Arc<Snapshot>, RefreshError>>>;

/// How a refresh was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// Rebuild only if the table is missing or stale and not backing off.
    Lazy,
    /// Rebuild regardless of age.
    Forced,
}

/// Cache of the most recent complete candle table.
///
/// Lookups read the current [`Snapshot`] through a shared pointer that is
/// swapped wholesale by each successful rebuild. At most one rebuild runs
/// at a time: callers that find a rebuild in flight join it instead of
/// starting another. When a stale snapshot exists, lookups return it
/// immediately and the rebuild proceeds on a background task.
///
/// Cloning a store is cheap and yields a handle to the same cache.
#[derive(Clone)]
pub struct CandleStore {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn TickSource>,
    aggregator: TickAggregator,
    config: StoreConfig,
    current: RwLock<Option<Arc<Snapshot>>>,
    in_flight: Mutex<Option<SharedRefresh>>,
    last_failure: Mutex<Option<(Instant, RefreshError)>>,
    generation: AtomicU64,
}

impl CandleStore {
    /// Creates an empty store over the given source.
    #[must_use]
    pub fn new(source: Arc<dyn TickSource>, aggregator: TickAggregator, config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                aggregator,
                config,
                current: RwLock::new(None),
                in_flight: Mutex::new(None),
                last_failure: Mutex::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Returns the reference zone tables are bucketed in.
    #[must_use]
    pub fn zone(&self) -> ReferenceZone {
        self.inner.aggregator.zone()
    }

    /// Returns the currently published snapshot, without refreshing.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.inner.snapshot()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> StoreState {
        if lock(&self.inner.in_flight).is_some() {
            StoreState::Building
        } else if self.snapshot().is_some() {
            StoreState::Ready
        } else {
            StoreState::Empty
        }
    }

    /// Returns the error of the most recent rebuild, if it failed.
    #[must_use]
    pub fn last_failure(&self) -> Option<RefreshError> {
        lock(&self.inner.last_failure)
            .as_ref()
            .map(|(_, error)| error.clone())
    }

    /// Looks up one bucket, refreshing first when due.
    ///
    /// Returns `Ok(None)` for a well-formed key with no trades.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] only if no table has ever been
    /// published and building one failed.
    pub async fn lookup(&self, key: &BucketKey) -> Result<Option<Candle>, StoreError> {
        let snapshot = self.maybe_refresh().await?;
        Ok(snapshot.get(key))
    }

    /// Returns a snapshot to read from, starting a rebuild when one is due.
    ///
    /// A fresh snapshot is returned as-is. A stale snapshot is returned
    /// immediately while a rebuild runs in the background. Only an empty
    /// store waits, and then on the single in-flight rebuild.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store is empty and the
    /// rebuild failed, or failed recently and is backing off.
    pub async fn maybe_refresh(&self) -> Result<Arc<Snapshot>, StoreError> {
        match self.snapshot() {
            Some(snapshot) if !self.inner.is_stale(&snapshot) => Ok(snapshot),
            Some(stale) => {
                // The rebuild task is already spawned; its result is not awaited here.
                drop(self.start_refresh(Trigger::Lazy));
                tracing::debug!(
                    generation = stale.generation(),
                    age_secs = stale.age().as_secs(),
                    "Serving stale candle table"
                );
                Ok(stale)
            }
            None => self
                .start_refresh(Trigger::Lazy)
                .await
                .map_err(StoreError::Unavailable),
        }
    }

    /// Rebuilds the table now, regardless of its age.
    ///
    /// If a rebuild is already in flight, waits for that one instead of
    /// starting another.
    ///
    /// # Errors
    ///
    /// Returns the rebuild's error. The previously published snapshot, if
    /// any, stays in place.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, RefreshError> {
        self.start_refresh(Trigger::Forced).await
    }

    /// Spawns a task that refreshes the table every `period`.
    ///
    /// The first refresh happens immediately. Failures are logged and the
    /// previous table is kept. Abort the returned handle to stop refreshing.
    pub fn spawn_refresher(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(error) = store.refresh().await {
                    tracing::warn!(%error, "Periodic refresh failed");
                }
            }
        })
    }

    /// Joins the in-flight rebuild or starts a new one.
    fn start_refresh(&self, trigger: Trigger) -> SharedRefresh {
        let mut slot = lock(&self.inner.in_flight);
        if let Some(in_flight) = slot.as_ref() {
            return in_flight.clone();
        }

        if trigger == Trigger::Lazy {
            // A rebuild may have been published since the caller looked.
            if let Some(snapshot) = self.snapshot().filter(|s| !self.inner.is_stale(s)) {
                return future::ready(Ok(snapshot)).boxed().shared();
            }
            if let Some(error) = self.inner.recent_failure() {
                return future::ready(Err(error)).boxed().shared();
            }
        }

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move { inner.rebuild().await });
        let refresh = async move {
            task.await
                .unwrap_or_else(|error| Err(RefreshError::Aborted(error.to_string())))
        }
        .boxed()
        .shared();

        *slot = Some(refresh.clone());
        refresh
    }
}

impl std::fmt::Debug for CandleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleStore")
            .field("source", &self.inner.source)
            .field("zone", &self.zone())
            .field("config", &self.inner.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_stale(&self, snapshot: &Snapshot) -> bool {
        snapshot.age() >= self.config.refresh_interval
    }

    fn recent_failure(&self) -> Option<RefreshError> {
        lock(&self.last_failure)
            .as_ref()
            .filter(|(failed_at, _)| failed_at.elapsed() < self.config.retry_backoff)
            .map(|(_, error)| error.clone())
    }

    /// Runs one rebuild and publishes its table on success.
    ///
    /// The in-flight slot is cleared only after the new snapshot is
    /// published, so a caller that sees no rebuild in flight also sees its
    /// result.
    async fn rebuild(&self) -> Result<Arc<Snapshot>, RefreshError> {
        let _in_flight = InFlightReset(&self.in_flight);
        let started = Instant::now();
        tracing::info!(source = %self.source.describe(), "Rebuilding candle table");

        let result = match self.config.rebuild_timeout {
            Some(limit) => tokio::time::timeout(limit, self.build())
                .await
                .unwrap_or(Err(RefreshError::TimedOut(limit))),
            None => self.build().await,
        };

        match result {
            Ok(aggregation) => {
                let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                let snapshot = Arc::new(Snapshot::new(aggregation, generation));
                *self.current.write().unwrap_or_else(PoisonError::into_inner) =
                    Some(Arc::clone(&snapshot));
                *lock(&self.last_failure) = None;

                let stats = snapshot.stats();
                tracing::info!(
                    generation,
                    records = stats.records,
                    ticks = stats.ticks,
                    skipped = stats.skipped,
                    buckets = stats.buckets,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Candle table rebuilt"
                );
                Ok(snapshot)
            }
            Err(error) => {
                tracing::warn!(%error, "Candle table rebuild failed, keeping previous table");
                *lock(&self.last_failure) = Some((Instant::now(), error.clone()));
                Err(error)
            }
        }
    }

    async fn build(&self) -> Result<Aggregation, RefreshError> {
        let records = self.source.read_records().await?;
        let aggregator = self.aggregator;
        tokio::task::spawn_blocking(move || aggregator.aggregate_records(records))
            .await
            .map_err(|error| RefreshError::Aborted(error.to_string()))
    }
}

/// Clears the in-flight slot when a rebuild ends, including by panic or
/// cancellation.
struct InFlightReset<'a>(&'a Mutex<Option<SharedRefresh>>);

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        *lock(self.0) = None;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hourbar_source::{MemorySource, SourceError};
    use hourbar_types::RawRecord;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use tokio::sync::Notify;

    /// Memory source with read counting and fault injection.
    #[derive(Debug, Default)]
    struct TestSource {
        records: MemorySource,
        reads: AtomicUsize,
        fail: AtomicBool,
        stall: AtomicBool,
        gate: Mutex<Option<Arc<Notify>>>,
    }

    impl TestSource {
        fn with_records(records: Vec<RawRecord>) -> Arc<Self> {
            Arc::new(Self {
                records: MemorySource::new(records),
                ..Self::default()
            })
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        /// Makes subsequent reads wait until the returned gate is notified.
        fn close_gate(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
            gate
        }
    }

    #[async_trait]
    impl TickSource for TestSource {
        async fn read_records(&self) -> Result<Vec<RawRecord>, SourceError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if self.stall.load(Ordering::SeqCst) {
                future::pending::<()>().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(SourceError::Unavailable("simulated outage".to_string()));
            }
            self.records.read_records().await
        }

        fn describe(&self) -> String {
            "test".to_string()
        }
    }

    fn hour_records(price: i64, hours: u32) -> Vec<RawRecord> {
        (0..hours)
            .map(|hour| RawRecord::new(format!("2024-01-15 {hour:02}:30:00"), "XYZ", price.to_string()))
            .collect()
    }

    fn key(hour: u32) -> BucketKey {
        BucketKey::new("XYZ", 2024, 1, 15, hour).unwrap()
    }

    fn test_config() -> StoreConfig {
        StoreConfig::default().with_rebuild_timeout(None)
    }

    fn store_over(source: &Arc<TestSource>, config: StoreConfig) -> CandleStore {
        let source: Arc<dyn TickSource> = source.clone();
        CandleStore::new(source, TickAggregator::default(), config)
    }

    #[tokio::test]
    async fn test_first_lookup_builds_table() {
        let source = TestSource::with_records(hour_records(100, 2));
        let store = store_over(&source, test_config());
        assert_eq!(store.state(), StoreState::Empty);

        let candle = store.lookup(&key(1)).await.unwrap();
        assert_eq!(candle, Some(Candle::from_price(100)));
        assert_eq!(store.state(), StoreState::Ready);
        assert_eq!(store.snapshot().unwrap().generation(), 1);
    }

    #[tokio::test]
    async fn test_empty_source_is_not_found() {
        let source = TestSource::with_records(Vec::new());
        let store = store_over(&source, test_config());

        assert_eq!(store.lookup(&key(0)).await.unwrap(), None);
        assert_eq!(store.state(), StoreState::Ready);
        assert!(store.snapshot().unwrap().table().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_table_is_not_rebuilt() {
        let source = TestSource::with_records(hour_records(100, 1));
        let store = store_over(&source, test_config());

        for _ in 0..5 {
            store.lookup(&key(0)).await.unwrap();
        }
        tokio::time::advance(Duration::from_secs(299)).await;
        store.lookup(&key(0)).await.unwrap();

        assert_eq!(source.reads(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_table_served_while_refreshing() {
        let source = TestSource::with_records(hour_records(100, 1));
        let store = store_over(&source, test_config());
        store.lookup(&key(0)).await.unwrap();

        source.records.replace(hour_records(200, 1));
        tokio::time::advance(StoreConfig::DEFAULT_REFRESH_INTERVAL).await;

        // Stale value comes back immediately; the rebuild is in flight.
        let stale = store.lookup(&key(0)).await.unwrap();
        assert_eq!(stale, Some(Candle::from_price(100)));
        assert_eq!(store.state(), StoreState::Building);

        let snapshot = store.refresh().await.unwrap();
        assert_eq!(snapshot.generation(), 2);
        assert_eq!(store.lookup(&key(0)).await.unwrap(), Some(Candle::from_price(200)));
        assert_eq!(source.reads(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_rebuild() {
        let source = TestSource::with_records(hour_records(100, 3));
        let gate = source.close_gate();
        let store = store_over(&source, test_config());

        let lookups: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.lookup(&key(i % 3)).await })
            })
            .collect();

        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert_eq!(store.state(), StoreState::Building);

        gate.notify_one();
        for lookup in lookups {
            let candle = lookup.await.unwrap().unwrap();
            assert_eq!(candle, Some(Candle::from_price(100)));
        }

        assert_eq!(source.reads(), 1);
        assert_eq!(store.snapshot().unwrap().generation(), 1);
    }

    #[tokio::test]
    async fn test_readers_see_whole_tables_only() {
        let source = TestSource::with_records(hour_records(1, 5));
        let store = store_over(&source, test_config());
        store.refresh().await.unwrap();

        source.records.replace(hour_records(2, 10));
        let gate = source.close_gate();
        let refresh = {
            let store = store.clone();
            tokio::spawn(async move { store.refresh().await })
        };
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert_eq!(store.state(), StoreState::Building);

        // While the rebuild is blocked, readers see the old table in full.
        for hour in 0..10 {
            let expected = (hour < 5).then_some(Candle::from_price(1));
            assert_eq!(store.lookup(&key(hour)).await.unwrap(), expected);
        }

        gate.notify_one();
        refresh.await.unwrap().unwrap();

        for hour in 0..10 {
            assert_eq!(store.lookup(&key(hour)).await.unwrap(), Some(Candle::from_price(2)));
        }
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.table().len(), 10);
        assert_eq!(snapshot.stats().buckets, 10);
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_previous_table() {
        let source = TestSource::with_records(hour_records(100, 2));
        let store = store_over(&source, test_config());
        store.refresh().await.unwrap();
        let built_at = store.snapshot().unwrap().built_at();

        source.fail.store(true, Ordering::SeqCst);
        let result = store.refresh().await;
        assert!(matches!(result, Err(RefreshError::Source(_))));
        assert!(store.last_failure().is_some());

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.generation(), 1);
        assert_eq!(snapshot.built_at(), built_at);
        assert_eq!(store.state(), StoreState::Ready);
        assert_eq!(store.lookup(&key(1)).await.unwrap(), Some(Candle::from_price(100)));

        source.fail.store(false, Ordering::SeqCst);
        store.refresh().await.unwrap();
        assert!(store.last_failure().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_on_empty_store_backs_off() {
        let source = TestSource::with_records(hour_records(100, 1));
        source.fail.store(true, Ordering::SeqCst);
        let store = store_over(&source, test_config());

        let first = store.lookup(&key(0)).await;
        assert!(matches!(
            first,
            Err(StoreError::Unavailable(RefreshError::Source(_)))
        ));
        assert_eq!(store.state(), StoreState::Empty);

        // Within the backoff the last error is reported without a new read.
        assert!(store.lookup(&key(0)).await.is_err());
        assert_eq!(source.reads(), 1);

        source.fail.store(false, Ordering::SeqCst);
        tokio::time::advance(StoreConfig::DEFAULT_RETRY_BACKOFF).await;
        assert_eq!(store.lookup(&key(0)).await.unwrap(), Some(Candle::from_price(100)));
        assert_eq!(source.reads(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_source_times_out() {
        let source = TestSource::with_records(hour_records(100, 1));
        source.stall.store(true, Ordering::SeqCst);
        let config = StoreConfig::default().with_rebuild_timeout(Some(Duration::from_secs(5)));
        let store = store_over(&source, config);

        let result = store.lookup(&key(0)).await;
        assert!(matches!(
            result,
            Err(StoreError::Unavailable(RefreshError::TimedOut(limit))) if limit == Duration::from_secs(5)
        ));
        assert_eq!(store.state(), StoreState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_rebuild_keeps_previous_table() {
        let source = TestSource::with_records(hour_records(100, 1));
        let limit = Duration::from_secs(5);
        let store = store_over(&source, StoreConfig::default().with_rebuild_timeout(Some(limit)));
        store.refresh().await.unwrap();

        source.stall.store(true, Ordering::SeqCst);
        let refresh = {
            let store = store.clone();
            tokio::spawn(async move { store.refresh().await })
        };
        tokio::task::yield_now().await;
        assert_eq!(store.state(), StoreState::Building);
        assert_eq!(store.lookup(&key(0)).await.unwrap(), Some(Candle::from_price(100)));

        let result = refresh.await.unwrap();
        assert!(matches!(result, Err(RefreshError::TimedOut(d)) if d == limit));
        assert_eq!(store.snapshot().unwrap().generation(), 1);
        assert_eq!(store.state(), StoreState::Ready);
        assert_eq!(store.lookup(&key(0)).await.unwrap(), Some(Candle::from_price(100)));
        assert_eq!(source.reads(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_refresher() {
        let source = TestSource::with_records(hour_records(100, 1));
        let store = store_over(&source, test_config());
        let refresher = store.spawn_refresher(Duration::from_secs(60));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(store.snapshot().unwrap().get(&key(0)), Some(Candle::from_price(100)));

        source.records.replace(hour_records(300, 1));
        tokio::time::sleep(Duration::from_secs(61)).await;
        let snapshot = store.snapshot().unwrap();
        assert!(snapshot.generation() >= 2);
        assert_eq!(snapshot.get(&key(0)), Some(Candle::from_price(300)));

        refresher.abort();
    }
}
