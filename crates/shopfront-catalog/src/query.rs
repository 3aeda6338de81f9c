//! # Query Client
//!
//! Request cache in front of a [`ProductSource`].
//!
//! ## Cache Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    fetch(ProductId(1))                                  │
//! │                                                                         │
//! │  entries[1] ?                                                          │
//! │     │                                                                   │
//! │     ├── none ──────────────────────► start lookup, store it             │
//! │     │                                                                   │
//! │     ├── in flight ─────────────────► await the SAME lookup (dedup)      │
//! │     │                                                                   │
//! │     ├── done, Ok, younger than ────► return cached product              │
//! │     │   stale_after                                                     │
//! │     │                                                                   │
//! │     └── done, Err or stale ────────► start a new lookup, replace entry  │
//! │                                                                         │
//! │  Every waiter of one lookup gets the same result, failures included.   │
//! │  A failure is never served to a LATER call: that call retries.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Views and Unmounting
//! A view gets a [`ProductQuery`] from [`QueryClient::watch`]. The lookup
//! runs on a Tokio task and publishes into a watch channel. Dropping the
//! query is the unmount: the task still finishes (and fills the cache) but
//! its result goes nowhere.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, warn};

use shopfront_core::{Product, ProductId};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::fetch::FetchState;
use crate::source::{HttpProductSource, ProductSource};

#[derive(Clone)]
struct Lookup {
    result: CatalogResult<Product>,
    completed_at: Instant,
}

impl Lookup {
    fn is_fresh(&self, stale_after: Duration) -> bool {
        self.result.is_ok() && self.completed_at.elapsed() < stale_after
    }
}

type SharedLookup = Shared<BoxFuture<'static, Lookup>>;

/// Deduplicating, caching product lookups.
pub struct QueryClient {
    source: Arc<dyn ProductSource>,
    stale_after: Duration,
    entries: Mutex<HashMap<ProductId, SharedLookup>>,
}

impl QueryClient {
    pub fn new(source: Arc<dyn ProductSource>, stale_after: Duration) -> Self {
        QueryClient {
            source,
            stale_after,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// HTTP-backed client from loaded configuration.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let source = HttpProductSource::from_config(config)?;
        Ok(Self::new(Arc::new(source), config.stale_after()))
    }

    /// Looks a product up, sharing in-flight requests and fresh results.
    pub async fn fetch(&self, id: ProductId) -> CatalogResult<Product> {
        self.lookup(id).await.result
    }

    /// A fresh cached product, without starting a request.
    pub fn cached(&self, id: ProductId) -> Option<Product> {
        let entries = self.entries();
        let lookup = entries.get(&id)?.peek()?;
        if !lookup.is_fresh(self.stale_after) {
            return None;
        }
        lookup.result.as_ref().ok().cloned()
    }

    /// Drops the entry for `id`; the next lookup goes to the source.
    pub fn invalidate(&self, id: ProductId) {
        if self.entries().remove(&id).is_some() {
            debug!(%id, "Invalidated cached product");
        }
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Starts observing `id` for a view.
    ///
    /// The returned query starts in [`FetchState::Loading`]. Outside a Tokio
    /// runtime no task can be spawned and the query resolves straight to
    /// [`CatalogError::Abandoned`].
    pub fn watch(self: &Arc<Self>, id: ProductId) -> ProductQuery {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(%id, "No Tokio runtime; product query cannot run");
                return ProductQuery::resolved(id, FetchState::Failed(CatalogError::Abandoned(id)));
            }
        };

        let (tx, rx) = watch::channel(FetchState::Loading);
        let client = Arc::clone(self);
        handle.spawn(async move {
            let state = FetchState::from(client.fetch(id).await);
            if tx.send(state).is_err() {
                debug!(%id, "Product query dropped before response; ignoring result");
            }
        });

        ProductQuery { id, rx }
    }

    fn lookup(&self, id: ProductId) -> SharedLookup {
        let mut entries = self.entries();

        if let Some(existing) = entries.get(&id) {
            match existing.peek() {
                None => {
                    debug!(%id, "Joining in-flight lookup");
                    return existing.clone();
                }
                Some(done) if done.is_fresh(self.stale_after) => {
                    debug!(%id, "Serving cached product");
                    return existing.clone();
                }
                Some(_) => debug!(%id, "Cached lookup failed or stale; refetching"),
            }
        }

        let source = Arc::clone(&self.source);
        let lookup = async move {
            let result = source.fetch_product(id).await;
            Lookup {
                result,
                completed_at: Instant::now(),
            }
        }
        .boxed()
        .shared();

        entries.insert(id, lookup.clone());
        lookup
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ProductId, SharedLookup>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("stale_after", &self.stale_after)
            .field("entries", &self.entries().len())
            .finish()
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// One view's handle on a product lookup.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    id: ProductId,
    rx: watch::Receiver<FetchState<Product>>,
}

impl ProductQuery {
    /// A query that is already settled (or pinned to loading).
    pub fn resolved(id: ProductId, state: FetchState<Product>) -> Self {
        let (_tx, rx) = watch::channel(state);
        ProductQuery { id, rx }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Current state, without waiting.
    pub fn state(&self) -> FetchState<Product> {
        self.rx.borrow().clone()
    }

    /// Waits until the lookup has failed or succeeded.
    pub async fn settled(&mut self) -> FetchState<Product> {
        let id = self.id;
        match self.rx.wait_for(|state| state.is_settled()).await {
            Ok(state) => state.clone(),
            Err(_) => FetchState::Failed(CatalogError::Abandoned(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shopfront_core::Money;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source: known ids succeed, the first `failures` calls fail.
    struct FakeSource {
        calls: AtomicUsize,
        failures: usize,
        delay: Duration,
    }

    impl FakeSource {
        fn new(delay_ms: u64) -> Arc<Self> {
            Self::failing(0, delay_ms)
        }

        fn failing(failures: usize, delay_ms: u64) -> Arc<Self> {
            Arc::new(FakeSource {
                calls: AtomicUsize::new(0),
                failures,
                delay: Duration::from_millis(delay_ms),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductSource for FakeSource {
        async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if call < self.failures {
                return Err(CatalogError::Transport("connection reset".to_string()));
            }
            if id.0 > 100 {
                return Err(CatalogError::NotFound(id));
            }
            Ok(Product::builder(id.0, format!("Product {}", id))
                .price(Money::from_cents(9999))
                .build())
        }
    }

    fn client(source: Arc<FakeSource>, stale_after: Duration) -> Arc<QueryClient> {
        Arc::new(QueryClient::new(source, stale_after))
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_request() {
        let source = FakeSource::new(30);
        let client = client(source.clone(), Duration::from_secs(60));

        let (a, b, c, d) = tokio::join!(
            client.fetch(ProductId(1)),
            client.fetch(ProductId(1)),
            client.fetch(ProductId(1)),
            client.fetch(ProductId(1)),
        );

        assert_eq!(source.calls(), 1);
        for result in [a, b, c, d] {
            assert_eq!(result.unwrap().id, ProductId(1));
        }
    }

    #[tokio::test]
    async fn test_different_ids_are_separate_requests() {
        let source = FakeSource::new(5);
        let client = client(source.clone(), Duration::from_secs(60));

        let (a, b) = tokio::join!(client.fetch(ProductId(1)), client.fetch(ProductId(2)));

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_fresh_result_served_from_cache() {
        let source = FakeSource::new(0);
        let client = client(source.clone(), Duration::from_secs(60));

        client.fetch(ProductId(1)).await.unwrap();
        client.fetch(ProductId(1)).await.unwrap();

        assert_eq!(source.calls(), 1);
        assert!(client.cached(ProductId(1)).is_some());
    }

    #[tokio::test]
    async fn test_stale_result_refetched() {
        let source = FakeSource::new(0);
        let client = client(source.clone(), Duration::ZERO);

        client.fetch(ProductId(1)).await.unwrap();
        client.fetch(ProductId(1)).await.unwrap();

        assert_eq!(source.calls(), 2);
        assert!(client.cached(ProductId(1)).is_none());
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let source = FakeSource::failing(1, 0);
        let client = client(source.clone(), Duration::from_secs(60));

        let first = client.fetch(ProductId(1)).await;
        assert!(matches!(first, Err(CatalogError::Transport(_))));

        let second = client.fetch(ProductId(1)).await;
        assert!(second.is_ok());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_waiters_share_failure() {
        let source = FakeSource::failing(usize::MAX, 20);
        let client = client(source.clone(), Duration::from_secs(60));

        let (a, b, c) = tokio::join!(
            client.fetch(ProductId(1)),
            client.fetch(ProductId(1)),
            client.fetch(ProductId(1)),
        );

        assert_eq!(source.calls(), 1);
        assert!(a.is_err() && b.is_err() && c.is_err());
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = FakeSource::new(0);
        let client = client(source.clone(), Duration::from_secs(60));

        client.fetch(ProductId(1)).await.unwrap();
        client.invalidate(ProductId(1));
        client.fetch(ProductId(1)).await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let source = FakeSource::new(0);
        let client = client(source.clone(), Duration::from_secs(60));

        client.fetch(ProductId(1)).await.unwrap();
        client.fetch(ProductId(2)).await.unwrap();
        client.clear();

        assert!(client.cached(ProductId(1)).is_none());
        assert!(client.cached(ProductId(2)).is_none());

        client.fetch(ProductId(1)).await.unwrap();
        client.fetch(ProductId(2)).await.unwrap();

        assert_eq!(source.calls(), 4);
    }

    #[tokio::test]
    async fn test_watch_starts_loading_then_settles() {
        let source = FakeSource::new(30);
        let client = client(source, Duration::from_secs(60));

        let mut query = client.watch(ProductId(1));
        assert!(query.state().is_loading());

        let state = query.settled().await;
        assert_eq!(state.data().unwrap().id, ProductId(1));
        assert_eq!(query.state(), state);
    }

    #[tokio::test]
    async fn test_watch_reports_not_found() {
        let source = FakeSource::new(0);
        let client = client(source, Duration::from_secs(60));

        let mut query = client.watch(ProductId(404));
        let state = query.settled().await;

        assert!(state.error().unwrap().is_not_found());
    }

    #[tokio::test]
    async fn test_dropped_query_ignores_late_response() {
        let source = FakeSource::new(20);
        let client = client(source.clone(), Duration::from_secs(60));

        let query = client.watch(ProductId(1));
        drop(query);

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(source.calls(), 1);
        assert!(client.cached(ProductId(1)).is_some());
    }

    #[test]
    fn test_watch_outside_runtime_is_abandoned() {
        let client = client(FakeSource::new(0), Duration::from_secs(60));
        let query = client.watch(ProductId(1));
        assert!(matches!(
            query.state(),
            FetchState::Failed(CatalogError::Abandoned(_))
        ));
    }

    #[test]
    fn test_resolved_query() {
        let query = ProductQuery::resolved(ProductId(5), FetchState::Loading);
        assert_eq!(query.id(), ProductId(5));
        assert!(query.state().is_loading());
    }
}
