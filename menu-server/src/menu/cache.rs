//! Short-lived memo of the aggregated snapshot
//!
//! Refreshes are single-flight: concurrent callers queue on one gate and
//! re-check the memo once they get through, so a burst of misses costs one
//! fetch. Every [`invalidate`](SnapshotCache::invalidate) bumps a generation
//! counter; a refresh that started under an older generation returns its
//! value to its caller but never stores it.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::utils::Clock;

struct Slot<T> {
    memo: Option<(Arc<T>, Instant)>,
    generation: u64,
}

pub struct SnapshotCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: Mutex<Slot<T>>,
    gate: tokio::sync::Mutex<()>,
}

impl<T> fmt::Debug for SnapshotCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("SnapshotCache")
            .field("ttl", &self.ttl)
            .field("cached", &slot.memo.is_some())
            .field("generation", &slot.generation)
            .finish()
    }
}

impl<T> SnapshotCache<T> {
    /// A zero TTL disables memoization
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slot: Mutex::new(Slot {
                memo: None,
                generation: 0,
            }),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// The memo if it is younger than the TTL
    pub fn peek(&self) -> Option<Arc<T>> {
        let slot = self.slot.lock();
        let (value, stored_at) = slot.memo.as_ref()?;
        if self.clock.now().saturating_duration_since(*stored_at) < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    /// Drop the memo and orphan any refresh in flight
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock();
        slot.memo = None;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Return the fresh memo, or run `fetch` and memoize its result
    ///
    /// Fetch errors are returned as-is and leave the memo untouched.
    pub async fn get_or_refresh<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.peek() {
            return Ok(hit);
        }

        let _gate = self.gate.lock().await;
        if let Some(hit) = self.peek() {
            return Ok(hit);
        }

        let generation = self.slot.lock().generation;
        let value = Arc::new(fetch().await?);

        let mut slot = self.slot.lock();
        if slot.generation == generation {
            slot.memo = Some((value.clone(), self.clock.now()));
        } else {
            tracing::debug!("Snapshot invalidated during refresh, not caching");
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::oneshot;

    use super::*;
    use crate::utils::ManualClock;

    fn cache(ttl_ms: u64) -> (ManualClock, SnapshotCache<usize>) {
        let clock = ManualClock::new();
        let cache = SnapshotCache::new(Duration::from_millis(ttl_ms), Arc::new(clock.clone()));
        (clock, cache)
    }

    async fn counting_fetch(counter: &AtomicUsize) -> Result<usize, ()> {
        Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[tokio::test]
    async fn serves_memo_within_ttl() {
        let (clock, cache) = cache(1000);
        let fetches = AtomicUsize::new(0);

        assert_eq!(*cache.get_or_refresh(|| counting_fetch(&fetches)).await.unwrap(), 1);
        clock.advance(Duration::from_millis(999));
        assert_eq!(*cache.get_or_refresh(|| counting_fetch(&fetches)).await.unwrap(), 1);

        clock.advance(Duration::from_millis(1));
        assert_eq!(*cache.get_or_refresh(|| counting_fetch(&fetches)).await.unwrap(), 2);
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let (_clock, cache) = cache(1000);
        let fetches = AtomicUsize::new(0);

        cache.get_or_refresh(|| counting_fetch(&fetches)).await.unwrap();
        cache.invalidate();
        assert!(cache.peek().is_none());
        assert_eq!(*cache.get_or_refresh(|| counting_fetch(&fetches)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_never_memoizes() {
        let (_clock, cache) = cache(0);
        let fetches = AtomicUsize::new(0);

        cache.get_or_refresh(|| counting_fetch(&fetches)).await.unwrap();
        cache.get_or_refresh(|| counting_fetch(&fetches)).await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let (_clock, cache) = cache(1000);
        let err: Result<Arc<usize>, &str> = cache.get_or_refresh(|| async { Err("down") }).await;
        assert_eq!(err.unwrap_err(), "down");
        assert!(cache.peek().is_none());
    }

    #[tokio::test]
    async fn concurrent_misses_share_one_fetch() {
        let (_clock, cache) = cache(1000);
        let fetches = AtomicUsize::new(0);
        let counter = &fetches;
        let slow_fetch = move || async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            counting_fetch(counter).await
        };

        let (a, b, c) = tokio::join!(
            cache.get_or_refresh(slow_fetch),
            cache.get_or_refresh(slow_fetch),
            cache.get_or_refresh(slow_fetch),
        );
        assert_eq!((*a.unwrap(), *b.unwrap(), *c.unwrap()), (1, 1, 1));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_racing_an_invalidate_is_discarded() {
        let (_clock, cache) = cache(1000);
        let cache = Arc::new(cache);
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let (started_tx, started_rx) = oneshot::channel::<()>();

        let stale = tokio::spawn({
            let cache = cache.clone();
            async move {
                cache
                    .get_or_refresh(|| async move {
                        let _ = started_tx.send(());
                        let _ = release_rx.await;
                        Ok::<_, ()>(1)
                    })
                    .await
            }
        });

        started_rx.await.unwrap();
        cache.invalidate();
        release_tx.send(()).unwrap();

        assert_eq!(*stale.await.unwrap().unwrap(), 1);
        assert!(cache.peek().is_none());

        let fresh = cache.get_or_refresh(|| async { Ok::<_, ()>(2) }).await.unwrap();
        assert_eq!(*fresh, 2);
    }
}
