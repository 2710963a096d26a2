use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

use super::model::TrackingTable;

// ---------------------------------------------------------------------------
// TTL snapshot cache
// ---------------------------------------------------------------------------

/// The upstream export regenerates every few minutes; serving a snapshot up
/// to this old is acceptable.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Holds the current normalized snapshot and refreshes it once it goes
/// stale. The snapshot is an `Arc`, so readers keep whatever version they
/// grabbed while a refresh swaps in the replacement wholesale.
///
/// A failed refresh leaves the previous snapshot untouched: the old table
/// is still valid data, and the error is returned for the caller to
/// surface.
pub struct SnapshotCache {
    ttl: Duration,
    entry: Option<CachedSnapshot>,
}

struct CachedSnapshot {
    fetched_at: Instant,
    table: Arc<TrackingTable>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        SnapshotCache { ttl, entry: None }
    }

    /// Current snapshot, if any, regardless of staleness.
    pub fn snapshot(&self) -> Option<Arc<TrackingTable>> {
        self.entry.as_ref().map(|e| Arc::clone(&e.table))
    }

    /// Whether the next [`get_or_refresh`](Self::get_or_refresh) will fetch.
    pub fn is_stale(&self) -> bool {
        match &self.entry {
            Some(entry) => entry.fetched_at.elapsed() >= self.ttl,
            None => true,
        }
    }

    /// Return the cached snapshot, fetching a fresh one first if the cache
    /// is empty or stale.
    pub fn get_or_refresh(
        &mut self,
        fetch: impl FnOnce() -> Result<TrackingTable>,
    ) -> Result<Arc<TrackingTable>> {
        if !self.is_stale() {
            if let Some(entry) = &self.entry {
                return Ok(Arc::clone(&entry.table));
            }
        }
        let table = Arc::new(fetch()?);
        self.entry = Some(CachedSnapshot {
            fetched_at: Instant::now(),
            table: Arc::clone(&table),
        });
        Ok(table)
    }

    /// Install a snapshot directly (local file loads) and restart the TTL.
    pub fn install(&mut self, table: TrackingTable) -> Arc<TrackingTable> {
        let table = Arc::new(table);
        self.entry = Some(CachedSnapshot {
            fetched_at: Instant::now(),
            table: Arc::clone(&table),
        });
        table
    }

    /// Drop the cached snapshot. The cache is keyed by source identity, so
    /// the owner must invalidate when the configured source changes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use anyhow::anyhow;

    fn table_of(n: usize) -> TrackingTable {
        TrackingTable::from_records(vec![Record::default(); n])
    }

    #[test]
    fn fresh_snapshot_is_reused() {
        let mut cache = SnapshotCache::new(Duration::from_secs(3600));
        let first = cache.get_or_refresh(|| Ok(table_of(1))).unwrap();
        let second = cache
            .get_or_refresh(|| panic!("must not refetch while fresh"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn stale_snapshot_is_replaced_wholesale() {
        let mut cache = SnapshotCache::new(Duration::ZERO);
        let first = cache.get_or_refresh(|| Ok(table_of(1))).unwrap();
        let second = cache.get_or_refresh(|| Ok(table_of(2))).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        // The old Arc still reads fine after replacement.
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let mut cache = SnapshotCache::new(Duration::ZERO);
        cache.get_or_refresh(|| Ok(table_of(3))).unwrap();
        let err = cache.get_or_refresh(|| Err(anyhow!("boom")));
        assert!(err.is_err());
        assert_eq!(cache.snapshot().unwrap().len(), 3);
    }

    #[test]
    fn invalidate_forces_refetch() {
        let mut cache = SnapshotCache::new(Duration::from_secs(3600));
        cache.get_or_refresh(|| Ok(table_of(1))).unwrap();
        cache.invalidate();
        assert!(cache.is_stale());
        assert!(cache.snapshot().is_none());
    }
}
