// SPDX-FileCopyrightText: 2026 Ssncheck Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Time-invalidated cache for High Group List snapshots
//!
//! Serves the current snapshot to any number of concurrent readers and
//! refreshes it at most once per interval. A refresh builds the complete
//! replacement off to the side and publishes it with a single guarded
//! assignment, so readers never observe a partially built mapping. Refresh
//! failures keep the previous snapshot: stale data is tolerated, and absent
//! data only downgrades the high-group check to non-conclusive.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::config::HglConfig;
use super::fetcher::{FetchError, HglFetcher};
use super::list::HighGroupList;

struct CacheState {
    snapshot: Arc<HighGroupList>,
    refreshed_at: Option<Instant>,
}

/// Caches the parsed High Group List with time-based invalidation.
///
/// Constructed once and shared (typically behind an `Arc`) by every
/// validator that needs reference data.
pub struct HglCache {
    config: HglConfig,
    fetcher: Option<HglFetcher>,
    state: RwLock<CacheState>,
    // Single-flight gate: at most one refresh in flight at a time.
    refresh_gate: Mutex<()>,
}

impl HglCache {
    /// Creates a cache with an empty snapshot.
    ///
    /// The first [`snapshot`](Self::snapshot) call triggers the initial
    /// fetch.
    pub fn new(config: HglConfig) -> Result<Self, FetchError> {
        let fetcher = if config.refresh_enabled {
            Some(HglFetcher::new(&config)?)
        } else {
            None
        };

        Ok(Self {
            config,
            fetcher,
            state: RwLock::new(CacheState {
                snapshot: Arc::new(HighGroupList::new()),
                refreshed_at: None,
            }),
            refresh_gate: Mutex::new(()),
        })
    }

    /// Creates a cache pre-populated with a fixed snapshot and refresh
    /// disabled.
    ///
    /// This is the injection seam for validating against known reference
    /// data in tests or offline.
    pub fn with_snapshot(list: HighGroupList) -> Self {
        Self {
            config: HglConfig::default().without_refresh(),
            fetcher: None,
            state: RwLock::new(CacheState {
                snapshot: Arc::new(list),
                refreshed_at: Some(Instant::now()),
            }),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Returns the current snapshot, refreshing it first when stale.
    ///
    /// Callers that find a fresh snapshot never wait on network I/O. When a
    /// refresh is due, concurrent callers are deduplicated through the
    /// single-flight gate and the losers reuse the winner's result. A failed
    /// refresh is logged and the previous (possibly empty) snapshot is
    /// returned; it is never an error to the caller.
    pub async fn snapshot(&self) -> Arc<HighGroupList> {
        if !self.needs_refresh().await {
            return self.current().await;
        }

        let _gate = self.refresh_gate.lock().await;
        // A concurrent caller may have refreshed while we waited on the gate.
        if self.needs_refresh().await {
            if let Err(err) = self.refresh().await {
                warn!("Failed to refresh High Group List: {}", err);
            }
        }
        self.current().await
    }

    /// Returns the current snapshot without considering staleness.
    pub async fn current(&self) -> Arc<HighGroupList> {
        self.state.read().await.snapshot.clone()
    }

    /// Fetches and applies a fresh snapshot unconditionally.
    ///
    /// Useful for warming the cache at startup instead of on the first
    /// validation request.
    pub async fn refresh_now(&self) -> Result<(), RefreshError> {
        let _gate = self.refresh_gate.lock().await;
        self.refresh().await
    }

    /// True when no successful refresh has happened within the interval.
    async fn needs_refresh(&self) -> bool {
        if self.fetcher.is_none() {
            return false;
        }
        match self.state.read().await.refreshed_at {
            None => true,
            Some(at) => at.elapsed() >= self.config.refresh_interval,
        }
    }

    async fn refresh(&self) -> Result<(), RefreshError> {
        let Some(fetcher) = &self.fetcher else {
            return Ok(());
        };
        let document = fetcher.fetch_document().await?;
        self.apply_document(&document).await
    }

    /// Parses a fetched document and publishes it as the current snapshot.
    ///
    /// The replacement is built completely before the swap; on any failure
    /// the previous snapshot and timestamp stay untouched.
    async fn apply_document(&self, document: &str) -> Result<(), RefreshError> {
        let list = HighGroupList::parse(document);
        if list.is_empty() {
            return Err(RefreshError::EmptyDocument);
        }

        let areas = list.len();
        let mut state = self.state.write().await;
        state.snapshot = Arc::new(list);
        state.refreshed_at = Some(Instant::now());
        drop(state);

        info!("High Group List refreshed: {} areas", areas);
        Ok(())
    }
}

/// Errors that can occur during a snapshot refresh
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Fetching the remote document failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The document parsed to zero area records
    #[error("Document contained no area records")]
    EmptyDocument,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_list() -> HighGroupList {
        let mut list = HighGroupList::new();
        list.record("123", 45);
        list
    }

    #[tokio::test]
    async fn test_with_snapshot_never_refreshes() {
        let cache = HglCache::with_snapshot(sample_list());
        assert!(!cache.needs_refresh().await);
        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.high_group("123"), Some(45));
    }

    #[tokio::test]
    async fn test_fresh_cache_needs_initial_refresh() {
        let cache = HglCache::new(HglConfig::default()).unwrap();
        assert!(cache.needs_refresh().await);
    }

    #[tokio::test]
    async fn test_fresh_snapshot_within_interval_is_served_as_is() {
        let cache = HglCache::new(HglConfig::default()).unwrap();
        cache
            .apply_document("header\nheader\n123 45\n")
            .await
            .unwrap();
        assert!(!cache.needs_refresh().await);
    }

    #[tokio::test]
    async fn test_elapsed_interval_allows_another_refresh() {
        let config = HglConfig::default().with_refresh_interval(Duration::ZERO);
        let cache = HglCache::new(config).unwrap();
        cache
            .apply_document("header\nheader\n123 45\n")
            .await
            .unwrap();
        // A zero interval makes the snapshot stale immediately.
        assert!(cache.needs_refresh().await);
    }

    #[tokio::test]
    async fn test_apply_document_swaps_snapshot() {
        let cache = HglCache::new(HglConfig::default()).unwrap();
        cache
            .apply_document("header\nheader\n123 45\n")
            .await
            .unwrap();
        assert_eq!(cache.current().await.high_group("123"), Some(45));

        cache
            .apply_document("header\nheader\n123 47\n")
            .await
            .unwrap();
        assert_eq!(cache.current().await.high_group("123"), Some(47));
    }

    #[tokio::test]
    async fn test_empty_document_keeps_previous_snapshot() {
        let cache = HglCache::new(HglConfig::default()).unwrap();
        cache
            .apply_document("header\nheader\n123 45\n")
            .await
            .unwrap();

        let result = cache.apply_document("").await;
        assert!(matches!(result, Err(RefreshError::EmptyDocument)));
        assert_eq!(cache.current().await.high_group("123"), Some(45));

        // Single-column rows parse to nothing and must not clobber either.
        let result = cache.apply_document("header\nheader\n123\n456\n").await;
        assert!(matches!(result, Err(RefreshError::EmptyDocument)));
        assert_eq!(cache.current().await.high_group("123"), Some(45));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_snapshot() {
        // Port 9 (discard) is not listening; the fetch fails fast.
        let config = HglConfig::default()
            .with_url("http://127.0.0.1:9/highgroup.txt")
            .with_timeout(Duration::from_secs(1));
        let cache = HglCache::new(config).unwrap();
        cache
            .apply_document("header\nheader\n123 45\n")
            .await
            .unwrap();

        assert!(cache.refresh_now().await.is_err());
        assert_eq!(cache.current().await.high_group("123"), Some(45));
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_raise_from_snapshot() {
        let config = HglConfig::default()
            .with_url("http://127.0.0.1:9/highgroup.txt")
            .with_timeout(Duration::from_secs(1));
        let cache = HglCache::new(config).unwrap();

        // No snapshot yet and the refresh fails; the caller still gets an
        // empty list, not an error.
        let snapshot = cache.snapshot().await;
        assert!(snapshot.is_empty());
    }
}
