//! Response cache
//!
//! Memoizes successful upstream responses keyed by endpoint URL.
//! Get-or-fetch: a miss runs the fetch and stores the result, a hit returns
//! the stored body. Failures are never stored, so the next call tries again.

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::error::FetchResult;

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Memoization map from endpoint URL to the last good response body
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// `None` keeps entries for the life of the process
    ttl: Option<Duration>,
}

impl ResponseCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Return the cached body for `url`, or run `fetch` and remember its result
    pub async fn get_or_fetch<F, Fut>(&self, url: &str, fetch: F) -> FetchResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult<Value>>,
    {
        if let Some(value) = self.get(url).await {
            tracing::debug!(url = %url, "cache hit");
            return Ok(value);
        }

        tracing::debug!(url = %url, "cache miss");
        let value = fetch().await?;

        // Two concurrent misses both fetch; last writer wins, results are equivalent.
        self.entries.write().await.insert(
            url.to_string(),
            CacheEntry {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );

        Ok(value)
    }

    /// Fresh cached body for `url`, if any
    pub async fn get(&self, url: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(url)?;

        match self.ttl {
            Some(ttl) if entry.stored_at.elapsed() >= ttl => None,
            _ => Some(entry.value.clone()),
        }
    }

    /// Drop every cached response
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        tracing::info!("Cleared {} cached responses", dropped);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(None)
    }
}
