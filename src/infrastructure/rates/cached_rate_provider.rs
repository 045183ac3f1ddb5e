use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::rates::{RateDataset, RateError, RateProvider};

struct CachedRates {
  dataset: RateDataset,
  fetched_at: DateTime<Utc>,
}

/// Keeps the last fetched dataset for `ttl` and serves it to every caller.
///
/// Failed fetches are not cached; the next request retries upstream.
pub struct CachedRateProvider {
  inner: Arc<dyn RateProvider>,
  ttl: Duration,
  cache: RwLock<Option<CachedRates>>,
}

impl CachedRateProvider {
  pub fn new(inner: Arc<dyn RateProvider>, ttl: Duration) -> Self {
    Self {
      inner,
      ttl,
      cache: RwLock::new(None),
    }
  }

  fn is_fresh(&self, entry: &CachedRates, now: DateTime<Utc>) -> bool {
    now - entry.fetched_at < self.ttl
  }

  pub async fn invalidate(&self) {
    *self.cache.write().await = None;
  }
}

#[async_trait]
impl RateProvider for CachedRateProvider {
  async fn fetch_rates(&self) -> Result<RateDataset, RateError> {
    {
      let cache = self.cache.read().await;
      if let Some(entry) = cache.as_ref().filter(|e| self.is_fresh(e, Utc::now())) {
        tracing::debug!(fetched_at = %entry.fetched_at, "Exchange rate cache hit");
        return Ok(entry.dataset.clone());
      }
    }

    let mut cache = self.cache.write().await;
    // Another request may have refreshed while we waited for the lock.
    if let Some(entry) = cache.as_ref().filter(|e| self.is_fresh(e, Utc::now())) {
      return Ok(entry.dataset.clone());
    }

    tracing::debug!("Exchange rate cache miss, fetching upstream");
    let dataset = self.inner.fetch_rates().await?;

    *cache = Some(CachedRates {
      dataset: dataset.clone(),
      fetched_at: Utc::now(),
    });

    Ok(dataset)
  }
}
