use async_trait::async_trait;

use super::entities::RateDataset;
use super::errors::RateError;

/// Source of the categorized exchange-rate dataset.
#[async_trait]
pub trait RateProvider: Send + Sync {
  async fn fetch_rates(&self) -> Result<RateDataset, RateError>;
}
