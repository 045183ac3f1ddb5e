use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::rates::{RateDataset, RateError, RateProvider};

/// Reads the dataset from a local JSON file, for offline development.
///
/// The file holds the bare dataset (`blackMarketRates`, `fintechRates`,
/// `cbnRates`) without the API's `data` envelope. It is re-read on every
/// fetch so edits show up without a restart.
pub struct FileRateProvider {
  path: PathBuf,
}

impl FileRateProvider {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

#[async_trait]
impl RateProvider for FileRateProvider {
  async fn fetch_rates(&self) -> Result<RateDataset, RateError> {
    let contents = tokio::fs::read(&self.path).await.map_err(|e| {
      RateError::Unavailable(format!(
        "Failed to read rates fixture {}: {}",
        self.path.display(),
        e
      ))
    })?;

    serde_json::from_slice(&contents).map_err(|e| RateError::MalformedPayload(e.to_string()))
  }
}
