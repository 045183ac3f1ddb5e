use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::rates::{RateDataset, RateError, RateProvider};

#[derive(Debug, Deserialize)]
struct RatesEnvelope {
  data: RateDataset,
}

/// Fetches the categorized exchange rates from the backend REST API.
pub struct HttpRateProvider {
  client: Client,
  endpoint: String,
}

impl HttpRateProvider {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RateError> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| RateError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self {
      client,
      endpoint: format!(
        "{}/categorized-exchange-rates",
        base_url.trim_end_matches('/')
      ),
    })
  }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
  async fn fetch_rates(&self) -> Result<RateDataset, RateError> {
    let response = self
      .client
      .get(&self.endpoint)
      .send()
      .await
      .map_err(|e| RateError::Unavailable(format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(RateError::Unavailable(format!(
        "Rates API returned status {}: {}",
        status, body
      )));
    }

    let body = response
      .bytes()
      .await
      .map_err(|e| RateError::Unavailable(format!("Failed to read response: {}", e)))?;

    let envelope: RatesEnvelope =
      serde_json::from_slice(&body).map_err(|e| RateError::MalformedPayload(e.to_string()))?;

    tracing::debug!(
      black_market = envelope.data.black_market().len(),
      providers = envelope.data.fintech().len(),
      cbn = envelope.data.cbn().len(),
      "Fetched exchange rates"
    );

    Ok(envelope.data)
  }
}
