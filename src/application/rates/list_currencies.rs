use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::rates::{CurrencyCode, RateDataset, RateError, RateProvider, RateSource};

#[derive(Debug, Deserialize)]
pub struct ListCurrenciesCommand {
  pub source: String,
}

#[derive(Debug, Serialize)]
pub struct ListCurrenciesResponse {
  pub source: RateSource,
  pub label: &'static str,
  pub currencies: Vec<CurrencyCode>,
  pub rates_available: bool,
}

#[derive(Debug, Serialize)]
pub struct ListProvidersResponse {
  pub providers: Vec<String>,
  pub rates_available: bool,
}

/// Options for the converter's currency and provider pickers.
///
/// While the dataset cannot be fetched the lists are empty rather than an
/// error, matching a picker that has not loaded yet.
pub struct ListCurrenciesUseCase {
  rate_provider: Arc<dyn RateProvider>,
}

impl ListCurrenciesUseCase {
  pub fn new(rate_provider: Arc<dyn RateProvider>) -> Self {
    Self { rate_provider }
  }

  pub async fn execute(
    &self,
    command: ListCurrenciesCommand,
  ) -> Result<ListCurrenciesResponse, RateError> {
    let source = RateSource::from_str(&command.source)?;
    let dataset = self.load().await;

    Ok(ListCurrenciesResponse {
      source,
      label: source.label(),
      currencies: dataset
        .as_ref()
        .map(|d| d.currencies(source))
        .unwrap_or_default(),
      rates_available: dataset.is_some(),
    })
  }

  pub async fn providers(&self) -> ListProvidersResponse {
    let dataset = self.load().await;

    ListProvidersResponse {
      providers: dataset
        .as_ref()
        .map(RateDataset::providers)
        .unwrap_or_default(),
      rates_available: dataset.is_some(),
    }
  }

  async fn load(&self) -> Option<RateDataset> {
    match self.rate_provider.fetch_rates().await {
      Ok(dataset) => Some(dataset),
      Err(e) => {
        tracing::warn!("Exchange rates unavailable for picker options: {}", e);
        None
      }
    }
  }
}
