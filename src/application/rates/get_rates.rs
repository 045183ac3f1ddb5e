use serde::Serialize;
use std::sync::Arc;

use crate::domain::rates::{RateDataset, RateError, RateProvider};

#[derive(Debug, Serialize)]
pub struct GetRatesResponse {
  #[serde(flatten)]
  pub dataset: RateDataset,
}

pub struct GetRatesUseCase {
  rate_provider: Arc<dyn RateProvider>,
}

impl GetRatesUseCase {
  pub fn new(rate_provider: Arc<dyn RateProvider>) -> Self {
    Self { rate_provider }
  }

  pub async fn execute(&self) -> Result<GetRatesResponse, RateError> {
    let dataset = self.rate_provider.fetch_rates().await?;
    Ok(GetRatesResponse { dataset })
  }
}
