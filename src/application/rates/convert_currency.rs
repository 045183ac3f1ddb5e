use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::rates::{
  ConversionRequest, CurrencyCode, Direction, RateError, RateProvider, RateQuery, RateSource,
  ResolvedRate, amount_from_f64, evaluate, parse_amount,
};

/// Amount as typed into the form: a JSON number or the raw field text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
  Number(f64),
  Text(String),
}

impl AmountInput {
  pub fn to_decimal(&self) -> Option<Decimal> {
    match self {
      AmountInput::Number(value) => amount_from_f64(*value),
      AmountInput::Text(text) => parse_amount(text),
    }
  }
}

impl Default for AmountInput {
  fn default() -> Self {
    AmountInput::Text(String::new())
  }
}

#[derive(Debug, Deserialize)]
pub struct ConvertCurrencyCommand {
  #[serde(default)]
  pub amount: AmountInput,
  pub source: String,
  pub currency: String,
  pub direction: Option<String>,
  pub provider: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConvertCurrencyResponse {
  pub amount: Option<Decimal>,
  pub source: RateSource,
  pub currency: CurrencyCode,
  pub direction: Direction,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub provider: Option<String>,
  pub rate: Option<ResolvedRate>,
  pub converted: Decimal,
  pub rate_available: bool,
}

/// Naira total for the converter form.
///
/// Malformed selections (unknown source or direction) are errors. Everything
/// else degrades to a zero total: unparseable amounts, unknown currencies and
/// a dataset that could not be fetched.
pub struct ConvertCurrencyUseCase {
  rate_provider: Arc<dyn RateProvider>,
}

impl ConvertCurrencyUseCase {
  pub fn new(rate_provider: Arc<dyn RateProvider>) -> Self {
    Self { rate_provider }
  }

  pub async fn execute(
    &self,
    command: ConvertCurrencyCommand,
  ) -> Result<ConvertCurrencyResponse, RateError> {
    let source = RateSource::from_str(&command.source)?;
    let direction = match command.direction.as_deref() {
      Some(direction) => Direction::from_str(direction)?,
      None => Direction::default(),
    };
    let query = RateQuery::new(source, command.provider);

    let request = ConversionRequest {
      amount: command.amount.to_decimal(),
      query,
      currency: CurrencyCode::new(command.currency),
      direction,
    };

    let dataset = match self.rate_provider.fetch_rates().await {
      Ok(dataset) => Some(dataset),
      Err(e) => {
        tracing::warn!("Converting without exchange rates: {}", e);
        None
      }
    };

    let conversion = evaluate(dataset.as_ref(), &request);

    tracing::debug!(
      source = %source,
      currency = %request.currency,
      direction = direction.as_str(),
      converted = %conversion.total,
      "Currency converted"
    );

    let provider = match request.query {
      RateQuery::Fintech { provider } => provider,
      _ => None,
    };

    Ok(ConvertCurrencyResponse {
      amount: request.amount,
      source,
      currency: request.currency,
      direction,
      provider,
      rate: conversion.rate,
      converted: conversion.total,
      rate_available: dataset.is_some(),
    })
  }
}
