use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::RateError;

// Currency Code - stored and compared exactly as received
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
  /// Wraps a code without trimming or case folding.
  ///
  /// Rate lookups compare codes byte for byte, so `"usd"` never matches a
  /// dataset entry stored as `"USD"`.
  pub fn new(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl From<&str> for CurrencyCode {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl fmt::Display for CurrencyCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Rate Source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateSource {
  #[serde(alias = "blackMarketRates")]
  BlackMarket,
  #[serde(alias = "fintechRates")]
  Fintech,
  #[serde(alias = "cbnRates")]
  Cbn,
}

impl RateSource {
  pub fn as_str(&self) -> &'static str {
    match self {
      RateSource::BlackMarket => "blackMarket",
      RateSource::Fintech => "fintech",
      RateSource::Cbn => "cbn",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      RateSource::BlackMarket => "Black Market",
      RateSource::Fintech => "Fintech",
      RateSource::Cbn => "CBN Rates",
    }
  }
}

impl FromStr for RateSource {
  type Err = RateError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "blackMarket" | "blackMarketRates" => Ok(RateSource::BlackMarket),
      "fintech" | "fintechRates" => Ok(RateSource::Fintech),
      "cbn" | "cbnRates" => Ok(RateSource::Cbn),
      _ => Err(RateError::UnknownSource(s.to_string())),
    }
  }
}

impl fmt::Display for RateSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Direction - side of a black-market quote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  #[default]
  Buy,
  Sell,
}

impl Direction {
  pub fn as_str(&self) -> &'static str {
    match self {
      Direction::Buy => "buy",
      Direction::Sell => "sell",
    }
  }
}

impl FromStr for Direction {
  type Err = RateError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "buy" => Ok(Direction::Buy),
      "sell" => Ok(Direction::Sell),
      _ => Err(RateError::UnknownDirection(s.to_string())),
    }
  }
}

// Rate Query - which table of a dataset to look in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateQuery {
  BlackMarket,
  Fintech { provider: Option<String> },
  Cbn,
}

impl RateQuery {
  /// Builds a query for `source`. The provider is kept only for fintech and
  /// an empty provider counts as no selection.
  pub fn new(source: RateSource, provider: Option<String>) -> Self {
    match source {
      RateSource::BlackMarket => RateQuery::BlackMarket,
      RateSource::Fintech => RateQuery::Fintech {
        provider: provider.filter(|p| !p.is_empty()),
      },
      RateSource::Cbn => RateQuery::Cbn,
    }
  }

  pub fn source(&self) -> RateSource {
    match self {
      RateQuery::BlackMarket => RateSource::BlackMarket,
      RateQuery::Fintech { .. } => RateSource::Fintech,
      RateQuery::Cbn => RateSource::Cbn,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rate_query_keeps_provider_for_fintech_only() {
    assert_eq!(
      RateQuery::new(RateSource::Cbn, Some("Wise".to_string())),
      RateQuery::Cbn
    );
    assert_eq!(
      RateQuery::new(RateSource::Fintech, Some(String::new())),
      RateQuery::Fintech { provider: None }
    );
    assert_eq!(
      RateQuery::new(RateSource::Fintech, Some("Wise".to_string())).source(),
      RateSource::Fintech
    );
  }

  #[test]
  fn test_currency_code_is_not_normalized() {
    let code = CurrencyCode::new(" usd");
    assert_eq!(code.value(), " usd");
    assert_ne!(CurrencyCode::from("usd"), CurrencyCode::from("USD"));
  }

  #[test]
  fn test_rate_source_parsing() {
    assert_eq!(
      RateSource::from_str("blackMarket").unwrap(),
      RateSource::BlackMarket
    );
    assert_eq!(
      RateSource::from_str("fintechRates").unwrap(),
      RateSource::Fintech
    );
    assert_eq!(RateSource::from_str("cbnRates").unwrap(), RateSource::Cbn);
    assert!(RateSource::from_str("CBN").is_err());
  }

  #[test]
  fn test_rate_source_serde_accepts_dataset_keys() {
    let source: RateSource = serde_json::from_str("\"blackMarketRates\"").unwrap();
    assert_eq!(source, RateSource::BlackMarket);
    assert_eq!(serde_json::to_string(&RateSource::Cbn).unwrap(), "\"cbn\"");
  }

  #[test]
  fn test_direction() {
    assert_eq!(Direction::from_str("SELL").unwrap(), Direction::Sell);
    assert_eq!(Direction::default(), Direction::Buy);
    assert!(Direction::from_str("hold").is_err());
  }
}
