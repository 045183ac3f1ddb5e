use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::errors::RateError;
use super::value_objects::{CurrencyCode, Direction, RateSource};

// Black-market quote with separate buy and sell sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackMarketRate {
  pub code: CurrencyCode,
  pub buy: Decimal,
  pub sell: Decimal,
}

// Central-bank quote with a single official rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CbnRate {
  pub code: CurrencyCode,
  pub rate: Decimal,
}

/// Provider name -> currency -> flat rate.
pub type FintechRates = BTreeMap<String, BTreeMap<CurrencyCode, Decimal>>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateDatasetRecord {
  #[serde(default)]
  black_market_rates: Vec<BlackMarketRate>,
  #[serde(default)]
  fintech_rates: FintechRates,
  #[serde(default)]
  cbn_rates: Vec<CbnRate>,
}

impl TryFrom<RateDatasetRecord> for RateDataset {
  type Error = RateError;

  fn try_from(record: RateDatasetRecord) -> Result<Self, Self::Error> {
    RateDataset::new(
      record.black_market_rates,
      record.fintech_rates,
      record.cbn_rates,
    )
  }
}

/// Snapshot of the categorized exchange rates served by the backend.
///
/// Currency codes are unique within each source. The fintech table is a map
/// keyed by code, so uniqueness holds per provider by construction; the two
/// ordered collections are checked in [`RateDataset::new`], which every
/// deserialization goes through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RateDatasetRecord", rename_all = "camelCase")]
pub struct RateDataset {
  #[serde(rename = "blackMarketRates")]
  black_market: Vec<BlackMarketRate>,
  #[serde(rename = "fintechRates")]
  fintech: FintechRates,
  #[serde(rename = "cbnRates")]
  cbn: Vec<CbnRate>,
}

impl RateDataset {
  pub fn new(
    black_market: Vec<BlackMarketRate>,
    fintech: FintechRates,
    cbn: Vec<CbnRate>,
  ) -> Result<Self, RateError> {
    ensure_unique(RateSource::BlackMarket, black_market.iter().map(|r| &r.code))?;
    ensure_unique(RateSource::Cbn, cbn.iter().map(|r| &r.code))?;

    Ok(Self {
      black_market,
      fintech,
      cbn,
    })
  }

  pub fn black_market(&self) -> &[BlackMarketRate] {
    &self.black_market
  }

  pub fn fintech(&self) -> &FintechRates {
    &self.fintech
  }

  pub fn cbn(&self) -> &[CbnRate] {
    &self.cbn
  }

  pub fn is_empty(&self) -> bool {
    self.black_market.is_empty() && self.fintech.is_empty() && self.cbn.is_empty()
  }

  /// Currencies quoted by a source, deduplicated in first-seen order.
  ///
  /// For fintech the union over all providers is returned, walking providers
  /// in name order.
  pub fn currencies(&self, source: RateSource) -> Vec<CurrencyCode> {
    let mut seen = HashSet::new();
    let codes: Box<dyn Iterator<Item = &CurrencyCode> + '_> = match source {
      RateSource::BlackMarket => Box::new(self.black_market.iter().map(|r| &r.code)),
      RateSource::Fintech => Box::new(self.fintech.values().flat_map(|table| table.keys())),
      RateSource::Cbn => Box::new(self.cbn.iter().map(|r| &r.code)),
    };

    codes
      .filter(|code| seen.insert(*code))
      .cloned()
      .collect()
  }

  /// Fintech provider names, in name order.
  pub fn providers(&self) -> Vec<String> {
    self.fintech.keys().cloned().collect()
  }
}

fn ensure_unique<'a>(
  source: RateSource,
  codes: impl Iterator<Item = &'a CurrencyCode>,
) -> Result<(), RateError> {
  let mut seen = HashSet::new();
  for code in codes {
    if !seen.insert(code) {
      return Err(RateError::DuplicateCurrency {
        scope: source.to_string(),
        code: code.to_string(),
      });
    }
  }
  Ok(())
}

/// Rate picked out of a dataset for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolvedRate {
  BuySell { buy: Decimal, sell: Decimal },
  Flat { rate: Decimal },
}

impl ResolvedRate {
  /// Flat rates ignore the direction.
  pub fn for_direction(&self, direction: Direction) -> Decimal {
    match (self, direction) {
      (ResolvedRate::BuySell { buy, .. }, Direction::Buy) => *buy,
      (ResolvedRate::BuySell { sell, .. }, Direction::Sell) => *sell,
      (ResolvedRate::Flat { rate }, _) => *rate,
    }
  }
}
