use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

use super::entities::{RateDataset, ResolvedRate};
use super::value_objects::{CurrencyCode, Direction, RateQuery};

/// Looks up the rate for `currency` in the table selected by `query`.
///
/// Returns `None` when nothing matches, including a fintech query without a
/// provider. Codes are compared exactly.
pub fn resolve(
  dataset: &RateDataset,
  query: &RateQuery,
  currency: &CurrencyCode,
) -> Option<ResolvedRate> {
  match query {
    RateQuery::BlackMarket => dataset
      .black_market()
      .iter()
      .find(|r| &r.code == currency)
      .map(|r| ResolvedRate::BuySell {
        buy: r.buy,
        sell: r.sell,
      }),
    RateQuery::Fintech { provider } => {
      let provider = provider.as_deref()?;
      dataset
        .fintech()
        .get(provider)
        .and_then(|table| table.get(currency))
        .map(|rate| ResolvedRate::Flat { rate: *rate })
    }
    RateQuery::Cbn => dataset
      .cbn()
      .iter()
      .find(|r| &r.code == currency)
      .map(|r| ResolvedRate::Flat { rate: r.rate }),
  }
}

/// `amount × rate`, unrounded.
///
/// A non-positive amount, a missing rate or a product too large for a
/// `Decimal` yields zero.
pub fn convert(amount: Decimal, rate: Option<&ResolvedRate>, direction: Direction) -> Decimal {
  if amount <= Decimal::ZERO {
    return Decimal::ZERO;
  }

  let Some(rate) = rate else {
    return Decimal::ZERO;
  };

  let rate = rate.for_direction(direction);
  amount.checked_mul(rate).unwrap_or_else(|| {
    tracing::warn!(%amount, %rate, "Converted amount overflowed; reporting zero");
    Decimal::ZERO
  })
}

/// Parses a free-text amount field. Blank or non-numeric input gives `None`.
pub fn parse_amount(input: &str) -> Option<Decimal> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return None;
  }

  Decimal::from_str(trimmed)
    .or_else(|_| Decimal::from_scientific(trimmed))
    .ok()
}

/// `None` for NaN and infinities.
pub fn amount_from_f64(value: f64) -> Option<Decimal> {
  if !value.is_finite() {
    return None;
  }
  Decimal::from_f64(value)
}

/// Inputs of the converter form.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
  /// `None` when the entered amount did not parse.
  pub amount: Option<Decimal>,
  pub query: RateQuery,
  pub currency: CurrencyCode,
  pub direction: Direction,
}

/// Result of one converter evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
  pub rate: Option<ResolvedRate>,
  pub total: Decimal,
}

/// Resolves and converts in one step.
///
/// An absent dataset (not fetched yet, or the fetch failed) behaves like a
/// missing rate: the total is zero.
pub fn evaluate(dataset: Option<&RateDataset>, request: &ConversionRequest) -> Conversion {
  let rate = dataset.and_then(|d| resolve(d, &request.query, &request.currency));
  let total = match request.amount {
    Some(amount) => convert(amount, rate.as_ref(), request.direction),
    None => Decimal::ZERO,
  };

  Conversion { rate, total }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::rates::entities::{BlackMarketRate, CbnRate, FintechRates};
  use rust_decimal_macros::dec;
  use std::collections::BTreeMap;

  fn dataset() -> RateDataset {
    let mut fintech = FintechRates::new();
    fintech.insert(
      "Wise".to_string(),
      BTreeMap::from([(CurrencyCode::from("USD"), dec!(1520.5))]),
    );

    RateDataset::new(
      vec![BlackMarketRate {
        code: "USD".into(),
        buy: dec!(1500),
        sell: dec!(1550),
      }],
      fintech,
      vec![CbnRate {
        code: "EUR".into(),
        rate: dec!(1610.25),
      }],
    )
    .unwrap()
  }

  #[test]
  fn test_resolve_black_market() {
    let rate = resolve(&dataset(), &RateQuery::BlackMarket, &"USD".into());
    assert_eq!(
      rate,
      Some(ResolvedRate::BuySell {
        buy: dec!(1500),
        sell: dec!(1550),
      })
    );
  }

  #[test]
  fn test_resolve_cbn_missing_currency_is_none() {
    assert_eq!(resolve(&dataset(), &RateQuery::Cbn, &"XYZ".into()), None);
    assert_eq!(convert(dec!(100), None, Direction::Buy), Decimal::ZERO);
  }

  #[test]
  fn test_resolve_does_not_normalize_case() {
    assert_eq!(resolve(&dataset(), &RateQuery::BlackMarket, &"usd".into()), None);
  }

  #[test]
  fn test_resolve_fintech_requires_provider() {
    let data = dataset();
    assert_eq!(
      resolve(&data, &RateQuery::Fintech { provider: None }, &"USD".into()),
      None
    );
    assert_eq!(
      resolve(
        &data,
        &RateQuery::Fintech {
          provider: Some("Unknown".to_string())
        },
        &"USD".into()
      ),
      None
    );
    assert_eq!(
      resolve(
        &data,
        &RateQuery::Fintech {
          provider: Some("Wise".to_string())
        },
        &"USD".into()
      ),
      Some(ResolvedRate::Flat { rate: dec!(1520.5) })
    );
  }

  #[test]
  fn test_convert_black_market_buy_sell_split() {
    let rate = ResolvedRate::BuySell {
      buy: dec!(1500),
      sell: dec!(1550),
    };
    assert_eq!(convert(dec!(10), Some(&rate), Direction::Buy), dec!(15000));
    assert_eq!(convert(dec!(10), Some(&rate), Direction::Sell), dec!(15500));
  }

  #[test]
  fn test_convert_flat_rate_ignores_direction_and_is_unrounded() {
    let rate = ResolvedRate::Flat { rate: dec!(1610.25) };
    assert_eq!(convert(dec!(1.333), Some(&rate), Direction::Sell), dec!(2146.46325));
  }

  #[test]
  fn test_convert_guards_non_positive_amounts() {
    let rate = ResolvedRate::Flat { rate: dec!(1600) };
    assert_eq!(convert(dec!(-5), Some(&rate), Direction::Buy), Decimal::ZERO);
    assert_eq!(convert(Decimal::ZERO, Some(&rate), Direction::Buy), Decimal::ZERO);
  }

  #[test]
  fn test_convert_overflow_is_zero() {
    let rate = ResolvedRate::Flat { rate: dec!(1600) };
    assert_eq!(convert(Decimal::MAX, Some(&rate), Direction::Buy), Decimal::ZERO);

    let request = ConversionRequest {
      amount: parse_amount("79228162514264337593543950335"),
      query: RateQuery::BlackMarket,
      currency: "USD".into(),
      direction: Direction::Buy,
    };
    let conversion = evaluate(Some(&dataset()), &request);
    assert_eq!(conversion.total, Decimal::ZERO);
    assert!(conversion.rate.is_some());
  }

  #[test]
  fn test_non_numeric_amounts_convert_to_zero() {
    assert_eq!(amount_from_f64(f64::NAN), None);
    assert_eq!(amount_from_f64(f64::INFINITY), None);
    assert_eq!(parse_amount("NaN"), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("   "), None);
    assert_eq!(parse_amount(" 12.50 "), Some(dec!(12.50)));
    assert_eq!(parse_amount("1e2"), Some(dec!(100)));

    let request = ConversionRequest {
      amount: amount_from_f64(f64::NAN),
      query: RateQuery::BlackMarket,
      currency: "USD".into(),
      direction: Direction::Buy,
    };
    assert_eq!(evaluate(Some(&dataset()), &request).total, Decimal::ZERO);
  }

  #[test]
  fn test_evaluate_without_dataset_is_zero() {
    let request = ConversionRequest {
      amount: Some(dec!(10)),
      query: RateQuery::Cbn,
      currency: "EUR".into(),
      direction: Direction::Buy,
    };

    let absent = evaluate(None, &request);
    assert_eq!(absent.total, Decimal::ZERO);
    assert_eq!(absent.rate, None);

    let present = evaluate(Some(&dataset()), &request);
    assert_eq!(present.total, dec!(16102.50));
  }
}
