use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid percentage: {0}")]
  InvalidPercentage(String),
}

/// Rounds to cents, halves away from zero. The result always carries two
/// decimal places, so `100` comes back as `100.00`.
pub fn round2(value: Decimal) -> Decimal {
  let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  rounded.rescale(2);
  rounded
}

// Invoice Currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceCurrency {
  #[default]
  USD,
  NGN,
}

impl InvoiceCurrency {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceCurrency::USD => "USD",
      InvoiceCurrency::NGN => "NGN",
    }
  }

  pub fn symbol(&self) -> &'static str {
    match self {
      InvoiceCurrency::USD => "$",
      InvoiceCurrency::NGN => "₦",
    }
  }
}

impl FromStr for InvoiceCurrency {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "USD" => Ok(InvoiceCurrency::USD),
      "NGN" => Ok(InvoiceCurrency::NGN),
      _ => Err(ValueObjectError::InvalidCurrency(format!(
        "Unsupported invoice currency: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for InvoiceCurrency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Percentage - discount or tax rate entered on the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Percentage(Decimal);

impl Percentage {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
      return Err(ValueObjectError::InvalidPercentage(
        "Percentage must be between 0 and 100".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Submission Mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
  Draft,
  Send,
}

impl SubmissionMode {
  pub fn from_draft_flag(draft: bool) -> Self {
    if draft {
      SubmissionMode::Draft
    } else {
      SubmissionMode::Send
    }
  }

  pub fn is_draft(&self) -> bool {
    matches!(self, SubmissionMode::Draft)
  }
}
