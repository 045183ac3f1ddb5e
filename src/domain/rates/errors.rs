use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
  #[error("Unknown rate source: {0}")]
  UnknownSource(String),

  #[error("Unknown direction: {0}")]
  UnknownDirection(String),

  #[error("Duplicate currency '{code}' in {scope}")]
  DuplicateCurrency { scope: String, code: String },

  #[error("Exchange rates unavailable: {0}")]
  Unavailable(String),

  #[error("Malformed exchange rate payload: {0}")]
  MalformedPayload(String),
}
