use super::value_objects::ValueObjectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("No line items provided")]
  NoLineItems,

  #[error("No customers provided")]
  NoCustomers,

  #[error("Invoice submission failed: {0}")]
  Gateway(String),

  #[error("Internal error: {0}")]
  Internal(String),
}
