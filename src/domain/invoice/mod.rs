pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{
  InvoiceCustomer, InvoiceDetails, InvoiceDocument, InvoiceLineItem, InvoiceTotals,
  PaymentInstructions,
};
pub use errors::InvoiceError;
pub use ports::InvoiceGateway;
pub use services::{InvoiceService, line_amount};
pub use value_objects::{InvoiceCurrency, Percentage, SubmissionMode, ValueObjectError, round2};
