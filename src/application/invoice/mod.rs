pub mod calculate_totals;
pub mod dtos;
pub mod preview_invoice;
pub mod submit_invoice;

pub use calculate_totals::{
  CalculateTotalsCommand, CalculateTotalsResponse, CalculateTotalsUseCase, EditedItemDto,
};
pub use dtos::{
  CustomerDetailsDto, InvoiceDetailsDto, InvoiceFormDto, InvoiceItemDto, InvoiceTotalsDto,
  LineItemDto, PaymentInstructionsDto,
};
pub use preview_invoice::{InvoicePreviewResponse, PreviewInvoiceUseCase};
pub use submit_invoice::{SubmitInvoiceCommand, SubmitInvoiceResponse, SubmitInvoiceUseCase};
