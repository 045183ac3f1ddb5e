use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use super::dtos::{InvoiceFormDto, InvoiceTotalsDto, LineItemDto};
use crate::domain::invoice::{
  InvoiceCurrency, InvoiceCustomer, InvoiceError, InvoiceService, PaymentInstructions,
};

#[derive(Debug, Serialize)]
pub struct InvoicePreviewResponse {
  pub title: String,
  pub currency: InvoiceCurrency,
  pub currency_symbol: &'static str,
  pub due_date: NaiveDate,
  pub customers: Vec<InvoiceCustomer>,
  pub address: String,
  pub items: Vec<LineItemDto>,
  pub totals: InvoiceTotalsDto,
  pub additional_notes: Option<String>,
  pub payment_instructions: Option<PaymentInstructions>,
}

/// Renders the read-only invoice shown before submission.
pub struct PreviewInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl PreviewInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub fn execute(&self, form: InvoiceFormDto) -> Result<InvoicePreviewResponse, InvoiceError> {
    let document = form.into_document()?;
    let totals = self.invoice_service.prepare(&document)?;
    let currency = document.currency();

    Ok(InvoicePreviewResponse {
      title: document.details.title,
      currency,
      currency_symbol: currency.symbol(),
      due_date: document.details.due_date,
      customers: document.customers,
      address: document.address,
      items: document.line_items.iter().map(LineItemDto::from).collect(),
      totals: InvoiceTotalsDto::from(&totals),
      additional_notes: document.additional_notes,
      payment_instructions: document.payment_instructions,
    })
  }
}
