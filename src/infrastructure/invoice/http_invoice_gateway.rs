use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;

use crate::domain::invoice::{
  InvoiceCurrency, InvoiceCustomer, InvoiceDocument, InvoiceError, InvoiceGateway,
  InvoiceTotals, SubmissionMode,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceDetailsPayload<'a> {
  title: &'a str,
  currency: InvoiceCurrency,
  due_date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct InvoiceItemPayload<'a> {
  name: &'a str,
  quantity: u32,
  #[serde(with = "rust_decimal::serde::float")]
  price: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentInstructionsPayload<'a> {
  account_number: &'a str,
  bank_name: &'a str,
  routing_number: Option<&'a str>,
}

/// Body of `POST /invoice`: the form as entered plus the derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvoicePayload<'a> {
  customer_details: &'a [InvoiceCustomer],
  address_details: &'a str,
  invoice_details: InvoiceDetailsPayload<'a>,
  items: Vec<InvoiceItemPayload<'a>>,
  #[serde(with = "rust_decimal::serde::float")]
  discount: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  tax: Decimal,
  additional_notes: Option<&'a str>,
  payment_instructions: Option<PaymentInstructionsPayload<'a>>,
  #[serde(with = "rust_decimal::serde::float")]
  subtotal: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  discount_amount: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  tax_amount: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  total: Decimal,
  is_draft: bool,
  currency: InvoiceCurrency,
}

impl<'a> InvoicePayload<'a> {
  fn new(invoice: &'a InvoiceDocument, totals: &InvoiceTotals, mode: SubmissionMode) -> Self {
    Self {
      customer_details: &invoice.customers,
      address_details: &invoice.address,
      invoice_details: InvoiceDetailsPayload {
        title: &invoice.details.title,
        currency: invoice.details.currency,
        due_date: invoice.details.due_date,
      },
      items: invoice
        .line_items
        .iter()
        .map(|item| InvoiceItemPayload {
          name: &item.description,
          quantity: item.quantity,
          price: item.unit_price,
          amount: item.amount(),
        })
        .collect(),
      discount: invoice.discount.value(),
      tax: invoice.tax.value(),
      additional_notes: invoice.additional_notes.as_deref(),
      payment_instructions: invoice
        .payment_instructions
        .as_ref()
        .map(|p| PaymentInstructionsPayload {
          account_number: &p.account_number,
          bank_name: &p.bank_name,
          routing_number: p.routing_number.as_deref(),
        }),
      subtotal: totals.subtotal,
      discount_amount: totals.discount_amount,
      tax_amount: totals.tax_amount,
      total: totals.grand_total,
      is_draft: mode.is_draft(),
      currency: invoice.currency(),
    }
  }
}

/// Posts invoices to the backend, which stores drafts and emails sent ones.
pub struct HttpInvoiceGateway {
  client: Client,
  endpoint: String,
}

impl HttpInvoiceGateway {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InvoiceError> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| InvoiceError::Internal(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self {
      client,
      endpoint: format!("{}/invoice", base_url.trim_end_matches('/')),
    })
  }
}

#[async_trait]
impl InvoiceGateway for HttpInvoiceGateway {
  async fn submit(
    &self,
    invoice: &InvoiceDocument,
    totals: &InvoiceTotals,
    mode: SubmissionMode,
  ) -> Result<(), InvoiceError> {
    let payload = InvoicePayload::new(invoice, totals, mode);

    let response = self
      .client
      .post(&self.endpoint)
      .json(&payload)
      .send()
      .await
      .map_err(|e| InvoiceError::Gateway(format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      // The backend reports failures as `{ "message": ... }`.
      let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);
      return Err(InvoiceError::Gateway(format!(
        "Invoice API returned status {}: {}",
        status, message
      )));
    }

    Ok(())
  }
}
