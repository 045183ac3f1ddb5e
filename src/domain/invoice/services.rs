use rust_decimal::Decimal;
use std::sync::Arc;

use super::entities::{InvoiceDocument, InvoiceTotals};
use super::errors::InvoiceError;
use super::ports::InvoiceGateway;
use super::value_objects::{SubmissionMode, round2};

/// `round2(quantity × unit_price)`.
///
/// Range checks belong to the form layer. A product too large for a
/// `Decimal` yields zero.
pub fn line_amount(quantity: u32, unit_price: Decimal) -> Decimal {
  match Decimal::from(quantity).checked_mul(unit_price) {
    Some(amount) => round2(amount),
    None => {
      tracing::warn!(quantity, %unit_price, "Line amount overflowed; reporting zero");
      Decimal::ZERO
    }
  }
}

pub struct InvoiceService {
  gateway: Arc<dyn InvoiceGateway>,
}

impl InvoiceService {
  pub fn new(gateway: Arc<dyn InvoiceGateway>) -> Self {
    Self { gateway }
  }

  /// Checks the document is complete and computes its totals.
  pub fn prepare(&self, invoice: &InvoiceDocument) -> Result<InvoiceTotals, InvoiceError> {
    if invoice.customers.is_empty() {
      return Err(InvoiceError::NoCustomers);
    }
    if invoice.line_items.is_empty() {
      return Err(InvoiceError::NoLineItems);
    }

    Ok(invoice.totals())
  }

  pub async fn submit(
    &self,
    invoice: &InvoiceDocument,
    mode: SubmissionMode,
  ) -> Result<InvoiceTotals, InvoiceError> {
    let totals = self.prepare(invoice)?;

    self.gateway.submit(invoice, &totals, mode).await?;

    tracing::info!(
      title = %invoice.details.title,
      currency = %invoice.currency(),
      total = %totals.grand_total,
      draft = mode.is_draft(),
      "Invoice submitted"
    );

    Ok(totals)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::entities::{InvoiceCustomer, InvoiceDetails, InvoiceLineItem};
  use crate::domain::invoice::value_objects::{InvoiceCurrency, Percentage};
  use async_trait::async_trait;
  use chrono::NaiveDate;
  use rust_decimal_macros::dec;
  use std::sync::Mutex;

  #[derive(Default)]
  struct RecordingGateway {
    submissions: Mutex<Vec<(Decimal, SubmissionMode)>>,
    fail: bool,
  }

  #[async_trait]
  impl InvoiceGateway for RecordingGateway {
    async fn submit(
      &self,
      _invoice: &InvoiceDocument,
      totals: &InvoiceTotals,
      mode: SubmissionMode,
    ) -> Result<(), InvoiceError> {
      if self.fail {
        return Err(InvoiceError::Gateway("backend returned 500".to_string()));
      }
      self
        .submissions
        .lock()
        .unwrap()
        .push((totals.grand_total, mode));
      Ok(())
    }
  }

  fn document(line_items: Vec<InvoiceLineItem>) -> InvoiceDocument {
    InvoiceDocument {
      customers: vec![InvoiceCustomer {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
      }],
      address: "1 Marina, Lagos".to_string(),
      details: InvoiceDetails {
        title: "Logo design".to_string(),
        currency: InvoiceCurrency::USD,
        due_date: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
      },
      line_items,
      discount: Percentage::new(dec!(10)).unwrap(),
      tax: Percentage::new(dec!(10)).unwrap(),
      additional_notes: None,
      payment_instructions: None,
    }
  }

  #[test]
  fn test_line_amount_rounds_to_cents() {
    assert_eq!(line_amount(3, dec!(19.999)), dec!(60.00));
    assert_eq!(line_amount(1, dec!(0)), dec!(0));
    assert_eq!(line_amount(7, dec!(0.145)), dec!(1.02));
  }

  #[test]
  fn test_line_amount_overflow_is_zero() {
    let price = Decimal::from_str_exact("79228162514264337593543950").unwrap();
    assert_eq!(line_amount(4_000_000_000, price), Decimal::ZERO);
    assert_eq!(line_amount(1, price), price);
  }

  #[test]
  fn test_prepare_rejects_incomplete_documents() {
    let service = InvoiceService::new(Arc::new(RecordingGateway::default()));

    let empty = document(vec![]);
    assert!(matches!(
      service.prepare(&empty),
      Err(InvoiceError::NoLineItems)
    ));

    let mut no_customers = document(vec![InvoiceLineItem::new(
      "Logo".to_string(),
      1,
      dec!(100),
    )]);
    no_customers.customers.clear();
    assert!(matches!(
      service.prepare(&no_customers),
      Err(InvoiceError::NoCustomers)
    ));
  }

  #[tokio::test]
  async fn test_submit_forwards_totals_and_mode() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = InvoiceService::new(gateway.clone());
    let invoice = document(vec![InvoiceLineItem::new(
      "Logo".to_string(),
      1,
      dec!(100),
    )]);

    let totals = service
      .submit(&invoice, SubmissionMode::Draft)
      .await
      .unwrap();

    assert_eq!(totals.grand_total, dec!(99.00));
    assert_eq!(
      *gateway.submissions.lock().unwrap(),
      vec![(dec!(99.00), SubmissionMode::Draft)]
    );
  }

  #[tokio::test]
  async fn test_submit_propagates_gateway_failure() {
    let gateway = Arc::new(RecordingGateway {
      fail: true,
      ..Default::default()
    });
    let service = InvoiceService::new(gateway);
    let invoice = document(vec![InvoiceLineItem::new(
      "Logo".to_string(),
      1,
      dec!(100),
    )]);

    let result = service.submit(&invoice, SubmissionMode::Send).await;
    assert!(matches!(result, Err(InvoiceError::Gateway(_))));
  }
}
