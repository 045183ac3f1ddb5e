use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::dtos::InvoiceFormDto;
use crate::domain::invoice::{InvoiceCurrency, InvoiceError, InvoiceService, SubmissionMode};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInvoiceCommand {
  pub form: InvoiceFormDto,
  #[serde(default, alias = "isDraft")]
  pub draft: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitInvoiceResponse {
  pub message: String,
  pub is_draft: bool,
  pub currency: InvoiceCurrency,
  pub total: Decimal,
}

/// Sends the invoice to the customer, or saves it as a draft.
pub struct SubmitInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl SubmitInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: SubmitInvoiceCommand,
  ) -> Result<SubmitInvoiceResponse, InvoiceError> {
    let mode = SubmissionMode::from_draft_flag(command.draft);
    let document = command.form.into_document()?;

    let totals = self.invoice_service.submit(&document, mode).await?;

    let message = if mode.is_draft() {
      "Invoice saved as draft"
    } else {
      "Invoice sent successfully"
    };

    Ok(SubmitInvoiceResponse {
      message: message.to_string(),
      is_draft: mode.is_draft(),
      currency: document.currency(),
      total: totals.grand_total,
    })
  }
}
