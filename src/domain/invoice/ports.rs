use async_trait::async_trait;

use super::entities::{InvoiceDocument, InvoiceTotals};
use super::errors::InvoiceError;
use super::value_objects::SubmissionMode;

/// Backend endpoint that stores drafts and sends finished invoices.
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
  async fn submit(
    &self,
    invoice: &InvoiceDocument,
    totals: &InvoiceTotals,
    mode: SubmissionMode,
  ) -> Result<(), InvoiceError>;
}
