use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::errors::ApiError;
use crate::application::invoice::{
  CalculateTotalsCommand, CalculateTotalsUseCase, InvoiceFormDto, PreviewInvoiceUseCase,
  SubmitInvoiceCommand, SubmitInvoiceUseCase,
};

/// Handler for live invoice totals
///
/// POST /api/v1/invoices/totals
/// Body: CalculateTotalsCommand (JSON)
/// Response: derived line amounts and totals (JSON)
pub async fn calculate_totals_handler(
  request: web::Json<CalculateTotalsCommand>,
  use_case: web::Data<Arc<CalculateTotalsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case.execute(request.into_inner());
  Ok(HttpResponse::Ok().json(response))
}

/// Handler for invoice preview
///
/// POST /api/v1/invoices/preview
/// Body: InvoiceFormDto (JSON)
pub async fn preview_invoice_handler(
  request: web::Json<InvoiceFormDto>,
  use_case: web::Data<Arc<PreviewInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case.execute(request.into_inner())?;
  Ok(HttpResponse::Ok().json(response))
}

/// Handler for sending an invoice or saving it as a draft
///
/// POST /api/v1/invoices
/// Body: `{ "form": InvoiceFormDto, "draft": bool }`
/// Response: SubmitInvoiceResponse (JSON) with status 201
pub async fn submit_invoice_handler(
  request: web::Json<SubmitInvoiceCommand>,
  use_case: web::Data<Arc<SubmitInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.form.validate()?;

  let response = use_case.execute(request.into_inner()).await?;
  Ok(HttpResponse::Created().json(response))
}
