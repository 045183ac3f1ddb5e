pub mod invoices;
pub mod rates;

use actix_web::HttpResponse;

use super::dtos::HealthResponse;

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
  HttpResponse::Ok().json(HealthResponse::ok())
}
