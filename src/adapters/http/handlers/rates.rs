use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::application::rates::{
  ConvertCurrencyCommand, ConvertCurrencyUseCase, GetRatesUseCase, ListCurrenciesCommand,
  ListCurrenciesUseCase,
};

/// Handler for the current rate dataset
///
/// GET /api/v1/rates
/// Response: the categorized rates (JSON), 502 when the backend is down
pub async fn get_rates_handler(
  use_case: web::Data<Arc<GetRatesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Handler for the converter's currency picker
///
/// GET /api/v1/rates/{source}/currencies
pub async fn list_currencies_handler(
  source: web::Path<String>,
  use_case: web::Data<Arc<ListCurrenciesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(ListCurrenciesCommand {
      source: source.into_inner(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/rates/fintech/providers
pub async fn list_providers_handler(
  use_case: web::Data<Arc<ListCurrenciesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  Ok(HttpResponse::Ok().json(use_case.providers().await))
}

/// Handler for currency conversion
///
/// POST /api/v1/convert
/// Body: ConvertCurrencyCommand (JSON)
/// Response: ConvertCurrencyResponse (JSON). Unknown currencies, bad amounts
/// and unavailable rates all answer 200 with `converted: 0`.
pub async fn convert_handler(
  request: web::Json<ConvertCurrencyCommand>,
  use_case: web::Data<Arc<ConvertCurrencyUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute(request.into_inner()).await?;
  Ok(HttpResponse::Ok().json(response))
}
