use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{
  CalculateTotalsUseCase, PreviewInvoiceUseCase, SubmitInvoiceUseCase,
};
use crate::application::rates::{ConvertCurrencyUseCase, GetRatesUseCase, ListCurrenciesUseCase};

use super::handlers::invoices::{
  calculate_totals_handler, preview_invoice_handler, submit_invoice_handler,
};
use super::handlers::rates::{
  convert_handler, get_rates_handler, list_currencies_handler, list_providers_handler,
};

/// Configure exchange rate routes
///
/// Mounted under the API scope (e.g., /api/v1).
///
/// # Routes
///
/// - GET /rates - Current categorized rates
/// - GET /rates/fintech/providers - Fintech provider names
/// - GET /rates/{source}/currencies - Currencies quoted by a source
/// - POST /convert - Naira total for an amount
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use freelancer_kit::application::rates::*;
/// # use freelancer_kit::adapters::http::routes::configure_rate_routes;
///
/// # fn example(
/// #   get_rates: Arc<GetRatesUseCase>,
/// #   list_currencies: Arc<ListCurrenciesUseCase>,
/// #   convert: Arc<ConvertCurrencyUseCase>,
/// # ) {
/// let app = App::new().service(
///   web::scope("/api/v1")
///     .configure(|cfg| configure_rate_routes(cfg, get_rates, list_currencies, convert)),
/// );
/// # }
/// ```
pub fn configure_rate_routes(
  cfg: &mut web::ServiceConfig,
  get_rates_use_case: Arc<GetRatesUseCase>,
  list_currencies_use_case: Arc<ListCurrenciesUseCase>,
  convert_use_case: Arc<ConvertCurrencyUseCase>,
) {
  cfg
    .app_data(web::Data::new(get_rates_use_case))
    .app_data(web::Data::new(list_currencies_use_case))
    .app_data(web::Data::new(convert_use_case))
    .route("/rates", web::get().to(get_rates_handler))
    .route(
      "/rates/fintech/providers",
      web::get().to(list_providers_handler),
    )
    .route(
      "/rates/{source}/currencies",
      web::get().to(list_currencies_handler),
    )
    .route("/convert", web::post().to(convert_handler));
}

/// Configure invoice routes
///
/// Mounted under /api/v1/invoices.
///
/// # Routes
///
/// - POST /totals - Line amounts and totals for a form being edited
/// - POST /preview - Read-only invoice view
/// - POST / - Send the invoice or save it as a draft
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  calculate_totals_use_case: Arc<CalculateTotalsUseCase>,
  preview_use_case: Arc<PreviewInvoiceUseCase>,
  submit_use_case: Arc<SubmitInvoiceUseCase>,
) {
  cfg
    .app_data(web::Data::new(calculate_totals_use_case))
    .app_data(web::Data::new(preview_use_case))
    .app_data(web::Data::new(submit_use_case))
    .route("/totals", web::post().to(calculate_totals_handler))
    .route("/preview", web::post().to(preview_invoice_handler))
    .route("", web::post().to(submit_invoice_handler));
}
