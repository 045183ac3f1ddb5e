use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freelancer_kit::{
  adapters::http::{
    RequestIdMiddleware, configure_invoice_routes, configure_rate_routes, health_check,
  },
  application::invoice::{CalculateTotalsUseCase, PreviewInvoiceUseCase, SubmitInvoiceUseCase},
  application::rates::{ConvertCurrencyUseCase, GetRatesUseCase, ListCurrenciesUseCase},
  domain::invoice::{InvoiceGateway, InvoiceService},
  domain::rates::RateProvider,
  infrastructure::{
    config::{Config, RatesApiConfig},
    invoice::HttpInvoiceGateway,
    rates::{CachedRateProvider, FileRateProvider, HttpRateProvider},
  },
};

fn build_rate_provider(config: &RatesApiConfig) -> anyhow::Result<Arc<dyn RateProvider>> {
  if let Some(path) = &config.fixture_path {
    tracing::info!("Serving exchange rates from fixture {}", path);
    return Ok(Arc::new(FileRateProvider::new(path)));
  }

  tracing::info!("Fetching exchange rates from {}", config.base_url);
  let http = HttpRateProvider::new(
    &config.base_url,
    Duration::from_secs(config.timeout_seconds),
  )
  .context("Failed to create rates API client")?;

  let ttl = i64::try_from(config.cache_ttl_seconds)
    .map(chrono::Duration::seconds)
    .context("rates_api.cache_ttl_seconds is too large")?;

  Ok(Arc::new(CachedRateProvider::new(Arc::new(http), ttl)))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "freelancer_kit=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting freelancer kit service");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  // Ports
  let rate_provider = build_rate_provider(&config.rates_api)?;
  let invoice_gateway: Arc<dyn InvoiceGateway> = Arc::new(
    HttpInvoiceGateway::new(
      &config.invoice_api.base_url,
      Duration::from_secs(config.invoice_api.timeout_seconds),
    )
    .context("Failed to create invoice API client")?,
  );

  // Services
  let invoice_service = Arc::new(InvoiceService::new(invoice_gateway));

  // Use cases
  let get_rates_use_case = Arc::new(GetRatesUseCase::new(rate_provider.clone()));
  let list_currencies_use_case = Arc::new(ListCurrenciesUseCase::new(rate_provider.clone()));
  let convert_use_case = Arc::new(ConvertCurrencyUseCase::new(rate_provider.clone()));
  let calculate_totals_use_case = Arc::new(CalculateTotalsUseCase::new());
  let preview_use_case = Arc::new(PreviewInvoiceUseCase::new(invoice_service.clone()));
  let submit_use_case = Arc::new(SubmitInvoiceUseCase::new(invoice_service.clone()));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .service(web::scope("/api/v1/invoices").configure(|cfg| {
        configure_invoice_routes(
          cfg,
          calculate_totals_use_case.clone(),
          preview_use_case.clone(),
          submit_use_case.clone(),
        )
      }))
      .service(web::scope("/api/v1").configure(|cfg| {
        configure_rate_routes(
          cfg,
          get_rates_use_case.clone(),
          list_currencies_use_case.clone(),
          convert_use_case.clone(),
        )
      }))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))
  .with_context(|| format!("Failed to bind {}:{}", server_host, server_port))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}
