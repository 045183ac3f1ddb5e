use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_timeout() -> u64 {
  10
}

fn default_cache_ttl() -> u64 {
  300
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub rates_api: RatesApiConfig,
  pub invoice_api: InvoiceApiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Exchange rate backend
#[derive(Debug, Clone, Deserialize)]
pub struct RatesApiConfig {
  pub base_url: String,
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  #[serde(default = "default_cache_ttl")]
  pub cache_ttl_seconds: u64,
  /// Serve rates from a JSON file instead of the backend.
  #[serde(default)]
  pub fixture_path: Option<String>,
}

/// Invoice backend used for drafts and sending
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceApiConfig {
  pub base_url: String,
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with FREELANCER_KIT_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables are separated by double underscores:
  /// - `FREELANCER_KIT_SERVER__PORT=8080`
  /// - `FREELANCER_KIT_RATES_API__BASE_URL=https://api.example.com`
  /// - `FREELANCER_KIT_RATES_API__CACHE_TTL_SECONDS=60`
  /// - `FREELANCER_KIT_RATES_API__FIXTURE_PATH=fixtures/rates.json`
  /// - `FREELANCER_KIT_INVOICE_API__BASE_URL=https://api.example.com`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("FREELANCER_KIT")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [rates_api]
            base_url = "https://rates.example.com"
            cache_ttl_seconds = 60

            [invoice_api]
            base_url = "https://invoices.example.com"
            timeout_seconds = 30
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.rates_api.base_url, "https://rates.example.com");
    assert_eq!(config.rates_api.timeout_seconds, 10); // default
    assert_eq!(config.rates_api.cache_ttl_seconds, 60);
    assert_eq!(config.rates_api.fixture_path, None);
    assert_eq!(config.invoice_api.timeout_seconds, 30);
  }

  #[test]
  fn test_fixture_path_is_optional_override() {
    let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [rates_api]
            base_url = "http://localhost:4000"
            fixture_path = "fixtures/rates.json"

            [invoice_api]
            base_url = "http://localhost:4000"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");
    assert_eq!(
      config.rates_api.fixture_path.as_deref(),
      Some("fixtures/rates.json")
    );
    assert_eq!(config.rates_api.cache_ttl_seconds, 300); // default
  }
}
