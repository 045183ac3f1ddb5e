pub mod cached_rate_provider;
pub mod file_rate_provider;
pub mod http_rate_provider;

pub use cached_rate_provider::CachedRateProvider;
pub use file_rate_provider::FileRateProvider;
pub use http_rate_provider::HttpRateProvider;
