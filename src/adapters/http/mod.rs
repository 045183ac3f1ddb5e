pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, HealthResponse};
pub use errors::ApiError;
pub use handlers::health_check;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{configure_invoice_routes, configure_rate_routes};
