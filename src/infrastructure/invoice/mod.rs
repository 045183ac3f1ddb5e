pub mod http_invoice_gateway;

pub use http_invoice_gateway::HttpInvoiceGateway;
