pub mod config;
pub mod invoice;
pub mod rates;
