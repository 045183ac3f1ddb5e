pub mod invoice;
pub mod rates;
