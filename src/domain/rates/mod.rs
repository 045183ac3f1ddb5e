pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{BlackMarketRate, CbnRate, FintechRates, RateDataset, ResolvedRate};
pub use errors::RateError;
pub use ports::RateProvider;
pub use services::{
  Conversion, ConversionRequest, amount_from_f64, convert, evaluate, parse_amount, resolve,
};
pub use value_objects::{CurrencyCode, Direction, RateQuery, RateSource};
