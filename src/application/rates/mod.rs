pub mod convert_currency;
pub mod get_rates;
pub mod list_currencies;

pub use convert_currency::{
  AmountInput, ConvertCurrencyCommand, ConvertCurrencyResponse, ConvertCurrencyUseCase,
};
pub use get_rates::{GetRatesResponse, GetRatesUseCase};
pub use list_currencies::{
  ListCurrenciesCommand, ListCurrenciesResponse, ListCurrenciesUseCase, ListProvidersResponse,
};
