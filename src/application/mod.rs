//! Application layer
//!
//! Use cases that turn form input into calls on the domain calculators and
//! ports. Each use case owns its command and response types.

pub mod invoice;
pub mod rates;
