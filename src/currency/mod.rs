//! Decimal amount conversion.
//!
//! Amounts enter as decimal strings and leave as integer strings in the
//! asset's smallest unit. No binary floating point on either path.

pub mod converter;

pub use converter::{from_smallest_unit, ConversionPolicy, CurrencyConverter};
