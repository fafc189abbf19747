//! Decimal → smallest-unit conversion.
//!
//! # Responsibilities
//! - Look up decimal places for a network/token pair
//! - Parse decimal strings exactly, including exponent notation
//! - Scale by `10^decimal_places`, rejecting or truncating excess precision
//!
//! # Design Decisions
//! - Digits are shifted as text, so amount length is unbounded
//! - Precision is judged by value: trailing zeros past the asset's places are fine

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ledger::types::{AkashicError, AkashicResult};
use crate::network::profiles::NetworkRegistry;
use crate::network::symbols::{NetworkSymbol, TokenSymbol};

/// Largest exponent magnitude accepted in `1.5e3`-style input.
const MAX_EXPONENT: i64 = 1_000;

/// What to do when an amount has more precision than the asset supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionPolicy {
    /// Fail with `PrecisionExceeded`.
    #[default]
    Strict,
    /// Drop the excess fraction toward zero.
    Truncate,
}

/// Converts decimal amounts using a network registry.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    registry: Arc<NetworkRegistry>,
    policy: ConversionPolicy,
}

impl CurrencyConverter {
    pub fn new(registry: Arc<NetworkRegistry>, policy: ConversionPolicy) -> Self {
        Self { registry, policy }
    }

    /// Converter over the built-in network table with the strict policy.
    pub fn builtin() -> Self {
        Self::new(NetworkRegistry::builtin(), ConversionPolicy::Strict)
    }

    pub fn policy(&self) -> ConversionPolicy {
        self.policy
    }

    pub fn registry(&self) -> &Arc<NetworkRegistry> {
        &self.registry
    }

    /// Convert `amount` into the smallest unit of `token` (or the native coin).
    pub fn to_smallest_unit(
        &self,
        amount: &str,
        network: NetworkSymbol,
        token: Option<TokenSymbol>,
    ) -> AkashicResult<String> {
        let decimal_places = self.registry.decimal_places(network, token)?;
        scale_decimal(amount, decimal_places, self.policy)
    }
}

/// Exact decimal: `digits × 10^(-scale)`.
struct ParsedDecimal {
    digits: String,
    scale: i64,
}

fn parse_decimal(amount: &str) -> AkashicResult<ParsedDecimal> {
    let invalid = || AkashicError::InvalidAmount(amount.to_string());

    let trimmed = amount.trim();
    if trimmed.starts_with('-') {
        return Err(invalid());
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], parse_exponent(&unsigned[pos + 1..]).ok_or_else(invalid)?),
        None => (unsigned, 0),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }

    Ok(ParsedDecimal {
        digits: format!("{}{}", int_part, frac_part),
        scale: frac_part.len() as i64 - exponent,
    })
}

fn parse_exponent(raw: &str) -> Option<i64> {
    let (negative, digits) = match *raw.as_bytes().first()? {
        b'+' => (false, &raw[1..]),
        b'-' => (true, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    if value > MAX_EXPONENT {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn scale_decimal(amount: &str, decimal_places: u32, policy: ConversionPolicy) -> AkashicResult<String> {
    let parsed = parse_decimal(amount)?;
    let shift = decimal_places as i64 - parsed.scale;

    let integer = if shift >= 0 {
        let mut digits = parsed.digits;
        digits.extend(std::iter::repeat('0').take(shift as usize));
        digits
    } else {
        let cut = (-shift) as usize;
        let keep = parsed.digits.len().saturating_sub(cut);
        let (kept, dropped) = parsed.digits.split_at(keep);

        if dropped.bytes().any(|b| b != b'0') && policy == ConversionPolicy::Strict {
            return Err(AkashicError::PrecisionExceeded {
                amount: amount.to_string(),
                decimal_places,
            });
        }
        kept.to_string()
    };

    Ok(strip_leading_zeros(&integer))
}

fn strip_leading_zeros(digits: &str) -> String {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Render a smallest-unit integer string as a decimal amount.
pub fn from_smallest_unit(units: &str, decimal_places: u32) -> AkashicResult<String> {
    if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AkashicError::InvalidAmount(units.to_string()));
    }

    let places = decimal_places as usize;
    let digits = strip_leading_zeros(units);
    let padded = format!("{:0>width$}", digits, width = places + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - places);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        Ok(int_part.to_string())
    } else {
        Ok(format!("{}.{}", int_part, frac_part))
    }
}
