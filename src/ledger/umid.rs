//! Transaction id (UMID) normalization.
//!
//! The ledger returns bare 64-hex ids; the SDK hands them out with an `AS`
//! prefix. Both operations accept either form and are idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ledger::types::{AkashicError, AkashicResult};

const AS_PREFIX: &str = "AS";

static UMID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(AS)?[A-Fa-f0-9]{64}$").expect("static UMID pattern"));

fn validate(umid: &str) -> AkashicResult<()> {
    if UMID.is_match(umid) {
        Ok(())
    } else {
        Err(AkashicError::InvalidUmid(umid.to_string()))
    }
}

pub fn prefix_with_as(umid: &str) -> AkashicResult<String> {
    validate(umid)?;
    if umid.starts_with(AS_PREFIX) {
        Ok(umid.to_string())
    } else {
        Ok(format!("{}{}", AS_PREFIX, umid))
    }
}

pub fn remove_as_prefix(umid: &str) -> AkashicResult<String> {
    validate(umid)?;
    Ok(umid.strip_prefix(AS_PREFIX).unwrap_or(umid).to_string())
}
