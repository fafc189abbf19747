//! Callback signature verification.
//!
//! # Responsibilities
//! - Re-serialize callback JSON with keys sorted
//! - HMAC-SHA256 it with the API secret
//! - Compare against the hex signature from the callback header
//!
//! # Security Constraints
//! - Comparison is constant-time
//! - The secret is never logged

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

use crate::ledger::types::{AkashicError, AkashicResult};

type HmacSha256 = Hmac<Sha256>;

/// Compact JSON with object keys in lexicographic order.
fn sorted_json(callback: &str) -> AkashicResult<Vec<u8>> {
    let value: Value = serde_json::from_str(callback)
        .map_err(|e| AkashicError::InvalidCallback(format!("callback is not valid JSON: {}", e)))?;
    Ok(serde_json::to_vec(&value)?)
}

fn mac_for(api_secret: &str, callback: &str) -> AkashicResult<HmacSha256> {
    if api_secret.is_empty() {
        return Err(AkashicError::InvalidCallback(
            "api secret must be set to verify a signature".to_string(),
        ));
    }
    let message = sorted_json(callback)?;
    let mut mac = HmacSha256::new_from_slice(api_secret.as_bytes())
        .map_err(|e| AkashicError::InvalidCallback(e.to_string()))?;
    mac.update(&message);
    Ok(mac)
}

/// Hex HMAC-SHA256 of the key-sorted callback body.
pub fn callback_signature(api_secret: &str, callback: &str) -> AkashicResult<String> {
    Ok(hex::encode(mac_for(api_secret, callback)?.finalize().into_bytes()))
}

/// True when `signature` matches the callback body. Malformed hex is a mismatch.
pub fn verify_callback_signature(api_secret: &str, callback: &str, signature: &str) -> AkashicResult<bool> {
    let mac = mac_for(api_secret, callback)?;
    let Ok(expected) = hex::decode(signature) else {
        tracing::warn!("Callback signature is not hex");
        return Ok(false);
    };
    let valid = mac.verify_slice(&expected).is_ok();
    if !valid {
        tracing::warn!("Callback signature mismatch");
    }
    Ok(valid)
}
