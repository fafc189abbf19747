//! One-time key (OTK) reconstruction.
//!
//! # Security
//! - Private keys are loaded from caller input or the environment only
//! - Keys are never logged or serialized
//! - `Debug` prints the identity and public key, never the scalar

use k256::ecdsa::{SigningKey, VerifyingKey};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ledger::types::{AkashicError, AkashicResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "AKASHIC_PRIVATE_KEY";

// A raw 32-byte key written as hex may have dropped up to one leading zero byte.
static PRIVATE_KEY_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0x)?[a-f0-9]{62,64}$").expect("static private key pattern"));

/// Key material for signing ledger transactions.
#[derive(Clone)]
pub struct Otk {
    signing_key: SigningKey,
    public_key: String,
    identity: String,
}

impl Otk {
    /// Rebuild an OTK from a hex private key and the caller's ledger identity.
    ///
    /// # Arguments
    /// * `private_key_hex` - 62 to 64 lowercase hex digits, optionally `0x`-prefixed
    /// * `identity` - ledger stream the key signs for
    pub fn reconstruct(private_key_hex: &str, identity: &str) -> AkashicResult<Self> {
        if !PRIVATE_KEY_FORMAT.is_match(private_key_hex) {
            return Err(AkashicError::InvalidPrivateKeyFormat);
        }

        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let padded = format!("{:0>64}", key_hex);
        let bytes = hex::decode(&padded).map_err(|_| AkashicError::InvalidPrivateKeyFormat)?;

        // Zero or >= curve order
        let signing_key =
            SigningKey::from_slice(&bytes).map_err(|_| AkashicError::InvalidPrivateKeyFormat)?;

        let public_key = encode_public_key(signing_key.verifying_key());

        tracing::info!(
            identity = %identity,
            public_key = %public_key,
            "OTK reconstructed"
        );

        Ok(Self {
            signing_key,
            public_key,
            identity: identity.to_string(),
        })
    }

    /// Load the private key from `AKASHIC_PRIVATE_KEY`.
    pub fn from_env(identity: &str) -> AkashicResult<Self> {
        let private_key =
            std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| AkashicError::InvalidPrivateKeyFormat)?;
        Self::reconstruct(private_key.trim(), identity)
    }

    /// `0x`-prefixed hex of the compressed public key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        self.signing_key.verifying_key()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl std::fmt::Debug for Otk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Otk")
            .field("identity", &self.identity)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

pub(crate) fn encode_public_key(key: &VerifyingKey) -> String {
    format!("0x{}", hex::encode(key.to_encoded_point(true).as_bytes()))
}

/// Parse a `0x`-prefixed (or bare) hex SEC1 public key.
pub fn decode_public_key(public_key_hex: &str) -> AkashicResult<VerifyingKey> {
    let key_hex = public_key_hex.strip_prefix("0x").unwrap_or(public_key_hex);
    let bytes = hex::decode(key_hex)
        .map_err(|e| AkashicError::SigningFailure(format!("bad public key hex: {}", e)))?;
    VerifyingKey::from_sec1_bytes(&bytes)
        .map_err(|e| AkashicError::SigningFailure(format!("bad public key: {}", e)))
}
