//! Ledger-facing types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::symbols::{Environment, NetworkSymbol, TokenSymbol};

/// Errors that can occur while preparing, signing or submitting transactions.
#[derive(Debug, Error)]
pub enum AkashicError {
    /// Private key input does not match the expected hex format.
    #[error("private key is not in correct format")]
    InvalidPrivateKeyFormat,

    /// Key decoding or curve operation failed while signing.
    #[error("signing failed: {0}")]
    SigningFailure(String),

    /// Network or token not present in the network table.
    #[error("asset not supported: {network}{}", token_suffix(.token))]
    UnsupportedAsset {
        network: NetworkSymbol,
        token: Option<TokenSymbol>,
    },

    /// Amount has more precision than the asset's smallest unit.
    #[error("amount {amount} has more than {decimal_places} decimal places")]
    PrecisionExceeded { amount: String, decimal_places: u32 },

    /// Amount string is not a non-negative decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A required input was empty.
    #[error("{0} may not be zero-valued")]
    MissingField(&'static str),

    /// No candidate node reported a healthy status.
    #[error("no healthy ledger node")]
    NoHealthyNode,

    /// The ledger reports that a referenced stream does not exist.
    #[error("l2 address not found")]
    AddressNotFound,

    /// The ledger reports insufficient balance.
    #[error("transaction amount exceeds total savings")]
    SavingsExceeded,

    /// Unclassified ledger rejection, carrying the raw message.
    #[error("ledger failure: {0}")]
    UnknownLedgerFailure(String),

    /// Network symbol belongs to the other environment.
    #[error("the L1-network {network} does not match the SDK environment {environment}")]
    NetworkEnvironmentMismatch {
        network: NetworkSymbol,
        environment: Environment,
    },

    /// Transaction id is not 64 hex digits with optional `AS` prefix.
    #[error("invalid transaction id: {0}")]
    InvalidUmid(String),

    /// HTTP transport failed or returned an error status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Callback payload could not be verified.
    #[error("invalid callback: {0}")]
    InvalidCallback(String),

    /// Injected configuration object is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl AkashicError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AkashicError::InvalidPrivateKeyFormat => "INVALID_PRIVATE_KEY_FORMAT",
            AkashicError::SigningFailure(_) => "SIGNING_FAILURE",
            AkashicError::UnsupportedAsset { .. } => "UNSUPPORTED_ASSET",
            AkashicError::PrecisionExceeded { .. } => "PRECISION_EXCEEDED",
            AkashicError::InvalidAmount(_) => "INVALID_AMOUNT",
            AkashicError::MissingField(_) => "MISSING_FIELD",
            AkashicError::NoHealthyNode => "NO_HEALTHY_NODE",
            AkashicError::AddressNotFound => "L2ADDRESS_NOT_FOUND",
            AkashicError::SavingsExceeded => "FUNDS_EXCEEDED",
            AkashicError::UnknownLedgerFailure(_) => "UNKNOWN_ERROR",
            AkashicError::NetworkEnvironmentMismatch { .. } => "NETWORK_ENVIRONMENT_MISMATCH",
            AkashicError::InvalidUmid(_) => "INVALID_UMID",
            AkashicError::Transport(_) => "TRANSPORT_ERROR",
            AkashicError::InvalidCallback(_) => "INVALID_CALLBACK",
            AkashicError::InvalidConfig(_) => "INVALID_CONFIG",
            AkashicError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

impl From<reqwest::Error> for AkashicError {
    fn from(e: reqwest::Error) -> Self {
        AkashicError::Transport(e.to_string())
    }
}

fn token_suffix(token: &Option<TokenSymbol>) -> String {
    token.map(|t| format!("/{}", t)).unwrap_or_default()
}

/// Result type for SDK operations.
pub type AkashicResult<T> = Result<T, AkashicError>;

/// Key returned by the ledger after a create-key transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatedKey {
    /// Ledger stream id of the new key.
    pub id: String,
    /// L1 address of the new key.
    pub address: String,
    #[serde(default)]
    pub hashes: Vec<String>,
}
