//! Ledger transaction subsystem.
//!
//! # Data Flow
//! ```text
//! Caller private key (or AKASHIC_PRIVATE_KEY)
//!     → otk.rs (key reconstruction, public key)
//!     → builder.rs (variant-specific envelope, contracts.rs ids, expire window)
//!     → signer.rs (canonical $tx bytes → ECDSA secp256k1 → $sigs)
//!     → client.rs (POST to chosen node)
//!     → response.rs (consensus summary → typed error)
//!     → umid.rs (AS-prefixed transaction id)
//! ```
//!
//! # Security Constraints
//! - Never log private keys
//! - Only `$tx` is signed; the wrapper is not covered by the signature
//! - Envelopes leave the builder unsigned or fully signed, never partial

pub mod builder;
pub mod client;
pub mod contracts;
pub mod envelope;
pub mod otk;
pub mod response;
pub mod signer;
pub mod types;
pub mod umid;

pub use builder::{PreparedTransaction, TransactionBuilder, TransactionKind, TransferRequest};
pub use client::LedgerClient;
pub use contracts::ContractAddressSet;
pub use envelope::{Envelope, TxObject};
pub use otk::Otk;
pub use response::{ConsensusSummary, LedgerResponse};
pub use types::{AkashicError, AkashicResult, CreatedKey};
