//! AkashicChain SDK core.
//!
//! # Architecture Overview
//!
//! ```text
//!     caller input (decimal amount, symbols, target)
//!         │
//!         ▼
//!   ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!   │   currency   │───▶│    ledger    │───▶│    ledger    │
//!   │  converter   │    │   builder    │    │    signer    │
//!   └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                  │ signed envelope
//!   ┌──────────────┐    ┌──────────────┐    ┌──────▼───────┐
//!   │    health    │───▶│    ledger    │───▶│    ledger    │
//!   │   selector   │    │    client    │    │   response   │
//!   └──────────────┘    └──────────────┘    └──────────────┘
//!
//!   Cross-cutting: config, network tables, observability, security (callbacks)
//! ```
//!
//! `session::Session` wires these together for one identity.

pub mod config;
pub mod currency;
pub mod health;
pub mod ledger;
pub mod network;
pub mod observability;
pub mod security;
pub mod session;

pub use config::SdkConfig;
pub use ledger::{AkashicError, AkashicResult};
pub use session::{Session, TransferOptions};
