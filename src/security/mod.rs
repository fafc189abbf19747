//! Security subsystem.
//!
//! Inbound callback authentication. Outbound transactions are authenticated
//! by their ECDSA signatures in the ledger module.

pub mod callback;

pub use callback::{callback_signature, verify_callback_signature};
