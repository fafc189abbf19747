//! L1 network knowledge.
//!
//! # Data Flow
//! ```text
//! caller network/token symbols
//!     → symbols.rs (SDK spelling ⇄ ledger spelling, environment guard)
//!     → profiles.rs (decimal places, token contracts, address formats)
//!     → destination.rs (L1 / L2 / alias routing of a payout target)
//! ```
//!
//! # Design Decisions
//! - Tables are immutable and injected; the builtin table is shared via `Arc`
//! - Unknown network or token is `UnsupportedAsset`, never a default

pub mod destination;
pub mod profiles;
pub mod symbols;

pub use destination::{resolve_destination, Destination, L2Lookup};
pub use profiles::{NetworkProfile, NetworkRegistry, TokenProfile};
pub use symbols::{Environment, NetworkSymbol, TokenSymbol};
