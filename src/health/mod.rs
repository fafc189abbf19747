//! Ledger node health subsystem.
//!
//! # Data Flow
//! ```text
//! Candidate nodes (nodes.rs defaults or config override)
//!     → selector.rs spawns one probe per node
//!     → GET <node_url>a/status → {"status": n}
//!     → first n == healthy sentinel wins, other probes aborted
//!     → chosen node handed to the ledger client
//! ```
//!
//! # Design Decisions
//! - Selection runs once per session, not on a timer
//! - Timeouts, transport errors and bad bodies all count as "unhealthy"

pub mod nodes;
pub mod selector;

pub use nodes::{default_nodes, AcNode};
pub use selector::{NodeSelector, ProbeOutcome};
