//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Node selection, signing and submission produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//!
//! Consumers:
//!     → Whatever subscriber / recorder the embedding binary installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a metrics exporter
//! - Logging init is idempotent so embedders and tests can both call it
//! - Private key material never reaches a log line

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
