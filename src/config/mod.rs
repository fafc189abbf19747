//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or SdkConfig built in code
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SdkConfig (validated, immutable)
//!     → handed to Session, which builds selector/builder/converter from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ClientConfig, NodeSelectionConfig, ObservabilityConfig, SdkConfig, TransactionConfig};
pub use validation::{validate_config, ValidationError};
