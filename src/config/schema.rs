//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the SDK.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::currency::ConversionPolicy;
use crate::health::nodes::{default_nodes, AcNode};
use crate::network::symbols::Environment;

/// Root configuration for an SDK session.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SdkConfig {
    /// Production or development (testnet).
    pub environment: Environment,

    /// Node health race settings.
    pub node_selection: NodeSelectionConfig,

    /// Transaction construction settings.
    pub transactions: TransactionConfig,

    /// Ledger HTTP client settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl SdkConfig {
    /// Defaults for the given environment.
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Configured nodes, or the environment's built-in set when none are given.
    pub fn candidate_nodes(&self) -> Vec<AcNode> {
        if self.node_selection.nodes.is_empty() {
            default_nodes(self.environment)
        } else {
            self.node_selection.nodes.clone()
        }
    }
}

/// Node selection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeSelectionConfig {
    /// Per-probe deadline in milliseconds.
    pub timeout_ms: u64,

    /// Status path joined onto each node URL.
    pub status_path: String,

    /// Status value that marks a node healthy.
    pub healthy_status: i64,

    /// Override for the built-in node set. Empty means built-in.
    pub nodes: Vec<AcNode>,
}

impl Default for NodeSelectionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            status_path: "a/status".to_string(),
            healthy_status: 4,
            nodes: Vec::new(),
        }
    }
}

/// Transaction construction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// `$expire` window applied when a transaction has none.
    pub expire_secs: u64,

    /// Handling of amounts with excess precision.
    pub conversion_policy: ConversionPolicy,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            expire_secs: crate::ledger::envelope::DEFAULT_EXPIRE_SECS as u64,
            conversion_policy: ConversionPolicy::Strict,
        }
    }
}

/// Ledger client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Submission request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Shared secret for callback signature verification.
    pub api_secret: Option<String>,

    /// Account is an FX business partner; transfers need the FX co-signer.
    pub fx_business_partner: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            api_secret: None,
            fx_business_partner: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
