//! Candidate ledger nodes.

use serde::{Deserialize, Serialize};

use crate::network::symbols::Environment;

/// A ledger node and its minigate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct AcNode {
    pub minigate_url: String,
    /// Base URL; submissions POST here, health is `<node_url>a/status`.
    pub node_url: String,
}

impl AcNode {
    pub fn new(minigate_url: &str, node_url: &str) -> Self {
        Self {
            minigate_url: minigate_url.to_string(),
            node_url: node_url.to_string(),
        }
    }
}

const REGIONS: [&str; 6] = ["sg1", "sg2", "hk1", "hk2", "jp1", "jp2"];

fn nodes_under(domain: &str) -> Vec<AcNode> {
    REGIONS
        .iter()
        .map(|region| AcNode {
            minigate_url: format!("https://{}-minigate.{}/", region, domain),
            node_url: format!("https://{}.{}/", region, domain),
        })
        .collect()
}

/// Built-in node set for `environment`.
pub fn default_nodes(environment: Environment) -> Vec<AcNode> {
    match environment {
        Environment::Production => nodes_under("akashicchain.com"),
        Environment::Development => nodes_under("testnet.akashicchain.com"),
    }
}
