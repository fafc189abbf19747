//! Fastest-healthy-node selection.
//!
//! # Responsibilities
//! - Probe every candidate's status endpoint concurrently
//! - Return the first candidate reporting the healthy status
//! - Abort the remaining probes once a winner is known
//!
//! # Design Decisions
//! - Every probe has a deadline; a timeout only marks that candidate unhealthy
//! - No ordering guarantee between healthy candidates: fastest wins

use serde::Deserialize;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time;
use url::Url;

use crate::config::NodeSelectionConfig;
use crate::health::nodes::AcNode;
use crate::ledger::types::{AkashicError, AkashicResult};
use crate::observability::metrics;

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: i64,
}

/// Result of probing one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy,
    /// Node answered with a status other than the healthy sentinel.
    Unhealthy(i64),
    Timeout,
    Unreachable(String),
    MalformedBody(String),
}

impl ProbeOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Healthy => "healthy",
            ProbeOutcome::Unhealthy(_) => "unhealthy",
            ProbeOutcome::Timeout => "timeout",
            ProbeOutcome::Unreachable(_) => "unreachable",
            ProbeOutcome::MalformedBody(_) => "malformed",
        }
    }
}

/// Races health checks across candidate nodes.
#[derive(Debug, Clone)]
pub struct NodeSelector {
    client: reqwest::Client,
    config: NodeSelectionConfig,
}

impl NodeSelector {
    pub fn new(config: NodeSelectionConfig) -> AkashicResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent("akashic-node-health-check")
            .build()?;
        Ok(Self { client, config })
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms)
    }

    /// Return the first candidate whose status endpoint reports healthy.
    pub async fn choose_healthy_node(&self, candidates: &[AcNode]) -> AkashicResult<AcNode> {
        let mut probes = JoinSet::new();

        for node in candidates {
            let client = self.client.clone();
            let node = node.clone();
            let path = self.config.status_path.clone();
            let healthy_status = self.config.healthy_status;
            let timeout = self.timeout();

            probes.spawn(async move {
                let outcome = probe(&client, &node, &path, healthy_status, timeout).await;
                (node, outcome)
            });
        }

        while let Some(joined) = probes.join_next().await {
            let (node, outcome) = match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "Health probe task failed");
                    continue;
                }
            };

            metrics::record_node_check(&node.node_url, outcome.label());

            if outcome == ProbeOutcome::Healthy {
                probes.abort_all();
                tracing::info!(node = %node.node_url, "Selected healthy ledger node");
                return Ok(node);
            }

            tracing::warn!(node = %node.node_url, outcome = ?outcome, "Ledger node unhealthy");
        }

        tracing::error!(candidates = candidates.len(), "No healthy ledger node");
        Err(AkashicError::NoHealthyNode)
    }
}

/// GET `<node_url><path>` and compare the reported status.
pub async fn probe(
    client: &reqwest::Client,
    node: &AcNode,
    path: &str,
    healthy_status: i64,
    timeout: Duration,
) -> ProbeOutcome {
    let url = match Url::parse(&node.node_url).and_then(|base| base.join(path)) {
        Ok(url) => url,
        Err(e) => return ProbeOutcome::Unreachable(format!("invalid node url: {}", e)),
    };

    let request = async {
        let response = client.get(url).send().await?;
        response.bytes().await
    };

    let body = match time::timeout(timeout, request).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => return ProbeOutcome::Unreachable(e.to_string()),
        Err(_) => return ProbeOutcome::Timeout,
    };

    match serde_json::from_slice::<StatusBody>(&body) {
        Ok(StatusBody { status }) if status == healthy_status => ProbeOutcome::Healthy,
        Ok(StatusBody { status }) => ProbeOutcome::Unhealthy(status),
        Err(e) => ProbeOutcome::MalformedBody(e.to_string()),
    }
}
