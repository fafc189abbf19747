//! Ledger node submission client.
//!
//! # Responsibilities
//! - POST signed envelopes to the chosen node
//! - Turn HTTP error statuses into transport errors
//! - Run the consensus summary through the response validator
//!
//! No retries: a failed submission is reported to the caller as-is.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::health::nodes::AcNode;
use crate::ledger::envelope::Envelope;
use crate::ledger::response::{check, LedgerResponse};
use crate::ledger::types::{AkashicError, AkashicResult};
use crate::ledger::umid::prefix_with_as;
use crate::observability::metrics;

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
const SDK_CLIENT: &str = "rust-sdk";

/// HTTP client bound to one ledger node.
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    node: AcNode,
}

impl LedgerClient {
    pub fn new(node: AcNode, request_timeout: Duration) -> AkashicResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Ap-Version", HeaderValue::from_static(SDK_VERSION));
        headers.insert("Ap-Client", HeaderValue::from_static(SDK_CLIENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()?;

        Ok(Self { http, node })
    }

    pub fn node(&self) -> &AcNode {
        &self.node
    }

    /// POST an envelope and decode the node's response without judging it.
    pub async fn post<R: DeserializeOwned>(&self, envelope: &Envelope) -> AkashicResult<LedgerResponse<R>> {
        let response = self
            .http
            .post(&self.node.node_url)
            .json(envelope)
            .send()
            .await?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |v| v.contains("application/json"));
        let body = response.bytes().await?;

        if status.as_u16() >= 400 {
            return Err(AkashicError::Transport(http_error_message(status.as_u16(), is_json, &body)));
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Submit, validate the summary and return the `AS`-prefixed UMID.
    pub async fn submit<R: DeserializeOwned>(
        &self,
        envelope: &Envelope,
    ) -> AkashicResult<(String, LedgerResponse<R>)> {
        let result = self.post::<R>(envelope).await.and_then(|response| {
            check(&response.summary)?;
            let umid = prefix_with_as(&response.umid)?;
            Ok((umid, response))
        });

        match &result {
            Ok((umid, _)) => {
                metrics::record_submission("committed");
                tracing::info!(
                    node = %self.node.node_url,
                    contract = %envelope.tx.contract,
                    umid = %umid,
                    "Transaction committed"
                );
            }
            Err(e) => {
                metrics::record_submission(e.code());
                tracing::warn!(
                    node = %self.node.node_url,
                    contract = %envelope.tx.contract,
                    error = %e,
                    "Transaction submission failed"
                );
            }
        }

        result
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("node", &self.node.node_url)
            .finish()
    }
}

/// `error: message` from a JSON error body, else the bare status.
fn http_error_message(status: u16, is_json: bool, body: &[u8]) -> String {
    if is_json && !body.is_empty() {
        if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
            let field = |k: &str| map.get(k).map(render).unwrap_or_else(|| "<nil>".to_string());
            return format!("{}: {}", field("error"), field("message"));
        }
    }
    format!("HTTP Error: {}", status)
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_from_json_body() {
        let body = br#"{"error":"Bad Request","message":"savingsExceeded"}"#;
        assert_eq!(http_error_message(400, true, body), "Bad Request: savingsExceeded");
    }

    #[test]
    fn test_http_error_message_fallback() {
        assert_eq!(http_error_message(502, false, b"<html>"), "HTTP Error: 502");
        assert_eq!(http_error_message(500, true, b""), "HTTP Error: 500");
        assert_eq!(http_error_message(500, true, b"not json"), "HTTP Error: 500");
    }

    #[test]
    fn test_client_debug_shows_node() {
        let node = AcNode::new("https://sg1-minigate.testnet.akashicchain.com/", "https://sg1.testnet.akashicchain.com/");
        let client = LedgerClient::new(node, Duration::from_secs(5)).unwrap();
        assert!(format!("{:?}", client).contains("sg1.testnet"));
    }
}
