//! Ledger submission response and failure classification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ledger::types::{AkashicError, AkashicResult};

/// Consensus summary of a submitted transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConsensusSummary {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub vote: u32,
    #[serde(default)]
    pub commit: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StreamChanges {
    #[serde(default)]
    pub new: Vec<Value>,
    #[serde(default)]
    pub updated: Vec<Value>,
}

/// Node response to a submitted envelope.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LedgerResponse<R = Value> {
    #[serde(rename = "$umid", default)]
    pub umid: String,

    #[serde(rename = "$summary", default)]
    pub summary: ConsensusSummary,

    #[serde(rename = "$streams", default)]
    pub streams: StreamChanges,

    #[serde(rename = "$responses", default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<R>,
}

/// Known ledger failure wording and what it means.
///
/// The ledger reports failures as free text; keep every pattern here.
const LEDGER_FAILURES: &[(&str, LedgerFailure)] = &[
    ("balance is not sufficient", LedgerFailure::SavingsExceeded),
    ("Couldn't parse integer", LedgerFailure::SavingsExceeded),
    ("Part-Balance to low", LedgerFailure::SavingsExceeded),
    ("Stream(s) not found", LedgerFailure::AddressNotFound),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedgerFailure {
    SavingsExceeded,
    AddressNotFound,
}

/// Map a raw ledger error message to a typed error.
pub fn classify_ledger_error(message: &str) -> AkashicError {
    let failure = LEDGER_FAILURES
        .iter()
        .find(|(pattern, _)| message.contains(pattern))
        .map(|(_, failure)| *failure);

    match failure {
        Some(LedgerFailure::SavingsExceeded) => AkashicError::SavingsExceeded,
        Some(LedgerFailure::AddressNotFound) => AkashicError::AddressNotFound,
        None => AkashicError::UnknownLedgerFailure(message.to_string()),
    }
}

/// Succeeds iff at least one node committed the transaction.
pub fn check(summary: &ConsensusSummary) -> AkashicResult<()> {
    if summary.commit > 0 {
        return Ok(());
    }

    let err = match summary.errors.first() {
        Some(message) => classify_ledger_error(message),
        None => AkashicError::UnknownLedgerFailure("transaction was not committed".to_string()),
    };

    tracing::warn!(
        total = summary.total,
        vote = summary.vote,
        code = err.code(),
        "Ledger rejected transaction"
    );

    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(errors: &[&str]) -> ConsensusSummary {
        ConsensusSummary {
            total: 1,
            vote: 0,
            commit: 0,
            errors: errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_commit_is_success_regardless_of_errors() {
        let summary = ConsensusSummary {
            total: 3,
            vote: 3,
            commit: 1,
            errors: vec!["Stream(s) not found".into()],
        };
        assert!(check(&summary).is_ok());
    }

    #[test]
    fn test_balance_errors_map_to_savings_exceeded() {
        for message in [
            "Part-Balance to low",
            "owner balance is not sufficient",
            "Couldn't parse integer from amount",
        ] {
            assert!(matches!(check(&failed(&[message])), Err(AkashicError::SavingsExceeded)));
        }
    }

    #[test]
    fn test_missing_stream_maps_to_address_not_found() {
        assert!(matches!(
            check(&failed(&["Stream(s) not found"])),
            Err(AkashicError::AddressNotFound)
        ));
    }

    #[test]
    fn test_unknown_failure_carries_raw_message() {
        match check(&failed(&["Contract crashed", "Part-Balance to low"])) {
            Err(AkashicError::UnknownLedgerFailure(msg)) => assert_eq!(msg, "Contract crashed"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_no_errors_and_no_commit() {
        assert!(matches!(
            check(&failed(&[])),
            Err(AkashicError::UnknownLedgerFailure(_))
        ));
    }

    #[test]
    fn test_parse_node_response() {
        let body = r#"{
            "$umid": "0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0",
            "$summary": {"total": 2, "vote": 2, "commit": 2},
            "$streams": {"new": [], "updated": [{"id": "AS1"}]},
            "$responses": [{"id": "key1", "address": "T1", "hashes": []}]
        }"#;
        let response: LedgerResponse<crate::ledger::types::CreatedKey> = serde_json::from_str(body).unwrap();
        assert_eq!(response.summary.commit, 2);
        assert_eq!(response.streams.updated.len(), 1);
        assert_eq!(response.responses[0].id, "key1");
    }
}
