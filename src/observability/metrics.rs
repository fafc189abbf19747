//! Metrics collection.
//!
//! # Metrics
//! - `akashic_node_health` (gauge): 1=healthy, 0=unhealthy, by node
//! - `akashic_node_checks_total` (counter): health probes by node, outcome
//! - `akashic_transactions_signed_total` (counter): signed envelopes by kind
//! - `akashic_submissions_total` (counter): submissions by outcome
//!
//! Recording goes through the `metrics` facade; with no recorder installed
//! every call is a no-op.

use metrics::{counter, gauge};

pub fn record_node_health(node: &str, healthy: bool) {
    gauge!("akashic_node_health", "node" => node.to_string()).set(if healthy { 1.0 } else { 0.0 });
}

pub fn record_node_check(node: &str, outcome: &'static str) {
    counter!("akashic_node_checks_total", "node" => node.to_string(), "outcome" => outcome).increment(1);
    record_node_health(node, outcome == "healthy");
}

pub fn record_transaction_signed(kind: &'static str) {
    counter!("akashic_transactions_signed_total", "kind" => kind).increment(1);
}

pub fn record_submission(outcome: &'static str) {
    counter!("akashic_submissions_total", "outcome" => outcome).increment(1);
}
