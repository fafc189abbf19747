//! End-to-end: decimal amount in, signed envelope submitted to a mock node.

mod common;

use chrono::{DateTime, Utc};
use serde_json::Value;

use akashic_core::config::SdkConfig;
use akashic_core::ledger::signer;
use akashic_core::ledger::{CreatedKey, Envelope, Otk};
use akashic_core::network::{Environment, NetworkSymbol, TokenSymbol};
use akashic_core::{AkashicError, Session, TransferOptions};
use common::{start_mock_node, MockNode, MockResponse, RecordedRequest};

const PRIVATE_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
const IDENTITY: &str = "AS3a7c1f0e9d8b6a5c4e3f2a1b0c9d8e7f6a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d";
const UMID: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

fn committed() -> String {
    format!(
        r#"{{"$umid":"{}","$summary":{{"total":3,"vote":3,"commit":3}},"$streams":{{"new":[],"updated":[]}}}}"#,
        UMID
    )
}

fn rejected(message: &str) -> String {
    format!(
        r#"{{"$umid":"","$summary":{{"total":3,"vote":0,"commit":0,"errors":["{}"]}}}}"#,
        message
    )
}

/// Healthy on GET, `post_body` with `post_status` on POST.
async fn ledger_node(post_status: u16, post_body: String) -> MockNode {
    start_mock_node(move |req: &RecordedRequest| {
        if req.method == "GET" {
            MockResponse::status(4)
        } else {
            MockResponse::json(post_status, post_body.clone())
        }
    })
    .await
}

fn session_for(node: &MockNode) -> Session {
    let mut config = SdkConfig::for_environment(Environment::Development);
    config.node_selection.nodes = vec![node.node()];
    config.node_selection.timeout_ms = 2_000;
    config.client.request_timeout_secs = 5;
    let otk = Otk::reconstruct(PRIVATE_KEY, IDENTITY).unwrap();
    Session::new(config, otk).unwrap()
}

fn submitted(node: &MockNode) -> (RecordedRequest, Envelope) {
    let post = node
        .recorded()
        .into_iter()
        .find(|r| r.method == "POST")
        .expect("no submission recorded");
    let envelope: Envelope = serde_json::from_str(&post.body).unwrap();
    (post, envelope)
}

#[tokio::test]
async fn test_transfer_committed() {
    let node = ledger_node(200, committed()).await;
    let mut session = session_for(&node);

    let before = Utc::now();
    let envelope = session
        .prepare_transfer(
            "order-42",
            "AS0000000000000000000000000000000000000000000000000000000000000001",
            "1.5",
            NetworkSymbol::TronShasta,
            None,
            TransferOptions::default(),
        )
        .unwrap();

    let (umid, response) = session.submit::<Value>(&envelope).await.unwrap();
    assert_eq!(umid, format!("AS{}", UMID));
    assert_eq!(response.summary.commit, 3);
    assert_eq!(session.node(), Some(&node.node()));

    let (post, sent) = submitted(&node);
    assert_eq!(post.path, "/");
    assert_eq!(post.header("Ap-Client"), Some("rust-sdk"));
    assert!(post.header("Ap-Version").is_some());
    assert!(post.header("Content-Type").unwrap().starts_with("application/json"));

    assert_eq!(sent, envelope);
    assert_eq!(sent.tx.input["owner"]["amount"], "1500000");
    assert_eq!(sent.tx.input["owner"]["network"], "TRX-SHASTA");
    assert_eq!(sent.tx.metadata["identifier"], "order-42");
    assert_eq!(sent.signatures.len(), 1);
    assert!(signer::verify(&sent, session.otk().public_key(), IDENTITY).unwrap());

    let expire: DateTime<Utc> = sent.tx.expire.as_deref().unwrap().parse().unwrap();
    let window = (expire - before).num_seconds();
    assert!((58..=62).contains(&window), "expire window was {}s", window);
}

#[tokio::test]
async fn test_usdt_transfer_with_redirect_metadata() {
    let node = ledger_node(200, committed()).await;
    let mut session = session_for(&node);

    let envelope = session
        .prepare_transfer(
            "order-43",
            "AS0000000000000000000000000000000000000000000000000000000000000002",
            "10",
            NetworkSymbol::TronShasta,
            Some(TokenSymbol::Usdt),
            TransferOptions {
                initiated_to_non_l2: Some("TXYZ1111111111111111111111111111111".to_string()),
                fx_business_partner: true,
            },
        )
        .unwrap();
    session.submit::<Value>(&envelope).await.unwrap();

    let (_, sent) = submitted(&node);
    assert_eq!(sent.tx.input["owner"]["token"], "Tether");
    assert_eq!(sent.tx.input["owner"]["amount"], "10000000");
    assert_eq!(sent.tx.input["afx"]["$sigOnly"], true);
    assert_eq!(
        sent.tx.metadata["initiatedToNonL2"],
        "TXYZ1111111111111111111111111111111"
    );
}

#[tokio::test]
async fn test_insufficient_balance() {
    let node = ledger_node(200, rejected("Part-Balance to low")).await;
    let mut session = session_for(&node);

    let envelope = session
        .prepare_transfer(
            "order-44",
            "AS0000000000000000000000000000000000000000000000000000000000000003",
            "1000000",
            NetworkSymbol::TronShasta,
            None,
            TransferOptions::default(),
        )
        .unwrap();

    let err = session.submit::<Value>(&envelope).await.unwrap_err();
    assert!(matches!(err, AkashicError::SavingsExceeded));
    assert_eq!(err.code(), "FUNDS_EXCEEDED");
}

#[tokio::test]
async fn test_unknown_recipient() {
    let node = ledger_node(200, rejected("Stream(s) not found: AS00")).await;
    let mut session = session_for(&node);

    let key = CreatedKey {
        id: "AS0000000000000000000000000000000000000000000000000000000000000004".to_string(),
        address: "TXYZ2222222222222222222222222222222".to_string(),
        hashes: Vec::new(),
    };
    let envelope = session.prepare_differential_consensus(&key, "user-1").unwrap();
    assert!(signer::verify(&envelope, session.otk().public_key(), "owner").unwrap());

    let err = session.submit::<Value>(&envelope).await.unwrap_err();
    assert!(matches!(err, AkashicError::AddressNotFound));
}

#[tokio::test]
async fn test_http_error_is_transport() {
    let node = ledger_node(400, r#"{"error":"Bad Request","message":"malformed"}"#.to_string()).await;
    let mut session = session_for(&node);

    let envelope = session.prepare_create_key(NetworkSymbol::EthereumSepolia).unwrap();
    let err = session.submit::<Value>(&envelope).await.unwrap_err();
    match err {
        AkashicError::Transport(message) => assert_eq!(message, "Bad Request: malformed"),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_healthy_node_on_submit() {
    let node = start_mock_node(|_| MockResponse::status(2)).await;
    let mut session = session_for(&node);

    let envelope = session
        .prepare_assign(&["AS0000000000000000000000000000000000000000000000000000000000000005".to_string()], "user-2")
        .unwrap();
    let err = session.submit::<Value>(&envelope).await.unwrap_err();
    assert!(matches!(err, AkashicError::NoHealthyNode));
    assert!(node.recorded().iter().all(|r| r.method == "GET"));
}
