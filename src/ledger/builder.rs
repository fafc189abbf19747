//! Transaction envelope construction.
//!
//! # Responsibilities
//! - One constructor per transaction variant, each enforcing its own inputs
//! - Pick contract ids and shard index for the active environment
//! - Attach the validity window to transfers
//! - Record which identity the result must be signed under

use chrono::{Duration, Utc};
use serde_json::{json, Map, Value};
use std::fmt;

use crate::ledger::contracts::{ContractAddressSet, NATIVE_COIN};
use crate::ledger::envelope::{Envelope, TxObject, DEFAULT_EXPIRE_SECS};
use crate::ledger::otk::Otk;
use crate::ledger::signer::{self, OWNER_ROLE};
use crate::ledger::types::{AkashicError, AkashicResult, CreatedKey};
use crate::network::symbols::{Environment, NetworkSymbol, TokenSymbol};
use crate::observability::metrics;

/// Ledger key type registered by differential consensus.
const KEY_TYPE: &str = "secp256k1";

/// Transaction variants the builder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    CreateKey,
    Transfer,
    Assign,
    DifferentialConsensus,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::CreateKey => "create_key",
            TransactionKind::Transfer => "transfer",
            TransactionKind::Assign => "assign",
            TransactionKind::DifferentialConsensus => "differential_consensus",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs of an L2 transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub network: NetworkSymbol,
    /// Ledger-side token; `None` sends the native coin.
    pub token: Option<TokenSymbol>,
    /// Amount in smallest units.
    pub amount: String,
    /// Destination L2 stream.
    pub to: String,
    /// Caller reference recorded in metadata.
    pub reference_id: String,
    /// Original target when the payout was redirected from an L1 address or alias.
    pub initiated_to_non_l2: Option<String>,
    /// Require the FX multi-signer stream's co-signature.
    pub fx_business_partner: bool,
}

/// An unsigned envelope plus the variant that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTransaction {
    kind: TransactionKind,
    envelope: Envelope,
}

impl PreparedTransaction {
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Identity the signature is stored under.
    pub fn sign_as<'a>(&self, otk: &'a Otk) -> &'a str {
        match self.kind {
            TransactionKind::DifferentialConsensus => OWNER_ROLE,
            _ => otk.identity(),
        }
    }

    /// Sign with `otk` under the identity this variant requires.
    pub fn sign(self, otk: &Otk) -> AkashicResult<Envelope> {
        let sign_as = self.sign_as(otk).to_string();
        let envelope = signer::sign(self.envelope, otk, &sign_as)?;
        metrics::record_transaction_signed(self.kind.as_str());
        Ok(envelope)
    }
}

/// Builds envelopes for one environment.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    environment: Environment,
    contracts: ContractAddressSet,
    expire_window: Duration,
}

impl TransactionBuilder {
    /// Builder with the environment's built-in contract table.
    pub fn new(environment: Environment) -> Self {
        Self::with_contracts(environment, ContractAddressSet::for_environment(environment))
    }

    pub fn with_contracts(environment: Environment, contracts: ContractAddressSet) -> Self {
        Self {
            environment,
            contracts,
            expire_window: Duration::seconds(DEFAULT_EXPIRE_SECS),
        }
    }

    /// Override the transfer validity window.
    pub fn with_expire_window(mut self, window: Duration) -> Self {
        self.expire_window = window;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn contracts(&self) -> &ContractAddressSet {
        &self.contracts
    }

    fn tx(&self, contract: &str) -> TxObject {
        TxObject::new(&self.contracts.namespace, contract, self.contracts.db_index)
    }

    fn prepared(&self, kind: TransactionKind, envelope: Envelope) -> PreparedTransaction {
        tracing::debug!(
            kind = %kind,
            contract = %envelope.tx.contract,
            environment = %self.environment,
            "Transaction built"
        );
        PreparedTransaction { kind, envelope }
    }

    /// Ask the ledger to create a new key on `network` for the OTK's identity.
    pub fn create_key(&self, otk: &Otk, network: NetworkSymbol) -> AkashicResult<PreparedTransaction> {
        require(otk.identity(), "identity")?;
        self.environment.ensure_supports(network)?;

        let (symbol, ledger_network) = network.ledger_names();
        let mut tx = self.tx(&self.contracts.create);
        tx.input.insert(
            "owner".into(),
            json!({
                "$stream": otk.identity(),
                "symbol": symbol,
                "network": ledger_network,
                "business": true,
            }),
        );

        Ok(self.prepared(TransactionKind::CreateKey, Envelope::new(tx)))
    }

    /// Move `request.amount` from the OTK's stream to `request.to`.
    pub fn transfer(&self, otk: &Otk, request: &TransferRequest) -> AkashicResult<PreparedTransaction> {
        require(otk.identity(), "identity")?;
        require(&request.amount, "amount")?;
        require(&request.to, "to")?;
        require(&request.reference_id, "referenceId")?;
        validate_smallest_unit(&request.amount)?;
        self.environment.ensure_supports(request.network)?;

        let token = request
            .token
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| NATIVE_COIN.to_string());

        let mut tx = self.tx(&self.contracts.transfer);
        tx.entry = Some("transfer".to_string());
        tx.input.insert(
            "owner".into(),
            json!({
                "$stream": otk.identity(),
                "network": request.network.as_str(),
                "token": token,
                "amount": request.amount,
            }),
        );
        if request.fx_business_partner {
            tx.input.insert(
                "afx".into(),
                json!({
                    "$stream": self.contracts.fx_multi_signer,
                    "$sigOnly": true,
                }),
            );
        }
        tx.output.insert("to".into(), json!({ "$stream": request.to }));

        tx.metadata.insert("identifier".into(), Value::String(request.reference_id.clone()));
        if let Some(original) = request.initiated_to_non_l2.as_deref().filter(|s| !s.is_empty()) {
            tx.metadata
                .insert("initiatedToNonL2".into(), Value::String(original.to_string()));
        }

        tx.set_expire_if_absent(Utc::now(), self.expire_window)?;

        Ok(self.prepared(TransactionKind::Transfer, Envelope::new(tx)))
    }

    /// Bind unassigned ledger keys to `identifier`.
    pub fn assign(&self, otk: &Otk, ledger_ids: &[String], identifier: &str) -> AkashicResult<PreparedTransaction> {
        require(otk.identity(), "identity")?;
        require(identifier, "identifier")?;
        if ledger_ids.is_empty() {
            return Err(AkashicError::MissingField("ledgerIds"));
        }

        let mut tx = self.tx(&self.contracts.assign);
        tx.input
            .insert("owner".into(), json!({ "$stream": otk.identity() }));

        let mut output = Map::new();
        for id in ledger_ids {
            require(id, "ledgerId")?;
            output.insert(id.clone(), json!({ "$stream": id }));
        }
        tx.output = output;
        tx.metadata
            .insert("identifier".into(), Value::String(identifier.to_string()));

        Ok(self.prepared(TransactionKind::Assign, Envelope::new(tx)))
    }

    /// Register the OTK as owner of a freshly created key stream.
    ///
    /// Self-signed under the `owner` role and requires unanimous approval.
    pub fn differential_consensus(
        &self,
        otk: &Otk,
        key: &CreatedKey,
        identifier: &str,
    ) -> AkashicResult<PreparedTransaction> {
        require(&key.id, "key.id")?;
        require(&key.address, "key.address")?;
        require(identifier, "identifier")?;

        let mut tx = self.tx(&self.contracts.differential_consensus);
        tx.input.insert(
            "owner".into(),
            json!({
                "$stream": key.id,
                "publicKey": otk.public_key(),
                "type": KEY_TYPE,
                "address": key.address,
                "hashes": key.hashes,
            }),
        );
        tx.metadata
            .insert("identifier".into(), Value::String(identifier.to_string()));

        let mut envelope = Envelope::new(tx);
        envelope.self_sign = true;
        envelope.unanimous = true;

        Ok(self.prepared(TransactionKind::DifferentialConsensus, envelope))
    }
}

fn require(value: &str, field: &'static str) -> AkashicResult<()> {
    if value.is_empty() {
        return Err(AkashicError::MissingField(field));
    }
    Ok(())
}

fn validate_smallest_unit(amount: &str) -> AkashicResult<()> {
    if !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AkashicError::InvalidAmount(format!(
            "{} is not an integer smallest-unit amount",
            amount
        )));
    }
    if amount.bytes().all(|b| b == b'0') {
        return Err(AkashicError::InvalidAmount("amount must be greater than zero".to_string()));
    }
    Ok(())
}
