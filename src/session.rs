//! Session facade.
//!
//! # Responsibilities
//! - Own the OTK and every component built from an `SdkConfig`
//! - Select a ledger node once and keep a client bound to it
//! - Turn caller-level inputs (decimal amounts, symbols) into signed envelopes
//!
//! # Design Decisions
//! - Node selection is lazy; `submit` connects if `connect` was never called
//! - Every `prepare_*` returns a fully signed envelope

use chrono::Duration as ChronoDuration;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::{validate_config, SdkConfig};
use crate::currency::CurrencyConverter;
use crate::health::nodes::AcNode;
use crate::health::selector::NodeSelector;
use crate::ledger::builder::{TransactionBuilder, TransferRequest};
use crate::ledger::client::LedgerClient;
use crate::ledger::envelope::Envelope;
use crate::ledger::otk::Otk;
use crate::ledger::response::LedgerResponse;
use crate::ledger::types::{AkashicError, AkashicResult, CreatedKey};
use crate::network::destination::Destination;
use crate::network::profiles::NetworkRegistry;
use crate::network::symbols::{NetworkSymbol, TokenSymbol};
use crate::security::callback::verify_callback_signature;

/// Optional transfer inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferOptions {
    /// Original L1 address or alias the payout was addressed to.
    pub initiated_to_non_l2: Option<String>,
    /// Require the FX multi-signer co-signature.
    pub fx_business_partner: bool,
}

/// One configured identity talking to one ledger node.
#[derive(Debug)]
pub struct Session {
    config: SdkConfig,
    otk: Otk,
    builder: TransactionBuilder,
    converter: CurrencyConverter,
    selector: NodeSelector,
    client: Option<LedgerClient>,
}

impl Session {
    pub fn new(config: SdkConfig, otk: Otk) -> AkashicResult<Self> {
        Self::with_registry(config, otk, NetworkRegistry::builtin())
    }

    /// Session over a caller-supplied network table.
    pub fn with_registry(
        config: SdkConfig,
        otk: Otk,
        registry: std::sync::Arc<NetworkRegistry>,
    ) -> AkashicResult<Self> {
        validate_config(&config).map_err(|errors| {
            let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AkashicError::InvalidConfig(joined.join(", "))
        })?;

        let expire_window = i64::try_from(config.transactions.expire_secs)
            .ok()
            .and_then(ChronoDuration::try_seconds)
            .ok_or_else(|| {
                AkashicError::InvalidConfig(format!(
                    "transactions.expire_secs: {} is out of range",
                    config.transactions.expire_secs
                ))
            })?;
        let builder = TransactionBuilder::new(config.environment).with_expire_window(expire_window);
        let converter = CurrencyConverter::new(registry, config.transactions.conversion_policy);
        let selector = NodeSelector::new(config.node_selection.clone())?;

        tracing::info!(
            environment = %config.environment,
            identity = %otk.identity(),
            policy = ?config.transactions.conversion_policy,
            fx_business_partner = config.client.fx_business_partner,
            "Session created"
        );

        Ok(Self {
            config,
            otk,
            builder,
            converter,
            selector,
            client: None,
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn otk(&self) -> &Otk {
        &self.otk
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    /// Default transfer options for this session's account.
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            initiated_to_non_l2: None,
            fx_business_partner: self.config.client.fx_business_partner,
        }
    }

    /// Node chosen by the last `connect`, if any.
    pub fn node(&self) -> Option<&AcNode> {
        self.client.as_ref().map(|c| c.node())
    }

    /// Race the candidate nodes and bind a client to the winner.
    pub async fn connect(&mut self) -> AkashicResult<AcNode> {
        let candidates = self.config.candidate_nodes();
        let node = self.selector.choose_healthy_node(&candidates).await?;
        let timeout = Duration::from_secs(self.config.client.request_timeout_secs);
        self.client = Some(LedgerClient::new(node.clone(), timeout)?);
        Ok(node)
    }

    /// Signed transfer of a decimal `amount` to L2 address `to`.
    ///
    /// FX business-partner sessions always request the co-signer input.
    pub fn prepare_transfer(
        &self,
        reference_id: &str,
        to: &str,
        amount: &str,
        network: NetworkSymbol,
        token: Option<TokenSymbol>,
        options: TransferOptions,
    ) -> AkashicResult<Envelope> {
        self.config.environment.ensure_supports(network)?;

        let request = TransferRequest {
            network,
            token: token.map(|t| t.ledger_token(network)),
            amount: self.converter.to_smallest_unit(amount, network, token)?,
            to: to.to_string(),
            reference_id: reference_id.to_string(),
            initiated_to_non_l2: options.initiated_to_non_l2,
            fx_business_partner: options.fx_business_partner || self.config.client.fx_business_partner,
        };

        self.builder.transfer(&self.otk, &request)?.sign(&self.otk)
    }

    /// Signed transfer to a resolved payout destination.
    ///
    /// Layer 1 destinations are settled off-ledger and yield `Ok(None)`.
    pub fn prepare_payout(
        &self,
        reference_id: &str,
        destination: &Destination,
        amount: &str,
        network: NetworkSymbol,
        token: Option<TokenSymbol>,
    ) -> AkashicResult<Option<Envelope>> {
        match destination {
            Destination::Layer2 {
                address,
                initiated_to_non_l2,
            } => {
                let options = TransferOptions {
                    initiated_to_non_l2: initiated_to_non_l2.clone(),
                    ..self.transfer_options()
                };
                self.prepare_transfer(reference_id, address, amount, network, token, options)
                    .map(Some)
            }
            Destination::Layer1 { address } => {
                tracing::debug!(to = %address, "Layer 1 payout, no ledger transfer built");
                Ok(None)
            }
        }
    }

    pub fn prepare_create_key(&self, network: NetworkSymbol) -> AkashicResult<Envelope> {
        self.builder.create_key(&self.otk, network)?.sign(&self.otk)
    }

    pub fn prepare_assign(&self, ledger_ids: &[String], identifier: &str) -> AkashicResult<Envelope> {
        self.builder
            .assign(&self.otk, ledger_ids, identifier)?
            .sign(&self.otk)
    }

    pub fn prepare_differential_consensus(&self, key: &CreatedKey, identifier: &str) -> AkashicResult<Envelope> {
        self.builder
            .differential_consensus(&self.otk, key, identifier)?
            .sign(&self.otk)
    }

    /// Submit a signed envelope, connecting first if needed.
    pub async fn submit<R: DeserializeOwned>(
        &mut self,
        envelope: &Envelope,
    ) -> AkashicResult<(String, LedgerResponse<R>)> {
        if self.client.is_none() {
            self.connect().await?;
        }
        match &self.client {
            Some(client) => client.submit(envelope).await,
            None => Err(AkashicError::NoHealthyNode),
        }
    }

    /// Check a callback body against its signature header with the configured secret.
    pub fn verify_callback(&self, callback: &str, signature: &str) -> AkashicResult<bool> {
        let secret = self.config.client.api_secret.as_deref().unwrap_or_default();
        verify_callback_signature(secret, callback, signature)
    }
}
