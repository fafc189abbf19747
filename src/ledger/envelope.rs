//! Transaction envelope wire types.
//!
//! Field order and omission rules here define the canonical bytes that get
//! signed, so they must stay in lockstep with what the ledger re-serializes.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::ledger::types::{AkashicError, AkashicResult};

/// Default validity window of a transaction.
pub const DEFAULT_EXPIRE_SECS: i64 = 60;

/// Inner transaction object (`$tx`). This is what gets signed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TxObject {
    #[serde(rename = "$namespace")]
    pub namespace: String,

    #[serde(rename = "$contract")]
    pub contract: String,

    #[serde(rename = "$entry", default, skip_serializing_if = "is_blank")]
    pub entry: Option<String>,

    #[serde(rename = "$i")]
    pub input: Map<String, Value>,

    #[serde(rename = "$o", default, skip_serializing_if = "Map::is_empty")]
    pub output: Map<String, Value>,

    #[serde(rename = "$r", default, skip_serializing_if = "Map::is_empty")]
    pub read_only: Map<String, Value>,

    #[serde(rename = "_dbIndex", default, skip_serializing_if = "is_zero")]
    pub db_index: u32,

    #[serde(rename = "$expire", default, skip_serializing_if = "is_blank")]
    pub expire: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl TxObject {
    pub fn new(namespace: &str, contract: &str, db_index: u32) -> Self {
        Self {
            namespace: namespace.to_string(),
            contract: contract.to_string(),
            entry: None,
            input: Map::new(),
            output: Map::new(),
            read_only: Map::new(),
            db_index,
            expire: None,
            metadata: Map::new(),
        }
    }

    /// Set `$expire` to `now + window` unless one is already present.
    ///
    /// The window must be positive and `now + window` representable.
    pub fn set_expire_if_absent(&mut self, now: DateTime<Utc>, window: Duration) -> AkashicResult<()> {
        if !is_blank(&self.expire) {
            return Ok(());
        }
        if window <= Duration::zero() {
            return Err(AkashicError::InvalidConfig(format!(
                "expire window must be positive, got {}s",
                window.num_seconds()
            )));
        }
        let expire = now.checked_add_signed(window).ok_or_else(|| {
            AkashicError::InvalidConfig(format!("expire window of {}s is out of range", window.num_seconds()))
        })?;
        self.expire = Some(expire.to_rfc3339_opts(SecondsFormat::Secs, true));
        Ok(())
    }

    /// Canonical bytes: compact JSON, struct field order, sorted map keys.
    pub fn canonical_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Signed wrapper submitted to a node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope {
    #[serde(rename = "$tx")]
    pub tx: TxObject,

    #[serde(rename = "$selfsign", default)]
    pub self_sign: bool,

    #[serde(rename = "$sigs", default)]
    pub signatures: BTreeMap<String, String>,

    #[serde(rename = "$unanimous", default, skip_serializing_if = "std::ops::Not::not")]
    pub unanimous: bool,
}

impl Envelope {
    pub fn new(tx: TxObject) -> Self {
        Self {
            tx,
            self_sign: false,
            signatures: BTreeMap::new(),
            unanimous: false,
        }
    }

    pub fn signature(&self, identity: &str) -> Option<&str> {
        self.signatures.get(identity).map(String::as_str)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}
