//! Payout destination resolution.
//!
//! A payout target may be an L1 address, an L2 address or an alias. The
//! indexer tells us which L2 address (if any) stands behind it; this module
//! decides where the transfer actually goes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ledger::types::{AkashicError, AkashicResult};
use crate::network::profiles::NetworkProfile;

/// L2 address with optional `AS` prefix.
static L2_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(AS)?[A-Fa-f0-9]{64}$").expect("static L2 address pattern"));

/// Indexer answer to "which L2 address is behind this target".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L2Lookup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl L2Lookup {
    fn l2(&self) -> Option<&str> {
        self.l2_address.as_deref().filter(|a| !a.is_empty())
    }
}

/// Where a payout is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Ledger-internal transfer.
    Layer2 {
        address: String,
        /// Original target when it was an L1 address or alias.
        initiated_to_non_l2: Option<String>,
    },
    /// Plain L1 withdrawal, handled outside the core.
    Layer1 { address: String },
}

pub fn is_l2_address(address: &str) -> bool {
    L2_ADDRESS.is_match(address)
}

/// Resolve `to` against the indexer lookup for its network.
pub fn resolve_destination(to: &str, profile: &NetworkProfile, lookup: &L2Lookup) -> AkashicResult<Destination> {
    if to.is_empty() {
        return Err(AkashicError::MissingField("to"));
    }

    if profile.is_l1_address(to) {
        return Ok(match lookup.l2() {
            Some(l2) => Destination::Layer2 {
                address: l2.to_string(),
                initiated_to_non_l2: Some(to.to_string()),
            },
            None => Destination::Layer1 {
                address: to.to_string(),
            },
        });
    }

    let l2 = lookup.l2().ok_or(AkashicError::AddressNotFound)?;

    if is_l2_address(to) {
        Ok(Destination::Layer2 {
            address: to.to_string(),
            initiated_to_non_l2: None,
        })
    } else {
        // alias
        Ok(Destination::Layer2 {
            address: l2.to_string(),
            initiated_to_non_l2: Some(to.to_string()),
        })
    }
}
