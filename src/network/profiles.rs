//! Per-network address formats and decimal tables.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::ledger::types::{AkashicError, AkashicResult};
use crate::network::symbols::{NetworkSymbol, TokenSymbol};

const EVM_ADDRESS_PATTERN: &str = r"^0x[A-Fa-f0-9]{40}$";
const TRON_ADDRESS_PATTERN: &str = r"^T[A-Za-z1-9]{33}$";

/// A token deployed on an L1 network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenProfile {
    pub symbol: TokenSymbol,
    pub decimal_places: u32,
    pub contract_address: String,
}

/// Static description of an L1 network.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub address_regex: Regex,
    pub native_decimal_places: u32,
    pub tokens: Vec<TokenProfile>,
}

impl NetworkProfile {
    pub fn new(address_pattern: &str, native_decimal_places: u32, tokens: Vec<TokenProfile>) -> AkashicResult<Self> {
        let address_regex = Regex::new(address_pattern)
            .map_err(|e| AkashicError::InvalidConfig(format!("bad address pattern: {}", e)))?;
        Ok(Self {
            address_regex,
            native_decimal_places,
            tokens,
        })
    }

    pub fn token(&self, symbol: TokenSymbol) -> Option<&TokenProfile> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn is_l1_address(&self, address: &str) -> bool {
        self.address_regex.is_match(address)
    }
}

fn usdt(decimal_places: u32, contract_address: &str) -> TokenProfile {
    TokenProfile {
        symbol: TokenSymbol::Usdt,
        decimal_places,
        contract_address: contract_address.to_string(),
    }
}

static BUILTIN: Lazy<Arc<NetworkRegistry>> = Lazy::new(|| {
    let evm = Regex::new(EVM_ADDRESS_PATTERN).expect("static EVM address pattern");
    let tron = Regex::new(TRON_ADDRESS_PATTERN).expect("static Tron address pattern");

    let mut profiles = HashMap::new();
    profiles.insert(
        NetworkSymbol::Ethereum,
        NetworkProfile {
            address_regex: evm.clone(),
            native_decimal_places: 18,
            tokens: vec![usdt(6, "0xdac17f958d2ee523a2206206994597c13d831ec7")],
        },
    );
    profiles.insert(
        NetworkSymbol::EthereumSepolia,
        NetworkProfile {
            address_regex: evm,
            native_decimal_places: 18,
            tokens: vec![usdt(6, "0xa62be7ec09f56a813f654a9ac1aa6d29d96f604e")],
        },
    );
    profiles.insert(
        NetworkSymbol::Tron,
        NetworkProfile {
            address_regex: tron.clone(),
            native_decimal_places: 6,
            tokens: vec![usdt(6, "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t")],
        },
    );
    profiles.insert(
        NetworkSymbol::TronShasta,
        NetworkProfile {
            address_regex: tron,
            native_decimal_places: 6,
            tokens: vec![usdt(6, "TG3XXyExBkPp9nzdajDZsozEu4BkaSJozs")],
        },
    );
    Arc::new(NetworkRegistry { profiles })
});

/// Lookup table from network symbol to [`NetworkProfile`].
///
/// Read-only after construction. Use [`NetworkRegistry::builtin`] for the
/// shipped table or [`NetworkRegistry::new`] to inject a custom one.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    profiles: HashMap<NetworkSymbol, NetworkProfile>,
}

impl NetworkRegistry {
    pub fn new(profiles: HashMap<NetworkSymbol, NetworkProfile>) -> Self {
        Self { profiles }
    }

    pub fn builtin() -> Arc<NetworkRegistry> {
        BUILTIN.clone()
    }

    pub fn profile(&self, network: NetworkSymbol) -> AkashicResult<&NetworkProfile> {
        self.profiles
            .get(&network)
            .ok_or(AkashicError::UnsupportedAsset { network, token: None })
    }

    /// Decimal places of the native coin (`token == None`) or of a token.
    pub fn decimal_places(&self, network: NetworkSymbol, token: Option<TokenSymbol>) -> AkashicResult<u32> {
        let profile = self.profile(network)?;
        match token {
            None => Ok(profile.native_decimal_places),
            Some(symbol) => profile
                .token(symbol)
                .map(|t| t.decimal_places)
                .ok_or(AkashicError::UnsupportedAsset { network, token: Some(symbol) }),
        }
    }
}
