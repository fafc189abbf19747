//! Environment, network and token identifiers.
//!
//! The SDK spells networks the way callers know them (`TRX-SHASTA`), while
//! the ledger tags keys with its own symbol/network pair (`trx`/`shasta`).
//! Both spellings live here so the translation is in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ledger::types::{AkashicError, AkashicResult};

/// Ledger environment the SDK talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Reject networks that belong to the other environment.
    pub fn ensure_supports(self, network: NetworkSymbol) -> AkashicResult<()> {
        if network.is_testnet() == self.is_production() {
            return Err(AkashicError::NetworkEnvironmentMismatch {
                network,
                environment: self,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" | "mainnet" => Ok(Environment::Production),
            "development" | "dev" | "testnet" => Ok(Environment::Development),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// L1 networks supported by the payment network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum NetworkSymbol {
    #[serde(rename = "ETH")]
    Ethereum,
    #[serde(rename = "SEP")]
    EthereumSepolia,
    #[serde(rename = "TRX")]
    Tron,
    #[serde(rename = "TRX-SHASTA")]
    TronShasta,
}

impl NetworkSymbol {
    pub const ALL: [NetworkSymbol; 4] = [
        NetworkSymbol::Ethereum,
        NetworkSymbol::EthereumSepolia,
        NetworkSymbol::Tron,
        NetworkSymbol::TronShasta,
    ];

    /// SDK spelling, as sent in transfer inputs.
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkSymbol::Ethereum => "ETH",
            NetworkSymbol::EthereumSepolia => "SEP",
            NetworkSymbol::Tron => "TRX",
            NetworkSymbol::TronShasta => "TRX-SHASTA",
        }
    }

    pub fn is_testnet(self) -> bool {
        matches!(self, NetworkSymbol::EthereumSepolia | NetworkSymbol::TronShasta)
    }

    pub fn is_tron(self) -> bool {
        matches!(self, NetworkSymbol::Tron | NetworkSymbol::TronShasta)
    }

    /// Ledger-native `(symbol, network)` pair used when creating keys.
    pub fn ledger_names(self) -> (&'static str, &'static str) {
        match self {
            NetworkSymbol::Ethereum => ("eth", "eth"),
            NetworkSymbol::EthereumSepolia => ("eth", "sepolia"),
            NetworkSymbol::Tron => ("trx", "trx"),
            NetworkSymbol::TronShasta => ("trx", "shasta"),
        }
    }
}

impl fmt::Display for NetworkSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkSymbol::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown network '{}'", s))
    }
}

/// Tokens known to the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum TokenSymbol {
    #[serde(rename = "USDT")]
    Usdt,
    #[serde(rename = "USDC")]
    Usdc,
    /// Ledger-side name of USDT on Tron.
    #[serde(rename = "Tether")]
    Tether,
}

impl TokenSymbol {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenSymbol::Usdt => "USDT",
            TokenSymbol::Usdc => "USDC",
            TokenSymbol::Tether => "Tether",
        }
    }

    /// Token name as the ledger knows it on `network`.
    pub fn ledger_token(self, network: NetworkSymbol) -> TokenSymbol {
        match self {
            TokenSymbol::Usdt if network.is_tron() => TokenSymbol::Tether,
            other => other,
        }
    }
}

impl fmt::Display for TokenSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [TokenSymbol::Usdt, TokenSymbol::Usdc, TokenSymbol::Tether]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown token '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_names() {
        assert_eq!(NetworkSymbol::Tron.ledger_names(), ("trx", "trx"));
        assert_eq!(NetworkSymbol::TronShasta.ledger_names(), ("trx", "shasta"));
        assert_eq!(NetworkSymbol::EthereumSepolia.ledger_names(), ("eth", "sepolia"));
    }

    #[test]
    fn test_network_serde_spelling() {
        let json = serde_json::to_string(&NetworkSymbol::TronShasta).unwrap();
        assert_eq!(json, "\"TRX-SHASTA\"");
        let parsed: NetworkSymbol = "trx-shasta".parse().unwrap();
        assert_eq!(parsed, NetworkSymbol::TronShasta);
        assert!("DOGE".parse::<NetworkSymbol>().is_err());
    }

    #[test]
    fn test_environment_guard() {
        assert!(Environment::Development.ensure_supports(NetworkSymbol::TronShasta).is_ok());
        assert!(Environment::Production.ensure_supports(NetworkSymbol::Ethereum).is_ok());

        let err = Environment::Development
            .ensure_supports(NetworkSymbol::Tron)
            .unwrap_err();
        assert!(matches!(err, AkashicError::NetworkEnvironmentMismatch { .. }));
        assert!(Environment::Production
            .ensure_supports(NetworkSymbol::EthereumSepolia)
            .is_err());
    }

    #[test]
    fn test_usdt_maps_to_tether_on_tron_only() {
        assert_eq!(TokenSymbol::Usdt.ledger_token(NetworkSymbol::Tron), TokenSymbol::Tether);
        assert_eq!(TokenSymbol::Usdt.ledger_token(NetworkSymbol::TronShasta), TokenSymbol::Tether);
        assert_eq!(TokenSymbol::Usdt.ledger_token(NetworkSymbol::Ethereum), TokenSymbol::Usdt);
    }
}
