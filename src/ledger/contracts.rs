//! On-chain contract identifiers per environment.

use serde::{Deserialize, Serialize};

use crate::network::symbols::Environment;

/// Namespace every SDK contract lives in.
pub const LEDGER_NAMESPACE: &str = "akashicchain";

/// Token value used for transfers of the network's native coin.
pub const NATIVE_COIN: &str = "#native";

/// Contract ids and shard index for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractAddressSet {
    pub namespace: String,
    pub create: String,
    pub transfer: String,
    pub assign: String,
    pub differential_consensus: String,
    /// Stream that co-signs FX business-partner transfers. Not a contract.
    pub fx_multi_signer: String,
    pub db_index: u32,
}

impl ContractAddressSet {
    pub fn production() -> Self {
        Self {
            namespace: LEDGER_NAMESPACE.to_string(),
            create: "50e1372f0d3805dac4a51299bb0e99960862d7d01f247e85725d99011682b8ac@1".to_string(),
            transfer: "2bae6ea681826c0307ee047ef68eb0cf53487a257c498de7d081d66de119d666@1".to_string(),
            assign: "7afea15e8028af9f5aeafb6db6c0d2e8969c0c0492360ab15a6bc3754b818e19@1".to_string(),
            differential_consensus: "94479927cbe0860a3f51cbd36230faef7d1b69974323a83c8abcc78e3d0e8dd9@1"
                .to_string(),
            fx_multi_signer: "ASad1414566948845b404e8b6ac91639cc3643129d0ef8b7828ede7a0ac1044d6e".to_string(),
            db_index: 0,
        }
    }

    pub fn testnet() -> Self {
        Self {
            namespace: LEDGER_NAMESPACE.to_string(),
            create: "ad171259a7c628ba6993c6bd555f07111525128194aa4226662e48a0b0a93116@1".to_string(),
            transfer: "a32a8bc21ceaeeaa671573126a246c15ec4dc3a5c825e3cffc9441636019acb1@1".to_string(),
            assign: "a6e95e2f563bdac69bfa265b1c215bf2125e1c50048f68f9c0b52982e320d675@1".to_string(),
            differential_consensus: "17be1db84dbf81c1ff1b2f5aebd4ba4e95d81338daf98d7c2bc7b54ad8994d1c@1"
                .to_string(),
            fx_multi_signer: "ASeffcb8790aff2439522ef4bd834cca5233dc1670e5fa1c93fa19305323937a17".to_string(),
            db_index: 15,
        }
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::testnet(),
        }
    }
}
