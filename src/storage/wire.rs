//! Wire types for the Bundlr node's REST API.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Response from `GET /account/balance/{currency}?address=…`.
///
/// The node serializes the balance as a decimal string (it is a BigNumber
/// on the node side); older deployments send a bare number.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub balance: u64,
}

/// Response from `GET /info`.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub version: Option<String>,
    /// Per-currency deposit addresses; funding transfers go to
    /// `addresses["solana"]`.
    #[serde(default)]
    pub addresses: HashMap<String, String>,
    #[serde(default)]
    pub gateway: Option<String>,
}

/// Response from `POST /tx/{currency}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    /// The data item id; must match the locally computed one.
    pub id: String,
    #[serde(default)]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub block: Option<u64>,
    #[serde(default)]
    pub public: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl serde::de::Visitor<'_> for Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("an unsigned integer or a decimal string")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<u64, E> {
            v.parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(Visitor)
}
