//! The fixed chain registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// A chain the bridge can move tokens between. The set is fixed at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainId {
    ZamaDevnet,
    Ethereum,
    Sepolia,
    BaseSepolia,
    ArbitrumSepolia,
}

impl ChainId {
    /// Every registered chain, in display order.
    pub const ALL: [ChainId; 5] = [
        Self::ZamaDevnet,
        Self::Ethereum,
        Self::Sepolia,
        Self::BaseSepolia,
        Self::ArbitrumSepolia,
    ];

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZamaDevnet => "zama-devnet",
            Self::Ethereum => "ethereum",
            Self::Sepolia => "sepolia",
            Self::BaseSepolia => "base-sepolia",
            Self::ArbitrumSepolia => "arbitrum-sepolia",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ZamaDevnet => "Zama Devnet",
            Self::Ethereum => "Ethereum Mainnet",
            Self::Sepolia => "Sepolia Testnet",
            Self::BaseSepolia => "Base Sepolia",
            Self::ArbitrumSepolia => "Arbitrum Sepolia",
        }
    }

    /// The registry as `{id, name}` pairs.
    pub fn registry() -> Vec<ChainInfo> {
        Self::ALL.iter().map(|c| ChainInfo::from(*c)).collect()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseError::UnknownChain(s.to_string()))
    }
}

/// A registry entry as rendered to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainInfo {
    pub id: ChainId,
    pub name: &'static str,
}

impl From<ChainId> for ChainInfo {
    fn from(id: ChainId) -> Self {
        Self {
            id,
            name: id.display_name(),
        }
    }
}
