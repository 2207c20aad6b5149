//! Target networks.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local `near-sandbox`; the root account deploys and nothing is journaled.
    #[default]
    #[serde(alias = "localnet")]
    Sandbox,
    Testnet,
    Mainnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Sandbox => "sandbox",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        }
    }

    /// Whether deployments on this network outlive the process.
    pub fn is_persistent(&self) -> bool {
        !matches!(self, Network::Sandbox)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "localnet" => Ok(Network::Sandbox),
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            other => Err(Error::Config(format!(
                "unknown network {other:?}; expected sandbox, testnet or mainnet"
            ))),
        }
    }
}
