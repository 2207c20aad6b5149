//! Deployment configuration.
//!
//! Loaded from an optional `deploy.toml` (or the path given on the command
//! line) and `DEPLOY_*` environment variables. Nested keys use `__`, e.g.
//! `DEPLOY_NETWORKS__TESTNET__PARAMETERS__OWNER=ops.testnet`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::parameters::DeploymentParameters;
use crate::{Error, Network};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: Network,

    /// Credentials file of the deploying account (near-cli JSON format).
    /// Required on testnet and mainnet.
    #[serde(default)]
    pub deployer_credentials: Option<String>,

    #[serde(default = "defaults::deployments_dir")]
    pub deployments_dir: String,

    #[serde(default)]
    pub artifacts_dir: Option<String>,

    /// Balance each new contract subaccount is funded with.
    #[serde(default = "defaults::initial_balance_near")]
    pub initial_balance_near: u64,

    /// Per-network settings, keyed by network name.
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

/// Settings applied only when deploying to one network.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    /// Parameter defaults for every module on this network (e.g. `owner`).
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            deployer_credentials: None,
            deployments_dir: defaults::deployments_dir(),
            artifacts_dir: None,
            initial_balance_near: defaults::initial_balance_near(),
            networks: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load from `path` (or `deploy` in the working directory) plus `DEPLOY_*` env vars.
    pub fn load(path: Option<&str>) -> Result<Self, Error> {
        let file = match path {
            Some(p) => config::File::with_name(p).required(true),
            None => config::File::with_name("deploy").required(false),
        };
        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("DEPLOY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Network-level parameter defaults, as a `$global` section.
    pub fn network_parameters(&self) -> DeploymentParameters {
        let mut params = DeploymentParameters::new();
        if let Some(net) = self.networks.get(self.network.as_str()) {
            for (name, value) in &net.parameters {
                params.set_global(name, value.clone());
            }
        }
        params
    }

    pub fn require_credentials(&self) -> Result<&str, Error> {
        self.deployer_credentials.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "deployer_credentials must be set to deploy on {}",
                self.network
            ))
        })
    }
}

mod defaults {
    pub fn deployments_dir() -> String {
        "./deployments".into()
    }

    pub fn initial_balance_near() -> u64 {
        5
    }
}
