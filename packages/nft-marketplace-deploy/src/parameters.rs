//! Deployment parameters.
//!
//! Parameters are keyed by module id, then by parameter name. The reserved
//! `$global` section applies to every module. A parameters file looks like:
//!
//! ```json
//! {
//!   "$global": { "owner": "ops.testnet" },
//!   "NftMarketplaceModule": { "owner": "market-owner.testnet" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use near_workspaces::AccountId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::module::{Parameter, ParameterKind};
use crate::Error;

pub const GLOBAL_SECTION: &str = "$global";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentParameters(BTreeMap<String, BTreeMap<String, Value>>);

impl DeploymentParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Parameter(format!("cannot read parameters file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::Parameter(format!("invalid parameters json in {}: {e}", path.display()))
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw)
            .map_err(|e| Error::Parameter(format!("invalid parameters json: {e}")))
    }

    pub fn set(&mut self, module_id: &str, name: &str, value: impl Into<Value>) {
        self.0
            .entry(module_id.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }

    pub fn set_global(&mut self, name: &str, value: impl Into<Value>) {
        self.set(GLOBAL_SECTION, name, value);
    }

    pub fn get(&self, module_id: &str, name: &str) -> Option<&Value> {
        self.0.get(module_id).and_then(|m| m.get(name))
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: &DeploymentParameters) {
        for (module_id, values) in &other.0 {
            let section = self.0.entry(module_id.clone()).or_default();
            for (name, value) in values {
                section.insert(name.clone(), value.clone());
            }
        }
    }

    /// Resolve a parameter: module section, then `$global`, then the literal default.
    pub fn resolve(&self, parameter: &Parameter) -> Result<Value, Error> {
        let value = self
            .get(&parameter.module_id, &parameter.name)
            .or_else(|| self.get(GLOBAL_SECTION, &parameter.name))
            .unwrap_or(&parameter.default)
            .clone();

        let unset = match &value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        };
        if unset {
            return Err(Error::Parameter(format!(
                "{}/{} has no value; set it in the parameters file or the network config",
                parameter.module_id, parameter.name
            )));
        }

        if parameter.kind == ParameterKind::AccountId {
            parse_account_id(parameter, &value)?;
        }
        Ok(value)
    }
}

fn parse_account_id(parameter: &Parameter, value: &Value) -> Result<AccountId, Error> {
    let raw = value.as_str().ok_or_else(|| {
        Error::Parameter(format!(
            "{}/{} must be an account id string, got {value}",
            parameter.module_id, parameter.name
        ))
    })?;
    raw.parse::<AccountId>().map_err(|e| {
        Error::Parameter(format!(
            "{}/{} is not a valid account id ({raw}): {e}",
            parameter.module_id, parameter.name
        ))
    })
}
