//! Module builder.
//!
//! A [`Module`] is a named, declarative list of contract instantiations. It is
//! pure data: nothing touches the network until an
//! [`Executor`](crate::Executor) runs it.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::Error;

/// Initializer called on every freshly deployed contract.
pub const DEFAULT_INIT_METHOD: &str = "new";

/// How a parameter value is checked once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Any non-null JSON value.
    Any,
    /// A string that parses as a NEAR account id.
    AccountId,
}

/// A named runtime value, resolved from [`DeploymentParameters`](crate::DeploymentParameters)
/// with a literal fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub module_id: String,
    pub name: String,
    pub default: Value,
    pub kind: ParameterKind,
}

/// A single initializer argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Literal(Value),
    Parameter(Parameter),
    /// Account id of a contract deployed earlier in the same module.
    Contract(ContractFuture),
}

impl From<Parameter> for Argument {
    fn from(parameter: Parameter) -> Self {
        Argument::Parameter(parameter)
    }
}

impl From<ContractFuture> for Argument {
    fn from(future: ContractFuture) -> Self {
        Argument::Contract(future)
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Literal(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Literal(Value::String(value.to_string()))
    }
}

/// Request to deploy one contract and call its initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractFuture {
    /// `<ModuleId>#<contract_name>`, unique within a module.
    pub id: String,
    pub contract_name: String,
    pub init_method: String,
    pub args: Vec<(String, Argument)>,
}

impl ContractFuture {
    /// Subaccount prefix the contract is deployed under.
    pub fn account_prefix(&self) -> String {
        account_prefix(&self.contract_name)
    }
}

/// Subaccount prefix for a contract name: `nft_marketplace` deploys under
/// `nft-marketplace.<deployer>`.
pub fn account_prefix(contract_name: &str) -> String {
    contract_name.replace('_', "-")
}

/// Collects parameters and contract futures while a module's setup callback runs.
#[derive(Debug)]
pub struct ModuleBuilder {
    module_id: String,
    futures: Vec<ContractFuture>,
}

impl ModuleBuilder {
    fn new(module_id: &str) -> Self {
        Self {
            module_id: module_id.to_string(),
            futures: Vec::new(),
        }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn get_parameter(&mut self, name: &str, default: impl Into<Value>) -> Parameter {
        self.parameter(name, default.into(), ParameterKind::Any)
    }

    /// Like [`get_parameter`](Self::get_parameter), but the resolved value must be an account id.
    pub fn get_account_parameter(&mut self, name: &str, default: &str) -> Parameter {
        self.parameter(
            name,
            Value::String(default.to_string()),
            ParameterKind::AccountId,
        )
    }

    fn parameter(&self, name: &str, default: Value, kind: ParameterKind) -> Parameter {
        Parameter {
            module_id: self.module_id.clone(),
            name: name.to_string(),
            default,
            kind,
        }
    }

    pub fn contract<K, A>(
        &mut self,
        contract_name: &str,
        args: impl IntoIterator<Item = (K, A)>,
    ) -> ContractFuture
    where
        K: Into<String>,
        A: Into<Argument>,
    {
        self.contract_with_init(contract_name, DEFAULT_INIT_METHOD, args)
    }

    pub fn contract_with_init<K, A>(
        &mut self,
        contract_name: &str,
        init_method: &str,
        args: impl IntoIterator<Item = (K, A)>,
    ) -> ContractFuture
    where
        K: Into<String>,
        A: Into<Argument>,
    {
        let future = ContractFuture {
            id: format!("{}#{}", self.module_id, contract_name),
            contract_name: contract_name.to_string(),
            init_method: init_method.to_string(),
            args: args
                .into_iter()
                .map(|(name, arg)| (name.into(), arg.into()))
                .collect(),
        };
        self.futures.push(future.clone());
        future
    }
}

/// A validated deployment module.
#[derive(Debug, Clone)]
pub struct Module {
    id: String,
    futures: Vec<ContractFuture>,
    results: BTreeMap<String, ContractFuture>,
}

impl Module {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Contract futures in declaration order.
    pub fn futures(&self) -> &[ContractFuture] {
        &self.futures
    }

    /// Exported handles keyed by export name.
    pub fn results(&self) -> &BTreeMap<String, ContractFuture> {
        &self.results
    }

    pub fn result(&self, key: &str) -> Option<&ContractFuture> {
        self.results.get(key)
    }

    /// Every parameter referenced by any future, in declaration order.
    pub fn parameters(&self) -> Vec<&Parameter> {
        self.futures
            .iter()
            .flat_map(|f| f.args.iter())
            .filter_map(|(_, arg)| match arg {
                Argument::Parameter(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

/// Define a deployment module.
///
/// `setup` declares parameters and contracts on the builder and returns the
/// futures to export, keyed by name.
pub fn build_module<F, R, K>(id: &str, setup: F) -> Result<Module, Error>
where
    F: FnOnce(&mut ModuleBuilder) -> R,
    R: IntoIterator<Item = (K, ContractFuture)>,
    K: Into<String>,
{
    if id.trim().is_empty() {
        return Err(Error::Module("module id must not be empty".into()));
    }

    let mut builder = ModuleBuilder::new(id);
    let exported = setup(&mut builder);

    let mut seen = HashSet::new();
    for future in &builder.futures {
        validate_contract_name(&future.contract_name)?;
        if !seen.insert(future.id.as_str()) {
            return Err(Error::Module(format!(
                "duplicate future id {}; each contract may be requested once per module",
                future.id
            )));
        }
        for (_, arg) in &future.args {
            if let Argument::Contract(dep) = arg {
                // Dependencies must be declared before their dependents.
                if !seen.contains(dep.id.as_str()) || dep.id == future.id {
                    return Err(Error::Module(format!(
                        "{} depends on {} which is not declared before it",
                        future.id, dep.id
                    )));
                }
            }
        }
    }

    let mut results = BTreeMap::new();
    for (key, future) in exported {
        let key = key.into();
        if !seen.contains(future.id.as_str()) {
            return Err(Error::Module(format!(
                "export {key} refers to {} which was not declared in {id}",
                future.id
            )));
        }
        if results.insert(key.clone(), future).is_some() {
            return Err(Error::Module(format!("duplicate export {key}")));
        }
    }

    Ok(Module {
        id: id.to_string(),
        futures: builder.futures,
        results,
    })
}

fn validate_contract_name(name: &str) -> Result<(), Error> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !valid {
        return Err(Error::Module(format!(
            "invalid contract name {name:?}: use lowercase letters, digits, '_' or '-'"
        )));
    }
    Ok(())
}
