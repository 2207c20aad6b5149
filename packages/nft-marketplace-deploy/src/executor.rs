//! Module execution.

use std::collections::BTreeMap;
use std::path::PathBuf;

use near_workspaces::operations::Function;
use near_workspaces::types::{Gas, NearToken};
use near_workspaces::{Account, AccountId};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::module::{Argument, ContractFuture, Module};
use crate::{ArtifactResolver, Config, DeploymentParameters, Error, Journal, Network};

const DEFAULT_INITIAL_BALANCE: NearToken = NearToken::from_near(5);
const INIT_GAS: Gas = Gas::from_tgas(100);

/// Accounts a module was deployed to.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentResult {
    pub module_id: String,
    /// Future id → contract account.
    pub deployed: BTreeMap<String, AccountId>,
    exports: BTreeMap<String, String>,
}

impl DeploymentResult {
    /// Account of an exported contract, by export name.
    pub fn address(&self, export: &str) -> Option<&AccountId> {
        self.exports
            .get(export)
            .and_then(|future_id| self.deployed.get(future_id))
    }

    /// Export name → account, for every export of the module.
    pub fn addresses(&self) -> BTreeMap<&str, &AccountId> {
        self.exports
            .keys()
            .filter_map(|key| self.address(key).map(|id| (key.as_str(), id)))
            .collect()
    }
}

/// Runs modules on behalf of one deploying account.
pub struct Executor {
    deployer: Account,
    parameters: DeploymentParameters,
    artifacts: ArtifactResolver,
    journal: Journal,
    initial_balance: NearToken,
}

impl Executor {
    pub fn new(deployer: Account) -> Self {
        Self {
            deployer,
            parameters: DeploymentParameters::new(),
            artifacts: ArtifactResolver::default(),
            journal: Journal::ephemeral(),
            initial_balance: DEFAULT_INITIAL_BALANCE,
        }
    }

    pub fn with_parameters(mut self, parameters: DeploymentParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_artifacts(mut self, artifacts: ArtifactResolver) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_initial_balance(mut self, balance: NearToken) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn deployer(&self) -> &Account {
        &self.deployer
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Deploy every future of `module` not already in the journal.
    ///
    /// All parameters are resolved before the first transaction is sent.
    pub async fn run(&mut self, module: &Module) -> Result<DeploymentResult, Error> {
        for parameter in module.parameters() {
            self.parameters.resolve(parameter)?;
        }

        info!(module = module.id(), deployer = %self.deployer.id(), "Deploying module");

        let mut deployed = BTreeMap::new();
        for future in module.futures() {
            let args = self.resolve_args(future, &deployed)?;
            if let Some(account_id) = self.journal.reconcile(&future.id, &args)? {
                info!(future = %future.id, account = %account_id, "Already deployed, skipping");
                deployed.insert(future.id.clone(), account_id.clone());
                continue;
            }

            let account_id = self.deploy_future(future, &args).await?;
            self.journal.record(&future.id, account_id.clone(), args)?;
            deployed.insert(future.id.clone(), account_id);
        }

        let exports = module
            .results()
            .iter()
            .map(|(key, future)| (key.clone(), future.id.clone()))
            .collect();

        Ok(DeploymentResult {
            module_id: module.id().to_string(),
            deployed,
            exports,
        })
    }

    /// Build the initializer's JSON arguments.
    pub fn resolve_args(
        &self,
        future: &ContractFuture,
        deployed: &BTreeMap<String, AccountId>,
    ) -> Result<Value, Error> {
        let mut args = Map::new();
        for (name, arg) in &future.args {
            let value = match arg {
                Argument::Literal(value) => value.clone(),
                Argument::Parameter(parameter) => self.parameters.resolve(parameter)?,
                Argument::Contract(dep) => {
                    let account_id = deployed.get(&dep.id).ok_or_else(|| {
                        Error::Deploy(format!(
                            "{} needs {} which has not been deployed",
                            future.id, dep.id
                        ))
                    })?;
                    Value::String(account_id.to_string())
                }
            };
            args.insert(name.clone(), value);
        }
        Ok(Value::Object(args))
    }

    async fn deploy_future(&self, future: &ContractFuture, args: &Value) -> Result<AccountId, Error> {
        let wasm = self.artifacts.read(&future.contract_name)?;
        let prefix = future.account_prefix();

        info!(
            future = %future.id,
            account = %format!("{prefix}.{}", self.deployer.id()),
            wasm_bytes = wasm.len(),
            "Creating contract account"
        );
        let account = self
            .deployer
            .create_subaccount(&prefix)
            .initial_balance(self.initial_balance)
            .transact()
            .await
            .map_err(|e| Error::Deploy(format!("{}: create account {prefix}: {e}", future.id)))?
            .into_result()
            .map_err(|e| Error::Deploy(format!("{}: create account {prefix}: {e}", future.id)))?;

        deploy_and_init(&account, &wasm, &future.init_method, args)
            .await
            .map_err(|e| {
                warn!(future = %future.id, args = %args, "Deploy and initialize failed");
                match e {
                    Error::Deploy(msg) => Error::Deploy(format!("{}: {msg}", future.id)),
                    other => other,
                }
            })?;

        info!(future = %future.id, account = %account.id(), "Contract deployed");
        Ok(account.id().clone())
    }
}

/// Deploy `wasm` to `account` and call `init_method` in the same batch
/// transaction, signed by the contract account itself.
///
/// No other account can observe deployed but uninitialized code, and if the
/// initializer fails the code deployment is reverted with it.
pub async fn deploy_and_init(
    account: &Account,
    wasm: &[u8],
    init_method: &str,
    args: &Value,
) -> Result<(), Error> {
    account
        .batch(account.id())
        .deploy(wasm)
        .call(Function::new(init_method).args_json(args).gas(INIT_GAS))
        .transact()
        .await
        .map_err(|e| Error::Deploy(format!("deploy and {init_method} on {}: {e}", account.id())))?
        .into_result()
        .map_err(|e| Error::Deploy(format!("{init_method} on {} failed: {e}", account.id())))?;
    Ok(())
}

/// Deploy `module` to the network selected in `config`.
///
/// `overrides` (usually a parameters file) take precedence over the
/// network-level defaults from `config`.
pub async fn deploy(
    config: &Config,
    module: &Module,
    overrides: &DeploymentParameters,
) -> Result<DeploymentResult, Error> {
    let mut parameters = config.network_parameters();
    parameters.merge(overrides);
    let artifacts = ArtifactResolver::new(config.artifacts_dir.as_ref().map(PathBuf::from));
    let balance = NearToken::from_near(u128::from(config.initial_balance_near));

    let journal = if config.network.is_persistent() {
        Journal::open(&config.deployments_dir, config.network.as_str())?
    } else {
        Journal::ephemeral()
    };

    // Each arm keeps its worker alive until the module has been executed.
    match config.network {
        Network::Sandbox => {
            let worker = near_workspaces::sandbox()
                .await
                .map_err(|e| Error::Deploy(format!("sandbox: {e}")))?;
            let deployer = worker
                .root_account()
                .map_err(|e| Error::Deploy(format!("sandbox root account: {e}")))?;
            executor(deployer, parameters, artifacts, journal, balance)
                .run(module)
                .await
        }
        Network::Testnet => {
            let worker = near_workspaces::testnet()
                .await
                .map_err(|e| Error::Deploy(format!("testnet: {e}")))?;
            let deployer = Account::from_file(config.require_credentials()?, &worker)
                .map_err(|e| Error::Config(format!("deployer credentials: {e}")))?;
            executor(deployer, parameters, artifacts, journal, balance)
                .run(module)
                .await
        }
        Network::Mainnet => {
            let worker = near_workspaces::mainnet()
                .await
                .map_err(|e| Error::Deploy(format!("mainnet: {e}")))?;
            let deployer = Account::from_file(config.require_credentials()?, &worker)
                .map_err(|e| Error::Config(format!("deployer credentials: {e}")))?;
            executor(deployer, parameters, artifacts, journal, balance)
                .run(module)
                .await
        }
    }
}

fn executor(
    deployer: Account,
    parameters: DeploymentParameters,
    artifacts: ArtifactResolver,
    journal: Journal,
    balance: NearToken,
) -> Executor {
    Executor::new(deployer)
        .with_parameters(parameters)
        .with_artifacts(artifacts)
        .with_journal(journal)
        .with_initial_balance(balance)
}
