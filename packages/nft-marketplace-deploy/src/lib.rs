//! # NftMarketplace deployment
//!
//! Declarative deployment modules for the NftMarketplace contract, executed
//! against a NEAR network through `near-workspaces`.
//!
//! A module is built once with [`build_module`]: the setup callback resolves
//! named parameters and requests contract instantiations, and returns the
//! handles it wants to export. [`Executor`] then walks the module in
//! declaration order, creating one subaccount per contract, deploying its
//! wasm and calling its initializer.
//!
//! ## Quick Start
//! ```bash
//! cargo run --bin deploy -- --network sandbox
//! DEPLOY_NETWORK=testnet cargo run --bin deploy -- --parameters params.json
//! ```

pub mod artifacts;
pub mod config;
mod error;
pub mod executor;
pub mod journal;
pub mod module;
pub mod modules;
pub mod network;
pub mod parameters;

pub use artifacts::ArtifactResolver;
pub use config::Config;
pub use error::Error;
pub use executor::{deploy, deploy_and_init, DeploymentResult, Executor};
pub use journal::{Journal, JournalEntry};
pub use module::{
    account_prefix, build_module, Argument, ContractFuture, Module, ModuleBuilder, Parameter,
    DEFAULT_INIT_METHOD,
};
pub use network::Network;
pub use parameters::DeploymentParameters;
