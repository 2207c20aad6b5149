//! Deploy a module to sandbox, testnet or mainnet.

use std::path::PathBuf;

use clap::Parser;
use nft_marketplace_deploy::{deploy, modules, Config, DeploymentParameters, Network};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "deploy", about = "Deploy NftMarketplace modules")]
struct Cli {
    /// Module to deploy.
    #[arg(long, default_value = modules::NFT_MARKETPLACE_MODULE_ID)]
    module: String,

    /// Target network (sandbox, testnet, mainnet); overrides the config file.
    #[arg(long)]
    network: Option<String>,

    /// JSON parameters file keyed by module id.
    #[arg(long, value_name = "PATH")]
    parameters: Option<PathBuf>,

    /// Config file; defaults to `deploy.toml` in the working directory.
    #[arg(long, value_name = "PATH")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(network) = &cli.network {
        config.network = network.parse::<Network>()?;
    }

    let overrides = match &cli.parameters {
        Some(path) => DeploymentParameters::from_file(path)?,
        None => DeploymentParameters::new(),
    };

    let module = modules::by_id(&cli.module)?;
    info!(module = module.id(), network = %config.network, "Configuration loaded");

    let result = match deploy(&config, &module, &overrides).await {
        Ok(result) => result,
        Err(e) => {
            error!(module = module.id(), error = %e, "Deployment failed");
            return Err(e.into());
        }
    };

    for (export, account_id) in result.addresses() {
        info!(module = %result.module_id, export, account = %account_id, "Deployed");
        println!("{}#{export} - {account_id}", result.module_id);
    }
    Ok(())
}
