// =============================================================================
// NftMarketplaceModule Integration Tests
// =============================================================================
// Runs the deployment module through the executor against a sandbox, with the
// sandbox root account as deployer.

use anyhow::Result;
use near_workspaces::AccountId;
use nft_marketplace_deploy::modules::{nft_marketplace_module, NFT_MARKETPLACE_MODULE_ID};
use nft_marketplace_deploy::{DeploymentParameters, Error, Executor, Journal};
use serde_json::json;

use crate::utils::{get_signers, setup_sandbox};

#[tokio::test]
async fn module_deploys_with_owner_parameter() -> Result<()> {
    println!("\n=== Test: NftMarketplaceModule honours the owner parameter ===");
    let worker = setup_sandbox().await?;
    let signers = get_signers(&worker, 1).await?;
    let owner = signers[0].id().clone();

    let mut params = DeploymentParameters::new();
    params.set(NFT_MARKETPLACE_MODULE_ID, "owner", owner.to_string());

    let deployer = worker.root_account()?;
    let module = nft_marketplace_module()?;
    let result = Executor::new(deployer.clone())
        .with_parameters(params)
        .run(&module)
        .await?;

    let contract_id = result
        .address("nft_marketplace")
        .expect("module exports nft_marketplace")
        .clone();
    assert_eq!(contract_id.as_str(), format!("nft-marketplace.{}", deployer.id()));

    let stored: AccountId = deployer
        .view(&contract_id, "owner")
        .args_json(json!({}))
        .await?
        .json()?;
    assert_eq!(stored, owner);
    println!("   ✓ owner() == parameter value");
    Ok(())
}

#[tokio::test]
async fn global_parameter_supplies_owner() -> Result<()> {
    let worker = setup_sandbox().await?;
    let deployer = worker.root_account()?;

    let mut params = DeploymentParameters::new();
    params.set_global("owner", deployer.id().to_string());

    let result = Executor::new(deployer.clone())
        .with_parameters(params)
        .run(&nft_marketplace_module()?)
        .await?;

    let contract_id = result.address("nft_marketplace").expect("exported").clone();
    let stored: AccountId = deployer
        .view(&contract_id, "owner")
        .args_json(json!({}))
        .await?
        .json()?;
    assert_eq!(&stored, deployer.id());
    Ok(())
}

#[tokio::test]
async fn missing_owner_fails_before_any_transaction() -> Result<()> {
    let worker = setup_sandbox().await?;
    let deployer = worker.root_account()?;

    let mut executor = Executor::new(deployer.clone());
    let err = executor
        .run(&nft_marketplace_module()?)
        .await
        .expect_err("owner has an empty default");
    assert!(matches!(err, Error::Parameter(_)), "unexpected error: {err}");

    // No contract account was created.
    let contract_id: AccountId = format!("nft-marketplace.{}", deployer.id()).parse()?;
    assert!(worker.view_account(&contract_id).await.is_err());
    assert!(executor.journal().entries().is_empty());
    Ok(())
}

#[tokio::test]
async fn journaled_deployment_is_not_repeated() -> Result<()> {
    println!("\n=== Test: second run reuses the journaled deployment ===");
    let worker = setup_sandbox().await?;
    let deployer = worker.root_account()?;
    let dir = tempfile::tempdir()?;

    let mut params = DeploymentParameters::new();
    params.set(NFT_MARKETPLACE_MODULE_ID, "owner", deployer.id().to_string());
    let module = nft_marketplace_module()?;

    let first = Executor::new(deployer.clone())
        .with_parameters(params.clone())
        .with_journal(Journal::open(dir.path(), "sandbox")?)
        .run(&module)
        .await?;

    // Creating the same subaccount again would fail, so success means it was skipped.
    let second = Executor::new(deployer.clone())
        .with_parameters(params)
        .with_journal(Journal::open(dir.path(), "sandbox")?)
        .run(&module)
        .await?;

    assert_eq!(first.address("nft_marketplace"), second.address("nft_marketplace"));
    let journal = Journal::open(dir.path(), "sandbox")?;
    assert_eq!(
        journal.account_id("NftMarketplaceModule#nft_marketplace"),
        first.address("nft_marketplace")
    );
    println!("   ✓ second run skipped the deployed future");
    Ok(())
}

#[tokio::test]
async fn journaled_deployment_with_changed_owner_fails() -> Result<()> {
    println!("\n=== Test: re-run with a different owner is rejected ===");
    let worker = setup_sandbox().await?;
    let deployer = worker.root_account()?;
    let signers = get_signers(&worker, 1).await?;
    let dir = tempfile::tempdir()?;
    let module = nft_marketplace_module()?;

    let mut params = DeploymentParameters::new();
    params.set(NFT_MARKETPLACE_MODULE_ID, "owner", deployer.id().to_string());
    let first = Executor::new(deployer.clone())
        .with_parameters(params)
        .with_journal(Journal::open(dir.path(), "sandbox")?)
        .run(&module)
        .await?;

    let mut changed = DeploymentParameters::new();
    changed.set(NFT_MARKETPLACE_MODULE_ID, "owner", signers[0].id().to_string());
    let err = Executor::new(deployer.clone())
        .with_parameters(changed)
        .with_journal(Journal::open(dir.path(), "sandbox")?)
        .run(&module)
        .await
        .expect_err("owner differs from the journaled deployment");
    assert!(matches!(err, Error::Journal(_)), "unexpected error: {err}");

    // The deployed contract still has the original owner.
    let contract_id = first.address("nft_marketplace").expect("exported").clone();
    let stored: AccountId = deployer
        .view(&contract_id, "owner")
        .args_json(json!({}))
        .await?
        .json()?;
    assert_eq!(&stored, deployer.id());
    println!("   ✓ mismatch reported, contract untouched");
    Ok(())
}
