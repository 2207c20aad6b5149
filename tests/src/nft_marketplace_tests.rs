// =============================================================================
// NftMarketplace Integration Tests
// =============================================================================
// Deploys the contract through the factory on a sandbox and checks the owner
// wiring. Cases share one memoized deployment per suite.
//
// Build the wasm first (`cargo near build` in contracts/nft-marketplace) or
// point NFT_MARKETPLACE_WASM_PATH at it.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use near_workspaces::network::Sandbox;
use near_workspaces::types::NearToken;
use near_workspaces::{Account, AccountId, Worker};
use serde_json::json;

use crate::utils::{get_signers, setup_sandbox, view_owner, ContractFactory, Fixture};

struct Deployment {
    _worker: Worker<Sandbox>,
    nft_marketplace: Account,
    account1: Account,
    account2: Account,
    other_accounts: Vec<Account>,
}

async fn deploy_nft_marketplace() -> Result<Deployment> {
    let worker = setup_sandbox().await?;
    let mut signers = get_signers(&worker, 4).await?.into_iter();
    let account1 = signers.next().expect("4 signers requested");
    let account2 = signers.next().expect("4 signers requested");
    let other_accounts: Vec<Account> = signers.collect();

    let factory = ContractFactory::load("nft_marketplace")?;
    let nft_marketplace = factory
        .deploy(&account1, json!({ "owner_id": account1.id() }))
        .await?;

    Ok(Deployment {
        _worker: worker,
        nft_marketplace,
        account1,
        account2,
        other_accounts,
    })
}

// =============================================================================
// deployment
// =============================================================================

async fn should_set_the_owner_to_the_deployer(fixture: &Fixture<Deployment>) -> Result<()> {
    println!("\n=== deployment: should set the owner to the deployer ===");
    let Deployment {
        nft_marketplace,
        account1,
        ..
    } = fixture.load(deploy_nft_marketplace).await?;

    assert_eq!(view_owner(nft_marketplace).await?, *account1.id());
    println!("   ✓ owner() == account1");
    Ok(())
}

async fn should_not_report_another_signer_as_owner(fixture: &Fixture<Deployment>) -> Result<()> {
    println!("\n=== deployment: owner is not any other signer ===");
    let deployment = fixture.load(deploy_nft_marketplace).await?;
    let owner = view_owner(&deployment.nft_marketplace).await?;

    assert_ne!(owner, *deployment.account2.id());
    for other in &deployment.other_accounts {
        assert_ne!(owner, *other.id());
    }
    println!("   ✓ no other signer is owner");
    Ok(())
}

#[tokio::test]
async fn deployment() -> Result<()> {
    let fixture = Fixture::new();
    should_set_the_owner_to_the_deployer(&fixture).await?;
    should_not_report_another_signer_as_owner(&fixture).await?;
    Ok(())
}

// =============================================================================
// Fixture memoization
// =============================================================================

#[tokio::test]
async fn fixture_runs_setup_once() -> Result<()> {
    let calls = AtomicUsize::new(0);
    let fixture = Fixture::new();

    let first = fixture
        .load(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            deploy_nft_marketplace().await
        })
        .await?
        .nft_marketplace
        .id()
        .clone();
    let second = fixture
        .load(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            deploy_nft_marketplace().await
        })
        .await?
        .nft_marketplace
        .id()
        .clone();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

// =============================================================================
// Ownership
// =============================================================================

#[tokio::test]
async fn owner_can_transfer_ownership() -> Result<()> {
    println!("\n=== Test: owner transfers ownership ===");
    let deployment = deploy_nft_marketplace().await?;

    let outcome = deployment
        .account1
        .call(deployment.nft_marketplace.id(), "transfer_ownership")
        .args_json(json!({ "new_owner": deployment.account2.id() }))
        .deposit(NearToken::from_yoctonear(1))
        .transact()
        .await?;
    assert!(outcome.is_success(), "transfer failed: {:?}", outcome.failures());

    assert_eq!(
        view_owner(&deployment.nft_marketplace).await?,
        *deployment.account2.id()
    );
    println!("   ✓ owner() == account2");
    Ok(())
}

#[tokio::test]
async fn non_owner_cannot_transfer_ownership() -> Result<()> {
    println!("\n=== Test: non-owner transfer is rejected ===");
    let deployment = deploy_nft_marketplace().await?;

    let outcome = deployment
        .account2
        .call(deployment.nft_marketplace.id(), "transfer_ownership")
        .args_json(json!({ "new_owner": deployment.account2.id() }))
        .deposit(NearToken::from_yoctonear(1))
        .transact()
        .await?;
    assert!(outcome.is_failure(), "non-owner transfer should fail");
    assert!(
        format!("{:?}", outcome.failures()).contains("is not the marketplace owner"),
        "unexpected failure: {:?}",
        outcome.failures()
    );

    assert_eq!(
        view_owner(&deployment.nft_marketplace).await?,
        *deployment.account1.id()
    );
    Ok(())
}

#[tokio::test]
async fn init_cannot_run_twice() -> Result<()> {
    let deployment = deploy_nft_marketplace().await?;

    let outcome = deployment
        .account2
        .call(deployment.nft_marketplace.id(), "new")
        .args_json(json!({ "owner_id": deployment.account2.id() }))
        .transact()
        .await?;
    assert!(outcome.is_failure(), "re-initialization should fail");
    assert_eq!(
        view_owner(&deployment.nft_marketplace).await?,
        *deployment.account1.id()
    );
    Ok(())
}

// =============================================================================
// Initialization access
// =============================================================================

#[tokio::test]
async fn third_party_cannot_initialize_deployed_code() -> Result<()> {
    println!("\n=== Test: only the contract account can call new ===");
    let worker = setup_sandbox().await?;
    let mut signers = get_signers(&worker, 2).await?.into_iter();
    let deployer = signers.next().expect("2 signers requested");
    let intruder = signers.next().expect("2 signers requested");

    // Code deployed on its own, the window a separate init transaction would leave open.
    let factory = ContractFactory::load("nft_marketplace")?;
    let account = factory.create_account(&deployer).await?;
    account.deploy(factory.wasm()).await?.into_result()?;

    let outcome = intruder
        .call(account.id(), "new")
        .args_json(json!({ "owner_id": intruder.id() }))
        .max_gas()
        .transact()
        .await?;
    assert!(outcome.is_failure(), "third-party init should fail");
    assert!(
        format!("{:?}", outcome.failures()).contains("is private"),
        "unexpected failure: {:?}",
        outcome.failures()
    );

    let outcome = account
        .call(account.id(), "new")
        .args_json(json!({ "owner_id": deployer.id() }))
        .max_gas()
        .transact()
        .await?;
    assert!(outcome.is_success(), "self init failed: {:?}", outcome.failures());
    assert_eq!(view_owner(&account).await?, *deployer.id());
    println!("   ✓ intruder rejected, owner == deployer");
    Ok(())
}

#[tokio::test]
async fn failed_initializer_leaves_no_code() -> Result<()> {
    let worker = setup_sandbox().await?;
    let deployer = get_signers(&worker, 1).await?.remove(0);

    let factory = ContractFactory::load("nft_marketplace")?;
    let err = factory
        .deploy(&deployer, json!({ "owner_id": "Not A Valid Account" }))
        .await;
    assert!(err.is_err(), "invalid owner_id should fail initialization");

    // The account was created, but the code deployment rolled back with `new`.
    let contract_id: AccountId = format!("nft-marketplace.{}", deployer.id()).parse()?;
    assert!(worker.view_account(&contract_id).await.is_ok());
    assert!(deployer.view(&contract_id, "owner").await.is_err());
    Ok(())
}
