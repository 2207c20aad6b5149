use crate::constants::GAS_MIGRATE_TGAS;
use crate::*;

#[near]
impl NftMarketplace {
    /// Replace the contract code with the wasm passed as raw input, then run
    /// `migrate` on the new code. Owner only, 1 yoctoNEAR attached.
    #[payable]
    #[handle_result]
    pub fn update_contract(&self) -> Result<Promise, MarketplaceError> {
        self.check_owner_call()?;
        let code = env::input()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| {
                MarketplaceError::InvalidInput("expected the new contract wasm as input".into())
            })?;
        Ok(Promise::new(env::current_account_id())
            .deploy_contract(code)
            .function_call(
                "migrate".to_string(),
                vec![],
                NearToken::from_near(0),
                Gas::from_tgas(GAS_MIGRATE_TGAS),
            )
            .as_return())
    }

    #[private]
    #[init(ignore_state)]
    pub fn migrate() -> Self {
        let Some(mut contract) = env::state_read::<Self>() else {
            env::panic_str("nft marketplace has no state to migrate");
        };
        contract.record_upgrade(env!("CARGO_PKG_VERSION"));
        contract
    }
}

impl NftMarketplace {
    /// Owner and other state carry over unchanged; only the version moves.
    pub(crate) fn record_upgrade(&mut self, new_version: &str) {
        let old_version = std::mem::replace(&mut self.version, new_version.to_string());
        events::emit_contract_upgraded(&env::current_account_id(), &old_version, &self.version);
    }
}
