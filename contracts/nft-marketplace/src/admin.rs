use crate::*;

#[near]
impl NftMarketplace {
    /// Only the contract account itself may initialize, so deployment and
    /// initialization go out together in one batch transaction.
    #[private]
    #[init]
    pub fn new(owner_id: AccountId) -> Self {
        let contract = Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            owner_id,
        };
        events::emit_contract_initialized(&contract.owner_id, &contract.version);
        contract
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner_id
    }

    pub fn get_version(&self) -> String {
        self.version.clone()
    }

    #[payable]
    #[handle_result]
    pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), MarketplaceError> {
        self.check_owner_call()?;
        if new_owner == self.owner_id {
            return Err(MarketplaceError::InvalidInput(
                "New owner must differ from current owner".to_string(),
            ));
        }
        let old_owner = self.owner_id.clone();
        self.owner_id = new_owner;
        events::emit_owner_transferred(&old_owner, &self.owner_id);
        Ok(())
    }
}
