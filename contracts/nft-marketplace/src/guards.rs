use crate::*;

pub(crate) fn check_one_yocto() -> Result<(), MarketplaceError> {
    let attached = env::attached_deposit();
    if attached != ONE_YOCTO {
        return Err(MarketplaceError::InsufficientDeposit(format!(
            "owner actions require exactly 1 yoctoNEAR, got {}",
            attached.as_yoctonear()
        )));
    }
    Ok(())
}

impl NftMarketplace {
    pub(crate) fn check_owner(&self, account_id: &AccountId) -> Result<(), MarketplaceError> {
        if account_id != &self.owner_id {
            return Err(MarketplaceError::not_owner(account_id));
        }
        Ok(())
    }

    /// Deposit and caller checks for owner-only methods. Returns the caller.
    pub(crate) fn check_owner_call(&self) -> Result<AccountId, MarketplaceError> {
        check_one_yocto()?;
        let caller = env::predecessor_account_id();
        self.check_owner(&caller)?;
        Ok(caller)
    }
}
