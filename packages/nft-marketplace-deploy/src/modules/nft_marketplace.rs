use crate::{build_module, Error, Module};

pub const MODULE_ID: &str = "NftMarketplaceModule";

/// Fallback owner when neither the parameters file nor the network config
/// provides one. Left empty on purpose: resolution fails instead of
/// deploying with a guessed owner.
pub const OWNER_ACCOUNT: &str = "";

/// `owner` → `nft_marketplace.new(owner_id)`; exports `nft_marketplace`.
pub fn nft_marketplace_module() -> Result<Module, Error> {
    build_module(MODULE_ID, |m| {
        let owner = m.get_account_parameter("owner", OWNER_ACCOUNT);
        let nft_marketplace = m.contract("nft_marketplace", [("owner_id", owner)]);
        [("nft_marketplace", nft_marketplace)]
    })
}
