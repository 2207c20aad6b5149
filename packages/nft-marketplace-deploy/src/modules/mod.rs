//! Deployment modules shipped with this workspace.

mod nft_marketplace;

pub use nft_marketplace::{nft_marketplace_module, MODULE_ID as NFT_MARKETPLACE_MODULE_ID};

use crate::{Error, Module};

/// Ids of every known module.
pub const MODULE_IDS: &[&str] = &[NFT_MARKETPLACE_MODULE_ID];

/// Build a module by id.
pub fn by_id(id: &str) -> Result<Module, Error> {
    match id {
        NFT_MARKETPLACE_MODULE_ID => nft_marketplace_module(),
        other => Err(Error::Module(format!(
            "unknown module {other}; available: {}",
            MODULE_IDS.join(", ")
        ))),
    }
}
