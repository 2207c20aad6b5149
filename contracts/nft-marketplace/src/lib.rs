use near_sdk::{AccountId, Gas, NearToken, PanicOnDefault, Promise, env, near};

pub mod constants;
mod errors;
mod guards;

mod events;

mod admin;
mod upgrade;

#[cfg(test)]
mod tests;

pub use constants::*;
pub use errors::MarketplaceError;

#[near(
    contract_state,
    contract_metadata(
        version = "0.1.0",
        standard(standard = "nep297", version = "1.0.0"),
    )
)]
#[derive(PanicOnDefault)]
pub struct NftMarketplace {
    pub version: String,

    // Access-control root: set once by `new`, changed only through `transfer_ownership`.
    pub owner_id: AccountId,
}
