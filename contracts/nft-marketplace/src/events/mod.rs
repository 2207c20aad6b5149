mod builder;
mod types;

mod contract;

pub use contract::*;

pub(crate) const STANDARD: &str = "nft_marketplace";
pub(crate) const VERSION: &str = "1.0.0";
pub(crate) const PREFIX: &str = "EVENT_JSON:";

pub(crate) const CONTRACT: &str = "CONTRACT_UPDATE";
