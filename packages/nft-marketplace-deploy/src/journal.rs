//! Deployment journal.
//!
//! Records which futures have already been deployed on a network, and with
//! which initializer arguments, in
//! `<deployments_dir>/<network>/deployed_addresses.json`:
//!
//! ```json
//! {
//!   "NftMarketplaceModule#nft_marketplace": {
//!     "account_id": "nft-marketplace.deployer.testnet",
//!     "args": { "owner_id": "market-owner.testnet" }
//!   }
//! }
//! ```
//!
//! A future present in the journal is not deployed again. Re-running it with
//! different arguments is an error rather than a silent reuse.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use near_workspaces::AccountId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

pub const JOURNAL_FILE: &str = "deployed_addresses.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub account_id: AccountId,
    /// Initializer arguments the contract was created with.
    pub args: Value,
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    path: Option<PathBuf>,
    entries: BTreeMap<String, JournalEntry>,
}

impl Journal {
    /// In-memory journal that is never written to disk.
    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Open (or start) the journal for `network` under `deployments_dir`.
    pub fn open(deployments_dir: impl AsRef<Path>, network: &str) -> Result<Self, Error> {
        let path = deployments_dir.as_ref().join(network).join(JOURNAL_FILE);
        let entries = if path.is_file() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| Error::Journal(format!("cannot read {}: {e}", path.display())))?;
            serde_json::from_str(&raw)
                .map_err(|e| Error::Journal(format!("corrupt journal {}: {e}", path.display())))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, future_id: &str) -> Option<&JournalEntry> {
        self.entries.get(future_id)
    }

    pub fn account_id(&self, future_id: &str) -> Option<&AccountId> {
        self.get(future_id).map(|entry| &entry.account_id)
    }

    pub fn entries(&self) -> &BTreeMap<String, JournalEntry> {
        &self.entries
    }

    /// Journaled account for `future_id`, provided it was created with `args`.
    ///
    /// `Ok(None)` means the future has not been deployed yet.
    pub fn reconcile(&self, future_id: &str, args: &Value) -> Result<Option<&AccountId>, Error> {
        let Some(entry) = self.get(future_id) else {
            return Ok(None);
        };
        if &entry.args != args {
            return Err(Error::Journal(format!(
                "{future_id} is already deployed at {} with {}, but this run resolves {}; \
                 restore the previous parameters or remove the entry from {}",
                entry.account_id,
                entry.args,
                args,
                self.path
                    .as_ref()
                    .map_or_else(|| JOURNAL_FILE.to_string(), |p| p.display().to_string()),
            )));
        }
        Ok(Some(&entry.account_id))
    }

    /// Record a deployed future and persist immediately.
    pub fn record(&mut self, future_id: &str, account_id: AccountId, args: Value) -> Result<(), Error> {
        self.entries
            .insert(future_id.to_string(), JournalEntry { account_id, args });
        self.save()
    }

    pub fn save(&self) -> Result<(), Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Journal(format!("cannot create {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| Error::Journal(format!("cannot serialize journal: {e}")))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| Error::Journal(format!("cannot write {}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, path)
            .map_err(|e| Error::Journal(format!("cannot replace {}: {e}", path.display())))
    }
}
