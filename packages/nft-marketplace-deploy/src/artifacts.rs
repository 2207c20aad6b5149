//! Contract wasm lookup.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Error;

/// Locates compiled contract wasm by contract name.
///
/// Lookup order: `<NAME>_WASM_PATH`, the configured artifacts directory, then
/// the usual `cargo near build` and `cargo build --target wasm32-unknown-unknown`
/// output paths relative to the working directory and its parent.
#[derive(Debug, Clone, Default)]
pub struct ArtifactResolver {
    artifacts_dir: Option<PathBuf>,
}

impl ArtifactResolver {
    pub fn new(artifacts_dir: Option<PathBuf>) -> Self {
        Self { artifacts_dir }
    }

    pub fn env_var(contract_name: &str) -> String {
        format!("{}_WASM_PATH", contract_name.to_uppercase().replace('-', "_"))
    }

    pub fn candidates(&self, contract_name: &str) -> Vec<PathBuf> {
        let file = contract_name.replace('-', "_");
        let mut paths = Vec::new();
        if let Ok(path) = std::env::var(Self::env_var(contract_name)) {
            if !path.is_empty() {
                paths.push(PathBuf::from(path));
            }
        }
        if let Some(dir) = &self.artifacts_dir {
            paths.push(dir.join(format!("{file}.wasm")));
            paths.push(dir.join(&file).join(format!("{file}.wasm")));
        }
        for root in [".", ".."] {
            let root = Path::new(root);
            paths.push(root.join("target/near").join(&file).join(format!("{file}.wasm")));
            paths.push(
                root.join("target/wasm32-unknown-unknown/release")
                    .join(format!("{file}.wasm")),
            );
        }
        paths
    }

    pub fn locate(&self, contract_name: &str) -> Result<PathBuf, Error> {
        let candidates = self.candidates(contract_name);
        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| {
                Error::Artifact(format!(
                    "{contract_name}.wasm not found; build it with `cargo near build` or set {} (looked in: {})",
                    Self::env_var(contract_name),
                    candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    pub fn read(&self, contract_name: &str) -> Result<Vec<u8>, Error> {
        let path = self.locate(contract_name)?;
        debug!(contract = contract_name, path = %path.display(), "Loading contract wasm");
        std::fs::read(&path)
            .map_err(|e| Error::Artifact(format!("cannot read {}: {e}", path.display())))
    }
}
