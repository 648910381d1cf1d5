//! Loading manifests and the metrics configuration from disk
//!
//! The loader distinguishes "there is no manifest" from "the manifest is
//! broken" so callers can report each precisely. Neither condition exits the
//! process; that decision belongs to the binary.

use deployer_fs::{ConfigStore, NormalizedPath};

use crate::schema::{DeploymentManifest, GlobalConfig, MetricConfig, StackSpec};
use crate::{Error, Result};

/// Loads deployment manifests and the metrics configuration file
#[derive(Debug, Default)]
pub struct ManifestLoader {
    store: ConfigStore,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self {
            store: ConfigStore::new(),
        }
    }

    /// Load a manifest and split it into global fields and stacks.
    ///
    /// Stacks are returned in document order, unmodified.
    pub fn load(&self, path: &NormalizedPath) -> Result<(GlobalConfig, Vec<StackSpec>)> {
        Ok(self.load_manifest(path)?.into_parts())
    }

    /// Load the full manifest document.
    ///
    /// # Errors
    ///
    /// * [`Error::ManifestNotFound`] if `path` is empty or not a regular file
    /// * [`Error::InvalidManifest`] if the file does not parse
    pub fn load_manifest(&self, path: &NormalizedPath) -> Result<DeploymentManifest> {
        if !path.is_file() {
            return Err(Error::ManifestNotFound {
                path: path.to_native(),
            });
        }

        let manifest: DeploymentManifest = self.store.load(path).map_err(|e| match e {
            deployer_fs::Error::ConfigParse { path, message, .. } => {
                Error::InvalidManifest { path, message }
            }
            other => Error::Fs(other),
        })?;

        tracing::debug!(
            %path,
            name = %manifest.name,
            stacks = manifest.stacks.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Load the metrics configuration, if the file exists.
    pub fn load_metric_config(&self, path: &NormalizedPath) -> Result<Option<MetricConfig>> {
        if !path.is_file() {
            tracing::debug!(%path, "No metrics configuration found");
            return Ok(None);
        }

        self.store
            .load(path)
            .map(Some)
            .map_err(|e| match e {
                deployer_fs::Error::ConfigParse { path, message, .. } => {
                    Error::InvalidMetricConfig { path, message }
                }
                other => Error::Fs(other),
            })
    }
}
