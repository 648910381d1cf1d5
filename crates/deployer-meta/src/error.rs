//! Error types for deployer-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] deployer_fs::Error),

    #[error("Manifest file does not exist: {path}")]
    ManifestNotFound { path: PathBuf },

    #[error("Invalid manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Invalid metrics configuration at {path}: {message}")]
    InvalidMetricConfig { path: PathBuf, message: String },

    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },
}
