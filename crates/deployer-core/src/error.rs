//! Error types for deployer-core

use std::path::PathBuf;

use crate::validate::ValidationError;

/// Result type for deployer-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing a deployment
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resolved configuration violates an invariant
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Neither the stack nor the manifest default names a userdata script
    #[error("Please specify userdata script path")]
    UserdataPathMissing,

    /// The userdata script is not a regular file
    #[error("Userdata file does not exist in {path}")]
    UserdataNotFound { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Metadata error from deployer-meta
    #[error(transparent)]
    Meta(#[from] deployer_meta::Error),

    /// Filesystem error from deployer-fs
    #[error(transparent)]
    Fs(#[from] deployer_fs::Error),
}
