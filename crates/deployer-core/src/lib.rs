//! Configuration resolution and validation for autoscaling-group deployments
//!
//! This crate turns a deployment manifest plus command-line overrides into a
//! single validated configuration, before any cloud API is touched:
//!
//! - **Run configuration**: the override values collected by the command surface
//! - **Resolver**: merges overrides with the manifest and selects the active stack
//! - **Validator**: fail-fast invariant checks over the merged configuration
//! - **Userdata**: local-file vs. object-storage script resolution
//! - **Summary**: human-readable rendering of the resolved configuration
//!
//! # Architecture
//!
//! ```text
//!                 deployer-cli
//!                      |
//!                deployer-core
//!                 /          \
//!        deployer-meta    deployer-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use deployer_core::{RunConfig, pipeline};
//!
//! let run = RunConfig {
//!     manifest: "manifests/hello.yaml".into(),
//!     stack: "artd".into(),
//!     ..RunConfig::default()
//! };
//! let prepared = pipeline::prepare(run)?;
//! println!("{}", deployer_core::summary::render(&prepared.config));
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod summary;
pub mod userdata;
pub mod validate;

pub use config::{
    DEFAULT_DEPLOYMENT_TIMEOUT, DEFAULT_LOG_LEVEL, DEFAULT_POLLING_INTERVAL, MIN_POLLING_INTERVAL,
    ResolvedConfiguration, Resolver, RunConfig,
};
pub use error::{Error, Result};
pub use pipeline::{PreparedDeployment, prepare};
pub use userdata::{
    LocalProvider, ResolvedUserdata, S3Provider, UserdataKind, UserdataProvider, select_provider,
};
pub use validate::{ValidationError, ValidationWarning, Validator, WarningKind};
