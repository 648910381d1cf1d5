//! Filesystem access for the deployment manifest tooling
//!
//! Provides normalized paths, scoped reads with path-carrying errors,
//! and format-agnostic document loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, DocumentFormat};
pub use error::{Error, Result};
pub use path::NormalizedPath;
