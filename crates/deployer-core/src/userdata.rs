//! Userdata script resolution
//!
//! A stack's userdata comes either from a local file, which is read and
//! base64-encoded here, or from object storage, which is only referenced;
//! fetching remote objects is left to whatever consumes the configuration.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use deployer_fs::{NormalizedPath, io};
use deployer_meta::UserdataSpec;
use serde::Serialize;

use crate::{Error, Result};

/// `type` value selecting object storage
pub const S3_USERDATA_TYPE: &str = "s3";

/// Where a userdata script is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserdataKind {
    Local,
    S3,
}

impl UserdataKind {
    /// `s3` selects object storage; anything else is a local file.
    pub fn from_type(kind: Option<&str>) -> Self {
        match kind {
            Some(S3_USERDATA_TYPE) => Self::S3,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for UserdataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::S3 => write!(f, "s3"),
        }
    }
}

/// Userdata ready to hand to a launch template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ResolvedUserdata {
    /// Script content, base64-encoded with the standard alphabet
    Encoded { content: String },
    /// An object-storage location to be fetched by the consumer
    ObjectReference { path: String },
}

/// A source of userdata scripts.
pub trait UserdataProvider {
    fn kind(&self) -> UserdataKind;

    /// Path or object key the script is read from
    fn path(&self) -> &str;

    fn provide(&self) -> Result<ResolvedUserdata>;
}

/// Reads a script from the local filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalProvider {
    path: String,
}

impl LocalProvider {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl UserdataProvider for LocalProvider {
    fn kind(&self) -> UserdataKind {
        UserdataKind::Local
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn provide(&self) -> Result<ResolvedUserdata> {
        if self.path.is_empty() {
            return Err(Error::UserdataPathMissing);
        }

        let path = NormalizedPath::new(&self.path);
        if !path.is_file() {
            return Err(Error::UserdataNotFound {
                path: path.to_native(),
            });
        }

        let script = io::read_bytes(&path)?;
        tracing::debug!(%path, bytes = script.len(), "Read userdata script");
        Ok(ResolvedUserdata::Encoded {
            content: STANDARD.encode(script),
        })
    }
}

/// References a script stored in S3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Provider {
    path: String,
}

impl S3Provider {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl UserdataProvider for S3Provider {
    fn kind(&self) -> UserdataKind {
        UserdataKind::S3
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn provide(&self) -> Result<ResolvedUserdata> {
        Ok(ResolvedUserdata::ObjectReference {
            path: self.path.clone(),
        })
    }
}

/// Pick the provider for a stack.
///
/// The stack's own spec wins; each unset field (`type` and `path`
/// independently) falls back to the manifest default.
pub fn select_provider(
    stack: Option<&UserdataSpec>,
    default: &UserdataSpec,
) -> Box<dyn UserdataProvider> {
    let spec = stack.cloned().unwrap_or_default().or_default_from(default);
    let path = spec.path.unwrap_or_default();

    match UserdataKind::from_type(spec.kind.as_deref()) {
        UserdataKind::S3 => Box::new(S3Provider::new(path)),
        UserdataKind::Local => Box::new(LocalProvider::new(path)),
    }
}
