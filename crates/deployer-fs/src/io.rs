//! Scoped read operations
//!
//! Every read opens, consumes and closes the file before returning, so no
//! handle outlives the call.

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a regular file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = require_file(path)?;
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read raw bytes from a regular file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = require_file(path)?;
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

fn require_file(path: &NormalizedPath) -> Result<std::path::PathBuf> {
    let native_path = path.to_native();
    if native_path.is_dir() {
        return Err(Error::NotAFile { path: native_path });
    }
    Ok(native_path)
}
