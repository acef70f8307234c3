//! Filesystem helpers for cache files
//!
//! Writes go to a temporary file next to the destination and are renamed
//! into place, so a cache path either holds a complete file or nothing.

use crate::core::error::{FetchError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Create `dir` and all its ancestors. No error if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| FetchError::io(dir, e))
}

/// Fill a temp file with `fill`, then atomically move it to `dest`.
///
/// If `fill` fails the temp file is removed and `dest` is left untouched.
pub fn write_atomic<T>(dest: &Path, fill: impl FnOnce(&mut File) -> Result<T>) -> Result<T> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| FetchError::io(dir, e))?;
    let value = fill(tmp.as_file_mut())?;
    tmp.as_file_mut()
        .flush()
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| FetchError::io(tmp.path(), e))?;
    tmp.persist(dest)
        .map_err(|e| FetchError::io(dest, e.error))?;
    Ok(value)
}

/// Atomically write `bytes` to `dest`.
pub fn write_bytes(dest: &Path, bytes: &[u8]) -> Result<()> {
    write_atomic(dest, |file| {
        file.write_all(bytes).map_err(|e| FetchError::io(dest, e))
    })
}

/// Read and deserialize a cached JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|e| FetchError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::json(path.display(), e))
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| FetchError::io(path, e))
}

/// Remove `path` if it is present. Returns whether anything was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FetchError::io(path, e)),
    }
}
