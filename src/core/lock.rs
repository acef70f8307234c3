//! Cache population locks
//!
//! One exclusive lock per artifact so that separate processes never write the
//! same cache file at once. Waiters block until the holder is done, then
//! re-check the cache before fetching.

use super::error::{FetchError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Block until the lock at `lock_path` is held exclusively by this process.
///
/// Lock files are left in place on release; unlinking them would let a
/// waiter lock an inode nobody else can see.
pub fn acquire_cache_lock(lock_path: &Path) -> Result<CacheLock> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)
        .map_err(|e| FetchError::io(lock_path, e))?;

    file.lock_exclusive()
        .map_err(|e| FetchError::io(lock_path, e))?;

    Ok(CacheLock {
        file,
        path: lock_path.to_path_buf(),
    })
}

/// RAII guard for a cache lock - unlocks when dropped
#[derive(Debug)]
pub struct CacheLock {
    file: File,
    path: PathBuf,
}

impl CacheLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
