//! # State File Locking
//!
//! Serializes harness invocations that share a state file.
//!
//! Every command loads the whole state, runs one operation and writes the
//! whole state back. Two writers interleaving that span would both validate
//! against the same snapshot and the later rename would drop the earlier
//! commit, so writers hold an exclusive lock from load to save. Readers hold
//! a shared lock.
//!
//! ## Implementation
//!
//! Uses `fs2` advisory locks (flock on Unix, LockFileEx on Windows) on a
//! sidecar `<state>.lock` file. The state file itself cannot carry the lock:
//! saving replaces it by rename, which would orphan a lock held on the old
//! inode.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::debug;

/// Lock mode requested on the sidecar file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockMode {
    /// Any number of readers.
    Shared,
    /// A single writer.
    Exclusive,
}

/// Advisory lock guarding one state file.
///
/// Acquisition blocks until the lock is granted. Released on drop.
#[derive(Debug)]
pub struct StateLock {
    /// The lock file handle (kept open to maintain lock)
    file: File,
    /// Path to the lock file
    path: PathBuf,
    mode: LockMode,
}

impl StateLock {
    /// Blocks until no other process reads or writes `state_path`.
    pub fn exclusive(state_path: &Path) -> Result<Self> {
        Self::acquire(state_path, LockMode::Exclusive)
    }

    /// Blocks until no other process writes `state_path`.
    pub fn shared(state_path: &Path) -> Result<Self> {
        Self::acquire(state_path, LockMode::Shared)
    }

    fn acquire(state_path: &Path, mode: LockMode) -> Result<Self> {
        let path = lock_path(state_path);
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("opening lock file {}", path.display()))?;

        match mode {
            LockMode::Shared => FileExt::lock_shared(&file),
            LockMode::Exclusive => FileExt::lock_exclusive(&file),
        }
        .with_context(|| format!("locking {}", path.display()))?;

        debug!(path = %path.display(), ?mode, "State lock acquired");
        Ok(Self { file, path, mode })
    }

    /// Path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode the lock was granted in.
    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        // The file stays on disk: unlinking it would let a waiter lock an
        // inode that the next opener no longer sees.
        let _ = FileExt::unlock(&self.file);
        debug!(path = %self.path.display(), "State lock released");
    }
}

/// Sidecar lock path for `state_path`: the same name with `.lock` appended.
pub fn lock_path(state_path: &Path) -> PathBuf {
    let mut name = OsString::from(state_path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

// =============================================================================
// TESTS
// =============================================================================
