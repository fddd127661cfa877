//! Cross-process concurrency guard.
//!
//! The pointer, keyboard and input focus are one machine-wide resource:
//! two uncoordinated invocations driving them concurrently would
//! interleave physical input non-deterministically. Every executor run is
//! therefore wrapped in an exclusive advisory lock on a fixed, well-known
//! lock file. Acquisition blocks indefinitely; release happens on every
//! exit path through `Drop`.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs4::FileExt;
use tracing::debug;

use crate::error::Result;
use crate::utils::paths::app_dir;

/// Well-known lock file shared by all invocations on this machine.
pub fn default_lock_path() -> PathBuf {
    app_dir().join("input-simulation.lock")
}

/// RAII guard for the machine-wide input-simulation lock.
///
/// Held for the whole executor run, from before the first action until
/// the run returns or fails, never per action.
pub struct SimulationLock {
    file: File,
}

impl SimulationLock {
    /// Block until the machine-wide lock is ours.
    pub fn acquire() -> Result<Self> {
        Self::acquire_at(&default_lock_path())
    }

    /// Block until the lock at `path` is ours.
    pub fn acquire_at(path: &Path) -> Result<Self> {
        let file = open_lock_file(path)?;
        debug!(path = %path.display(), "Waiting for the input-simulation lock");
        file.lock_exclusive()?;
        debug!("Lock acquired");
        Ok(Self { file })
    }

    /// Non-blocking variant: `Ok(None)` when another process holds the
    /// lock.
    pub fn try_acquire_at(path: &Path) -> Result<Option<Self>> {
        let file = open_lock_file(path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file })),
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl Drop for SimulationLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn open_lock_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_excludes_a_second_holder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.lock");

        let held = SimulationLock::acquire_at(&path).unwrap();
        assert!(SimulationLock::try_acquire_at(&path).unwrap().is_none());

        drop(held);
        assert!(SimulationLock::try_acquire_at(&path).unwrap().is_some());
    }

    #[test]
    fn test_lock_is_released_even_after_a_failed_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.lock");

        // simulate an executor run that errors while the guard is held
        let result: std::result::Result<(), &str> = (|| {
            let _guard = SimulationLock::acquire_at(&path).unwrap();
            Err("boom")
        })();
        assert!(result.is_err());

        // the guard dropped on the error path, so the lock is free again
        assert!(SimulationLock::try_acquire_at(&path).unwrap().is_some());
    }

    #[test]
    fn test_reacquire_after_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.lock");
        for _ in 0..3 {
            let guard = SimulationLock::acquire_at(&path).unwrap();
            drop(guard);
        }
    }
}
