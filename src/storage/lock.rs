//! Advisory write lock
//!
//! Writers take an exclusive `fs2` lock on a shared lock file. The operating
//! system drops the lock when the holding file handle closes, including when
//! a process dies, so a lock is never broken by guessing at its age. The lock
//! file itself stays on disk.

use crate::error::{DeskError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
const RETRY_DELAY: Duration = Duration::from_millis(10);

/// Guard for an acquired lock, released on drop
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Acquire the lock at `path`, waiting for other holders
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        Self::acquire_within(path, DEFAULT_TIMEOUT)
    }

    /// Acquire the lock at `path`, giving up after `timeout`
    pub fn acquire_within(path: impl Into<PathBuf>, timeout: Duration) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;

        let start = Instant::now();
        let mut attempt: u32 = 0;
        while file.try_lock_exclusive().is_err() {
            if start.elapsed() >= timeout {
                return Err(DeskError::Lock(format!(
                    "timed out after {:?} waiting for {}",
                    start.elapsed(),
                    path.display()
                )));
            }
            attempt += 1;
            if attempt % 50 == 0 {
                tracing::debug!(path = %path.display(), attempt, "Waiting for storage lock");
            }
            thread::sleep(RETRY_DELAY);
        }

        Ok(Self { file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), "Failed to release storage lock: {e}");
        }
    }
}
