//! YAML file backend
//!
//! Every record lives in its own `<uuid>.yaml` file under a per-collection
//! directory. Writes go to a temporary file that is then renamed into place,
//! so readers never observe a half-written record and need no lock. Writers
//! serialize through [`FileLock`].

use super::lock::FileLock;
use crate::error::{DeskError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

const LOCK_FILE: &str = ".lock";
const RECORD_EXT: &str = "yaml";

/// Record collections kept by [`FileStorage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collection {
    Users,
    Tickets,
    Comments,
    StatusLogs,
}

impl Collection {
    const ALL: [Self; 4] = [Self::Users, Self::Tickets, Self::Comments, Self::StatusLogs];

    const fn dir_name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tickets => "tickets",
            Self::Comments => "comments",
            Self::StatusLogs => "status_logs",
        }
    }
}

/// Document store rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a storage handle; call [`ensure_directories`](Self::ensure_directories)
    /// before first use
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Open a store, creating its directory layout if needed
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let storage = Self::new(base_dir);
        storage.ensure_directories()?;
        Ok(storage)
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the collection directories
    pub fn ensure_directories(&self) -> Result<()> {
        for collection in Collection::ALL {
            fs::create_dir_all(self.collection_dir(collection))?;
        }
        Ok(())
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.base_dir.join(collection.dir_name())
    }

    fn record_path(&self, collection: Collection, id: &impl Display) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{id}.{RECORD_EXT}"))
    }

    /// Run `f` while holding the store-wide write lock
    pub(crate) fn with_lock<R>(&self, f: impl FnOnce() -> Result<R>) -> Result<R> {
        let _guard = FileLock::acquire(self.base_dir.join(LOCK_FILE))?;
        f()
    }

    /// Write a record atomically. Caller holds the lock.
    pub(crate) fn write_record<T: Serialize>(
        &self,
        collection: Collection,
        id: &impl Display,
        value: &T,
    ) -> Result<()> {
        let path = self.record_path(collection, id);
        let tmp = path.with_extension("yaml.tmp");
        let content = serde_yaml::to_string(value)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })?;
        Ok(())
    }

    /// Read one record, `None` if it does not exist
    pub(crate) fn read_record<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &impl Display,
    ) -> Result<Option<T>> {
        let path = self.record_path(collection, id);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(serde_yaml::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DeskError::Io(e)),
        }
    }

    /// Read every record of a collection, in no particular order
    pub(crate) fn read_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let dir = self.collection_dir(collection);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DeskError::Io(e)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                // Removed between listing and reading
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(DeskError::Io(e)),
            };
            let record = serde_yaml::from_str(&content).map_err(|e| {
                tracing::error!(path = %path.display(), "Corrupt record: {e}");
                DeskError::SerializationError(e)
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Whether a record file exists
    pub(crate) fn record_exists(&self, collection: Collection, id: &impl Display) -> bool {
        self.record_path(collection, id).exists()
    }

    /// Remove a record. Returns `false` if it was not there. Caller holds the lock.
    pub(crate) fn remove_record(&self, collection: Collection, id: &impl Display) -> Result<bool> {
        match fs::remove_file(self.record_path(collection, id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DeskError::Io(e)),
        }
    }
}
