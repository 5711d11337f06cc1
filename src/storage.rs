//! Storage layer for tend
//!
//! All durable state lives as whole-structure JSON blobs in a single data
//! directory, one file per key:
//!
//! ```text
//! <data dir>/
//!   .tend.toml        # Optional config overrides
//!   tasks.json        # Task list
//!   locations.json    # Recent-location MRU list
//!   stats.json        # Activity ledger window + focus minutes
//!   history.json      # Undo/redo snapshot log
//!   tend.lock         # Advisory lock guarding blob writes
//! ```
//!
//! The store is a dumb durable cache: a corrupt or unreadable blob falls
//! back to that key's default without aborting startup, and a failed
//! write never touches in-memory state.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};

const TASKS_FILE: &str = "tasks.json";
const LOCATIONS_FILE: &str = "locations.json";
const STATS_FILE: &str = "stats.json";
const HISTORY_FILE: &str = "history.json";
const LOCK_FILE: &str = "tend.lock";

/// Storage manager for the tend data directory
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at an explicit directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve the data directory: explicit override first, then the
    /// `TEND_DATA_DIR` environment variable, then the platform data dir.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }

        if let Some(dir) = std::env::var_os("TEND_DATA_DIR") {
            return Ok(Self::new(PathBuf::from(dir)));
        }

        let dirs = ProjectDirs::from("", "", "tend").ok_or_else(|| {
            Error::OperationFailed("could not determine a data directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    pub fn locations_file(&self) -> PathBuf {
        self.data_dir.join(LOCATIONS_FILE)
    }

    pub fn stats_file(&self) -> PathBuf {
        self.data_dir.join(STATS_FILE)
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE)
    }

    /// Create the data directory if missing
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Read a JSON blob, falling back to `default` when the file is
    /// missing, unreadable, or unparseable. The fallback is per key;
    /// corruption in one blob never blocks loading the others.
    pub fn read_blob_or<T: DeserializeOwned>(&self, path: &Path, default: impl FnOnce() -> T) -> T {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "unreadable blob, using default");
                return default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "corrupt blob, using default");
                default()
            }
        }
    }

    /// Write a JSON blob under the data-dir lock with an atomic rename.
    pub fn write_blob<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        self.init()?;
        let _lock = FileLock::acquire(self.lock_file(), DEFAULT_LOCK_TIMEOUT_MS)?;

        let contents = serde_json::to_vec_pretty(value)?;
        lock::write_atomic(path, &contents).map_err(|err| Error::PersistenceUnavailable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    #[test]
    fn missing_blob_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());

        let tasks: Vec<Task> = storage.read_blob_or(&storage.tasks_file(), Vec::new);
        assert!(tasks.is_empty());
    }

    #[test]
    fn corrupt_blob_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        storage.init().unwrap();
        fs::write(storage.tasks_file(), "{ not json").unwrap();

        let tasks: Vec<Task> = storage.read_blob_or(&storage.tasks_file(), Vec::new);
        assert!(tasks.is_empty());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());

        storage
            .write_blob(&storage.locations_file(), &vec!["office", "home"])
            .unwrap();
        let locations: Vec<String> =
            storage.read_blob_or(&storage.locations_file(), Vec::new);
        assert_eq!(locations, vec!["office", "home"]);
    }
}
