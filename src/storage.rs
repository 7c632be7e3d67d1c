//! Storage layer for taskgrid
//!
//! The entire task collection lives in one JSON blob on disk, read at
//! startup and overwritten wholesale on every mutation. The blob path is
//! resolved in precedence order:
//!
//! 1. `--data-file` flag / `TASKGRID_DATA_FILE` env
//! 2. `data_file` in `taskgrid.toml`
//! 3. the platform data directory (e.g. `~/.local/share/taskgrid/tasks.json`)

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// File name of the task blob inside the data directory
pub const BLOB_FILE: &str = "tasks.json";

/// Storage manager for the persisted task blob
#[derive(Debug, Clone)]
pub struct Storage {
    blob_path: PathBuf,
}

impl Storage {
    /// Create a storage manager writing to the given blob path
    pub fn new(blob_path: PathBuf) -> Self {
        Self { blob_path }
    }

    /// Create storage at the platform default location
    pub fn default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "taskgrid").ok_or(Error::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join(BLOB_FILE)))
    }

    /// Resolve storage from an explicit override, falling back to the default
    pub fn resolve(data_file: Option<PathBuf>) -> Result<Self> {
        match data_file {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_location(),
        }
    }

    /// Path to the persisted blob
    pub fn blob_path(&self) -> &Path {
        &self.blob_path
    }

    /// Whether a blob exists on disk
    pub fn blob_exists(&self) -> bool {
        self.blob_path.exists()
    }

    /// Read and deserialize the blob
    pub fn read_blob<T: DeserializeOwned>(&self) -> Result<T> {
        let content = fs::read_to_string(&self.blob_path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Serialize and write the blob atomically
    pub fn write_blob<T: Serialize>(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(json.as_bytes())
    }

    /// Write data atomically using temp file + rename
    ///
    /// Readers never see a partially written blob: the file is either the
    /// previous snapshot or the new one.
    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.blob_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.blob_path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, &self.blob_path)
            .map_err(|_| Error::BlobWriteFailed(self.blob_path.clone()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, serde::Deserialize)]
    struct Record {
        id: u32,
        name: String,
    }

    #[test]
    fn blob_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join(BLOB_FILE));

        assert!(!storage.blob_exists());

        let records = vec![
            Record {
                id: 1,
                name: "first".to_string(),
            },
            Record {
                id: 2,
                name: "second".to_string(),
            },
        ];
        storage.write_blob(&records).unwrap();
        assert!(storage.blob_exists());

        let read_back: Vec<Record> = storage.read_blob().unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn write_creates_missing_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("nested/dir").join(BLOB_FILE));

        storage.write_blob(&vec![1u32, 2, 3]).unwrap();
        let read_back: Vec<u32> = storage.read_blob().unwrap();
        assert_eq!(read_back, vec![1, 2, 3]);
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join(BLOB_FILE));

        storage.write_blob(&vec![1u32]).unwrap();
        assert!(!temp.path().join("tasks.tmp").exists());
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.json");
        let storage = Storage::resolve(Some(path.clone())).unwrap();
        assert_eq!(storage.blob_path(), path.as_path());
    }
}
