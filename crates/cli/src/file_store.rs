//! File-backed key-value store.
//!
//! The file holds one JSON object mapping keys to raw string values, the same
//! shape as browser local storage. A missing file is an empty store.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use legumechanics_core::{KeyValueStore, StorageError};

/// [`KeyValueStore`] persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                StorageError::with_source(
                    format!("{} is not a storage file", self.path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::with_source(
                format!("failed to read {}", self.path.display()),
                e,
            )),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    /// Rewrites the whole file. Other keys are preserved; a file that is not
    /// a storage object is left untouched and the write fails.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);

        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| StorageError::with_source("failed to encode storage file", e))?;
        write_atomic(&self.path, json.as_bytes())
    }
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
///
/// Readers see either the old file or the new one, never a partial write.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let tmp_path = path.with_extension(format!("tmp-{}", std::process::id()));
    let write_err = |e: std::io::Error| {
        StorageError::with_source(format!("failed to write {}", tmp_path.display()), e)
    };

    let mut file = File::create(&tmp_path).map_err(write_err)?;
    file.write_all(bytes).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    drop(file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StorageError::with_source(format!("failed to replace {}", path.display()), e)
    })
}
