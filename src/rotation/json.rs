//! JSON file rotation backend.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::PersistenceError;
use crate::rotation::PersistenceBackend;

/// Rotation flags in a single JSON file.
///
/// `set` only updates the in-memory map; `flush` serializes the whole map
/// and replaces the file atomically (write to a sibling temp file, then
/// rename), so a crash mid-flush leaves the previous file intact.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    values: HashMap<String, bool>,
}

impl JsonFileBackend {
    /// Open the backend, loading existing flags if the file is present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let values = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            HashMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl PersistenceBackend for JsonFileBackend {
    fn get(&self, id: &str) -> Result<Option<bool>, PersistenceError> {
        Ok(self.values.get(id).copied())
    }

    fn set(&mut self, id: &str, in_rotation: bool) -> Result<(), PersistenceError> {
        self.values.insert(id.to_string(), in_rotation);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        debug!("rotation file written: {}", self.path.display());
        Ok(())
    }
}
