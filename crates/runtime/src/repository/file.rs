//! File-backed DataStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::error::{RepositoryError, Result};
use super::memory::JsonStore;
use super::save::SaveData;
use super::traits::DataStore;

/// JSON document persisted to a single file.
///
/// Writes stay in memory until [`DataStore::flush`], which replaces the file
/// atomically (temp file + rename).
pub struct FileDataStore {
    path: PathBuf,
    store: JsonStore,
    dirty: bool,
}

impl FileDataStore {
    /// Opens `path`, creating its directory. Missing top-level sections are
    /// filled from [`SaveData::default`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }

        let mut store = if path.exists() {
            let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
            let root: Value = serde_json::from_slice(&bytes).map_err(|e| {
                RepositoryError::CorruptedData(format!("{}: {}", path.display(), e))
            })?;
            if !root.is_object() {
                return Err(RepositoryError::CorruptedData(format!(
                    "{}: save root is not an object",
                    path.display()
                )));
            }
            tracing::debug!("Loaded save data from {}", path.display());
            JsonStore::from_value(root)
        } else {
            tracing::info!("No save data at {}, starting fresh", path.display());
            JsonStore::new()
        };
        store.fill_missing(SaveData::default().to_value()?);

        Ok(Self {
            path,
            store,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl DataStore for FileDataStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.store.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.store.set(key, value)?;
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(self.store.value())?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        self.dirty = false;
        tracing::debug!("Saved data to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flush_persists_and_reopen_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("save.json");

        let mut store = FileDataStore::open(&path).unwrap();
        assert!(!path.exists());
        store.set("player.direction", json!("UP")).unwrap();
        assert!(store.is_dirty());
        store.flush().unwrap();
        assert!(!store.is_dirty());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = FileDataStore::open(&path).unwrap();
        assert_eq!(reopened.get("player.direction"), Some(&json!("UP")));
        assert_eq!(reopened.get("options.sound"), Some(&json!("ON")));
    }

    #[test]
    fn garbage_file_is_corrupted_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, b"not json").unwrap();

        assert!(matches!(
            FileDataStore::open(&path),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
