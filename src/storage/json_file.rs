//! JSON file implementation of the habit storage interface
//!
//! The document is a pretty-printed JSON array of habit records. Access is
//! serialized through an advisory lock on a sibling `.lock` file so that the
//! reload-mutate-flush cycle of one request cannot interleave with another.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use fs2::FileExt;

use crate::domain::Habit;
use crate::storage::{HabitStorage, Mutation, StorageError};

/// Habits document stored as a flat JSON file
pub struct JsonFileStorage {
    path: PathBuf,
    lock_path: PathBuf,
}

/// Held advisory lock on the habits document; released on drop
struct DocumentLock {
    file: File,
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to release habits file lock: {}", e);
        }
    }
}

impl JsonFileStorage {
    /// Open the habits document at `path`
    ///
    /// Missing parent directories are created, and a missing document is
    /// initialized as an empty list.
    pub fn new(path: PathBuf) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut lock_name = path.as_os_str().to_owned();
        lock_name.push(".lock");
        let storage = Self {
            lock_path: PathBuf::from(lock_name),
            path,
        };

        if !storage.path.exists() {
            let _lock = storage.lock(true)?;
            storage.write_document(&[])?;
        }

        tracing::info!("JSON storage initialized at: {:?}", storage.path);
        Ok(storage)
    }

    /// Location of the habits document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self, exclusive: bool) -> Result<DocumentLock, StorageError> {
        let lock_error = |source: std::io::Error| StorageError::Lock {
            path: self.lock_path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(lock_error)?;

        if exclusive {
            FileExt::lock_exclusive(&file).map_err(lock_error)?;
        } else {
            FileExt::lock_shared(&file).map_err(lock_error)?;
        }
        Ok(DocumentLock { file })
    }

    fn read_document(&self) -> Result<Vec<Habit>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut habits: Vec<Habit> = serde_json::from_str(&content)?;
        for habit in &mut habits {
            habit.ensure_id();
        }
        Ok(habits)
    }

    /// Write the whole document to a temporary file, then move it into place
    fn write_document(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let mut content = serde_json::to_string_pretty(habits)?;
        content.push('\n');

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, content).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {} habits to {:?}", habits.len(), self.path);
        Ok(())
    }
}

impl HabitStorage for JsonFileStorage {
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let _lock = self.lock(false)?;
        self.read_document()
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let _lock = self.lock(true)?;
        self.write_document(habits)
    }

    fn update_habits<T, F>(&self, mutate: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Vec<Habit>) -> Mutation<T>,
    {
        let _lock = self.lock(true)?;
        let mut habits = self.read_document()?;

        let mutation = mutate(&mut habits);
        if mutation.is_changed() {
            self.write_document(&habits)?;
        }
        Ok(mutation.into_inner())
    }
}
