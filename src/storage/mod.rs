//! Storage layer for persisting habit data
//!
//! Habits live in a single JSON document that is reloaded wholesale at the
//! start of every operation and rewritten wholesale after every mutation.

pub mod json_file;

// Re-export the main storage types
pub use json_file::*;

use std::path::PathBuf;
use thiserror::Error;
use crate::domain::Habit;

/// Errors that can occur during storage operations
///
/// These are never swallowed: a habits document that cannot be read or
/// written is reported to the caller.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access habits file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to lock habits file {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a mutation did to the loaded habits
///
/// `Changed` results are flushed back to storage, `Unchanged` ones are not.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    Changed(T),
    Unchanged(T),
}

impl<T> Mutation<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, Mutation::Changed(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Mutation::Changed(value) | Mutation::Unchanged(value) => value,
        }
    }
}

/// Trait defining the storage interface for habits
///
/// Implementations own every habit record. There is no partial update:
/// callers load the full list, mutate it, and the whole list is written back.
pub trait HabitStorage {
    /// Load every habit, in stored order
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Replace the stored habits with `habits`
    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError>;

    /// Reload, mutate and flush under exclusive access
    ///
    /// The habits are flushed only when `mutate` reports a change. Exclusive
    /// access is released on every exit path, including errors.
    fn update_habits<T, F>(&self, mutate: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Vec<Habit>) -> Mutation<T>;
}
