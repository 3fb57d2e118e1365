//! Identity types used throughout the domain layer
//!
//! Habits are keyed by an identifier derived from their name, so the same
//! habit can be addressed as "Morning Run", "morning run" or "morning_run".

use std::fmt;
use serde::{Deserialize, Serialize};

/// Stable identifier for a habit
///
/// Derived purely from the habit's name: trimmed, lowercased, with whitespace
/// and forward slashes replaced by underscores. Deriving an id from an id
/// yields the same id, so clients may pass either form back in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Derive the identifier for a habit name
    pub fn from_name(name: &str) -> Self {
        let id = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() || c == '/' { '_' } else { c })
            .collect();
        Self(id)
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for records loaded without an id
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-function form of [`HabitId::from_name`]
pub fn make_id(name: &str) -> HabitId {
    HabitId::from_name(name)
}
