//! Habit entity and related functionality
//!
//! This module defines the Habit record that is persisted in the habits
//! document, along with the validation applied when one is created.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{DomainError, EffortEntry, HabitId};

/// A habit the user wants to do every day
///
/// Besides the display name this carries all streak state, so the whole
/// store can be rewritten from a list of these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Identifier derived from the name; documents written before ids
    /// existed omit it, see [`Habit::ensure_id`]
    #[serde(default)]
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Gym")
    pub name: String,
    /// Current consecutive-day count
    #[serde(default)]
    pub streak: u32,
    /// Best streak ever achieved for this habit
    #[serde(default)]
    pub longest_streak: u32,
    /// Day of the most recent completion (None if never completed)
    #[serde(default)]
    pub last_done: Option<NaiveDate>,
    /// Highest milestone already announced during the current run
    #[serde(default)]
    pub last_milestone: u32,
    /// One entry per completion, oldest first
    #[serde(default)]
    pub effort_log: Vec<EffortEntry>,
}

impl Habit {
    /// Create a new habit with zeroed counters and an empty log
    ///
    /// The name is trimmed before it is stored; a name that is empty after
    /// trimming is rejected.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        Self::validate_name(name)?;

        Ok(Self {
            id: HabitId::from_name(name),
            name: name.to_string(),
            streak: 0,
            longest_streak: 0,
            last_done: None,
            last_milestone: 0,
            effort_log: Vec::new(),
        })
    }

    /// Fill in the id for records loaded without one
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id = HabitId::from_name(&self.name);
        }
    }

    /// Whether `identifier` (a name or an id) addresses this habit
    pub fn matches(&self, identifier: &HabitId) -> bool {
        &self.id == identifier
    }

    /// Check if the habit has already been marked done on `date`
    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.last_done == Some(date)
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }
        Ok(())
    }
}
