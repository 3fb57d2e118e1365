//! Tool for the weekly effort summary
//!
//! This module implements the habit_weekly_summary MCP tool.

use chrono::NaiveDate;
use crate::analytics::{AnalyticsEngine, WeeklySummary};
use crate::storage::{HabitStorage, StorageError};

/// Summarize the seven days ending on `today` across all habits
pub fn weekly_summary<S: HabitStorage>(
    storage: &S,
    today: NaiveDate,
) -> Result<Option<WeeklySummary>, StorageError> {
    let habits = storage.load_habits()?;
    Ok(AnalyticsEngine::new().weekly_summary(&habits, today))
}
