//! Tool for deleting habits
//!
//! This module implements the habit_delete MCP tool. Deletion is permanent:
//! the record and its effort log are dropped from the document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::domain::HabitId;
use crate::storage::{HabitStorage, Mutation, StorageError};

/// Parameters for deleting a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// Name or id of the habit to delete (case-insensitive)
    #[serde(default)]
    pub habit: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    /// Number of records removed (0 when nothing matched)
    pub removed: usize,
    pub message: String,
}

/// Delete every habit matching the identifier
pub fn delete_habit<S: HabitStorage>(
    storage: &S,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, StorageError> {
    let habit_id = HabitId::from_name(&params.habit);

    let removed = storage.update_habits(|habits| {
        let before = habits.len();
        habits.retain(|h| !h.matches(&habit_id));
        match before - habits.len() {
            0 => Mutation::Unchanged(0),
            n => Mutation::Changed(n),
        }
    })?;

    let message = if removed == 0 {
        format!("No habit matches '{}'.", params.habit.trim())
    } else {
        tracing::debug!("Deleted habit: {}", habit_id);
        format!("🗑️ Deleted habit '{}'.", habit_id)
    };

    Ok(DeleteHabitResponse { removed, message })
}
