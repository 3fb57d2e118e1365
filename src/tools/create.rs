//! Tool for creating new habits
//!
//! This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::domain::Habit;
use crate::storage::{HabitStorage, Mutation, StorageError};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit, e.g. "Gym" or "Morning Run"
    #[serde(default)]
    pub name: String,
}

/// What happened to a create request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateOutcome {
    Created,
    /// A habit with the same id is already tracked
    AlreadyExists,
    /// The name was empty after trimming
    Ignored,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub outcome: CreateOutcome,
    pub habit_id: Option<String>,
    pub message: String,
}

/// Create a new habit using the provided storage
///
/// Empty names and names that collide with an existing habit's id leave the
/// store untouched; neither is reported as an error.
pub fn create_habit<S: HabitStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, StorageError> {
    let habit = match Habit::new(&params.name) {
        Ok(habit) => habit,
        Err(e) => {
            tracing::debug!("Ignoring habit_create: {}", e);
            return Ok(CreateHabitResponse {
                outcome: CreateOutcome::Ignored,
                habit_id: None,
                message: "No habit created: the name was empty.".to_string(),
            });
        }
    };

    let habit_id = habit.id.to_string();
    let name = habit.name.clone();

    let outcome = storage.update_habits(|habits| {
        if habits.iter().any(|h| h.matches(&habit.id)) {
            Mutation::Unchanged(CreateOutcome::AlreadyExists)
        } else {
            habits.push(habit);
            Mutation::Changed(CreateOutcome::Created)
        }
    })?;

    let message = match outcome {
        CreateOutcome::Created => {
            tracing::debug!("Created habit: {} ({})", name, habit_id);
            format!("✅ Created habit '{}'! Ready to start your streak!", name)
        }
        _ => format!("Habit '{}' is already being tracked.", name),
    };

    Ok(CreateHabitResponse {
        outcome,
        habit_id: Some(habit_id),
        message,
    })
}
