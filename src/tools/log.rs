//! Tool for marking habits done
//!
//! This module implements the habit_done MCP tool. A completion is always
//! recorded for today; the milestone message it triggers, if any, is handed
//! back in the response instead of being stashed anywhere.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::domain::{advance, EffortScore, Habit, HabitId, MessageBook, Milestone, StreakOutcome};
use crate::storage::{HabitStorage, Mutation};
use crate::ServerError;

/// Parameters for marking a habit done
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogHabitParams {
    /// Name or id of the habit (case-insensitive)
    #[serde(default)]
    pub habit: String,
    /// Effort rating from 1 to 10 (defaults to 5)
    pub effort: Option<u8>,
}

/// What happened to a mark-done request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOutcome {
    Advanced,
    AlreadyDoneToday,
    UnknownHabit,
}

/// Response from marking a habit done
#[derive(Debug, Serialize)]
pub struct LogHabitResponse {
    pub outcome: LogOutcome,
    /// The habit as stored after the request, when it exists
    pub habit: Option<Habit>,
    pub milestone: Option<Milestone>,
    /// Milestone message to show once, if this completion reached one
    pub notification: Option<String>,
    pub message: String,
}

/// Mark a habit done on `today` using the provided storage
///
/// Unknown habits and repeated marks on the same day leave the store
/// untouched and are not reported as errors.
pub fn log_habit<S: HabitStorage>(
    storage: &S,
    params: LogHabitParams,
    today: NaiveDate,
) -> Result<LogHabitResponse, ServerError> {
    let effort = EffortScore::from_optional(params.effort)?;
    let habit_id = HabitId::from_name(&params.habit);

    let (outcome, habit, milestone) = storage.update_habits(|habits| {
        let Some(index) = habits.iter().position(|h| h.matches(&habit_id)) else {
            return Mutation::Unchanged((LogOutcome::UnknownHabit, None, None));
        };

        match advance(&habits[index], today, effort) {
            StreakOutcome::Unchanged => Mutation::Unchanged((
                LogOutcome::AlreadyDoneToday,
                Some(habits[index].clone()),
                None,
            )),
            StreakOutcome::Advanced { habit, milestone } => {
                habits[index] = habit.clone();
                Mutation::Changed((LogOutcome::Advanced, Some(habit), milestone))
            }
        }
    })?;

    let notification = match (&habit, milestone) {
        (Some(habit), Some(milestone)) => {
            Some(MessageBook::builtin().message_for(&habit.name, milestone).to_string())
        }
        _ => None,
    };

    let message = match (&outcome, &habit) {
        (LogOutcome::Advanced, Some(habit)) => format!(
            "🔥 Marked '{}' done! Current streak: {} day{} (best: {})",
            habit.name,
            habit.streak,
            if habit.streak == 1 { "" } else { "s" },
            habit.longest_streak
        ),
        (LogOutcome::AlreadyDoneToday, Some(habit)) => {
            format!("'{}' is already marked done today.", habit.name)
        }
        _ => {
            tracing::debug!("Ignoring habit_done for unknown habit '{}'", habit_id);
            format!("No habit matches '{}'.", params.habit.trim())
        }
    };

    Ok(LogHabitResponse {
        outcome,
        habit,
        milestone,
        notification,
        message,
    })
}
