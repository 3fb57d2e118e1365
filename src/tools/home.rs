//! Tool for the home view
//!
//! This module implements the habit_home MCP tool: every habit with its
//! streaks, today's date, the weekly summary and any pending milestone
//! notification.

use chrono::NaiveDate;
use serde::Serialize;
use crate::analytics::{AnalyticsEngine, WeeklySummary};
use crate::domain::Habit;
use crate::storage::{HabitStorage, StorageError};

/// Everything shown on the home view
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub today: NaiveDate,
    pub habits: Vec<Habit>,
    /// One-shot milestone message carried over from the last mark-done
    pub notification: Option<String>,
    pub weekly_summary: Option<WeeklySummary>,
    /// Text rendering of the fields above
    pub message: String,
}

/// Build the home view from the current store
///
/// `notification` is the message the caller is holding from an earlier
/// mark-done; it is shown exactly as passed and not retained anywhere.
pub fn home_view<S: HabitStorage>(
    storage: &S,
    today: NaiveDate,
    notification: Option<String>,
) -> Result<HomeView, StorageError> {
    let habits = storage.load_habits()?;
    let weekly_summary = AnalyticsEngine::new().weekly_summary(&habits, today);

    let message = render(&habits, today, notification.as_deref(), weekly_summary.as_ref());

    Ok(HomeView {
        today,
        habits,
        notification,
        weekly_summary,
        message,
    })
}

fn render(
    habits: &[Habit],
    today: NaiveDate,
    notification: Option<&str>,
    summary: Option<&WeeklySummary>,
) -> String {
    let mut sections = vec![format!("📅 Today: {}", today)];

    if let Some(notification) = notification {
        sections.push(format!("🎉 {}", notification));
    }

    if habits.is_empty() {
        sections.push("No habits yet. Create your first habit to get started!".to_string());
    } else {
        let list = habits
            .iter()
            .map(|h| {
                let status = if h.is_done_on(today) { "✅ done today" } else { "⬜ not done yet" };
                format!(
                    "🎯 {} ({})\n   Current streak: {} days | Best: {} days | {}",
                    h.name, h.id, h.streak, h.longest_streak, status
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        sections.push(list);
    }

    if let Some(summary) = summary {
        sections.push(format!("📊 {}", summary.message));
    }

    sections.join("\n\n")
}
