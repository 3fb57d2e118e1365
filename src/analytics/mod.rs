//! Analytics engine for summarizing recent habit activity
//!
//! The weekly summary looks at the effort logs of every habit over a rolling
//! seven-day window ending today.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use crate::domain::Habit;

/// Length of the rolling summary window, today included
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Aggregate of completions and effort over the last seven days
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window (today)
    pub end: NaiveDate,
    /// Number of completions logged in the window, across all habits
    pub completed_days: u32,
    /// Mean effort of those completions, rounded to one decimal place
    pub average_effort: f64,
    /// Human-readable rendering of the two numbers above
    pub message: String,
}

/// Analytics engine for processing habit data
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self {}
    }

    /// Summarize the seven days ending on `today`
    ///
    /// Returns `None` when no completion falls in the window, so "no
    /// activity" stays distinct from "activity with a low average".
    pub fn weekly_summary(&self, habits: &[Habit], today: NaiveDate) -> Option<WeeklySummary> {
        let start = today - Duration::days(WEEK_WINDOW_DAYS - 1);

        let (completed_days, total_effort) = habits
            .iter()
            .flat_map(|habit| habit.effort_log.iter())
            .filter(|entry| entry.is_within(start, today))
            .fold((0u32, 0i64), |(count, total), entry| {
                (count + 1, total + entry.effort)
            });

        if completed_days == 0 {
            return None;
        }

        let average_effort = round_to_tenth(total_effort as f64 / f64::from(completed_days));
        let message = format!(
            "This week: you completed {} habit check-ins. Average effort was {:.1}/10.",
            completed_days, average_effort
        );

        Some(WeeklySummary {
            start,
            end: today,
            completed_days,
            average_effort,
            message,
        })
    }
}

/// Round to one decimal place, ties to even (5.25 becomes 5.2)
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EffortEntry, EffortScore};

    fn habit_with(name: &str, log: &[(NaiveDate, u8)]) -> Habit {
        let mut habit = Habit::new(name).unwrap();
        habit.effort_log = log
            .iter()
            .map(|(date, effort)| EffortEntry::new(*date, EffortScore::new(*effort).unwrap()))
            .collect();
        habit
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
    }

    #[test]
    fn test_no_entries_yields_no_summary() {
        let engine = AnalyticsEngine::new();
        assert_eq!(engine.weekly_summary(&[], today()), None);
        assert_eq!(engine.weekly_summary(&[Habit::new("Gym").unwrap()], today()), None);
    }

    #[test]
    fn test_entries_outside_window_are_ignored() {
        let engine = AnalyticsEngine::new();
        let habits = [habit_with(
            "Gym",
            &[(today() - Duration::days(7), 9), (today() + Duration::days(1), 9)],
        )];
        assert_eq!(engine.weekly_summary(&habits, today()), None);
    }

    #[test]
    fn test_summary_counts_and_averages() {
        let engine = AnalyticsEngine::new();
        let habits = [habit_with("Gym", &[(today(), 6), (today() - Duration::days(1), 8)])];

        let summary = engine.weekly_summary(&habits, today()).unwrap();

        assert_eq!(summary.completed_days, 2);
        assert_eq!(summary.average_effort, 7.0);
        assert_eq!(summary.start, today() - Duration::days(6));
        assert_eq!(
            summary.message,
            "This week: you completed 2 habit check-ins. Average effort was 7.0/10."
        );
    }

    #[test]
    fn test_summary_spans_all_habits_and_rounds() {
        let engine = AnalyticsEngine::new();
        let habits = [
            habit_with("Gym", &[(today() - Duration::days(6), 7)]),
            habit_with("Read", &[(today() - Duration::days(2), 8), (today(), 8)]),
            habit_with("Walk", &[(today() - Duration::days(30), 1)]),
        ];

        let summary = engine.weekly_summary(&habits, today()).unwrap();

        assert_eq!(summary.completed_days, 3);
        // 23 / 3 = 7.666..
        assert_eq!(summary.average_effort, 7.7);
    }

    #[test]
    fn test_half_tenths_round_to_even() {
        let engine = AnalyticsEngine::new();
        let day = |n| today() - Duration::days(n);

        // 21 / 4 = 5.25
        let habits = [habit_with("Gym", &[(day(0), 6), (day(1), 5), (day(2), 5), (day(3), 5)])];
        let summary = engine.weekly_summary(&habits, today()).unwrap();
        assert_eq!(summary.average_effort, 5.2);
        assert!(summary.message.ends_with("Average effort was 5.2/10."));

        // 23 / 4 = 5.75
        let habits = [habit_with("Gym", &[(day(0), 8), (day(1), 5), (day(2), 5), (day(3), 5)])];
        let summary = engine.weekly_summary(&habits, today()).unwrap();
        assert_eq!(summary.average_effort, 5.8);
    }

    #[test]
    fn test_stored_efforts_outside_scale_are_averaged() {
        let engine = AnalyticsEngine::new();
        let mut habit = Habit::new("Gym").unwrap();
        habit.effort_log = vec![
            EffortEntry { date: today(), effort: -1 },
            EffortEntry { date: today(), effort: 300 },
        ];

        let summary = engine.weekly_summary(&[habit], today()).unwrap();

        assert_eq!(summary.completed_days, 2);
        assert_eq!(summary.average_effort, 149.5);
    }
}
