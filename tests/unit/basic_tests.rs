//! Basic unit tests to verify core functionality through the public API
use chrono::{Duration, NaiveDate};
use habit_streaks::*;
use tempfile::NamedTempFile;

fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap() + Duration::days(n)
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new("Test Habit").unwrap();
        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.id, make_id("test habit"));
    }

    #[test]
    fn test_make_id_equivalences() {
        assert_eq!(make_id("Morning Run"), make_id("morning run"));
        assert_eq!(make_id("Morning Run"), make_id(" Morning Run "));
    }

    #[test]
    fn test_advance_does_not_mutate_input() {
        let habit = Habit::new("Gym").unwrap();
        let outcome = advance(&habit, day(0), EffortScore::DEFAULT);

        assert!(!outcome.is_unchanged());
        assert_eq!(habit.streak, 0);
        assert!(habit.effort_log.is_empty());
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut habit = Habit::new("Read").unwrap();
        let mut states = vec![StreakState::of(&habit)];

        for date in [day(0), day(0), day(1), day(4)] {
            if let StreakOutcome::Advanced { habit: updated, .. } =
                advance(&habit, date, EffortScore::DEFAULT)
            {
                habit = updated;
            }
            states.push(StreakState::of(&habit));
        }

        assert_eq!(
            states,
            vec![
                StreakState::Fresh,
                StreakState::Active(1),
                StreakState::Active(1),
                StreakState::Active(2),
                StreakState::Active(1),
            ]
        );
    }

    #[test]
    fn test_weekly_summary_example() {
        let mut habit = Habit::new("Gym").unwrap();
        habit.effort_log = vec![
            EffortEntry::new(day(6), EffortScore::new(6).unwrap()),
            EffortEntry::new(day(5), EffortScore::new(8).unwrap()),
        ];

        let summary = AnalyticsEngine::new().weekly_summary(&[habit], day(6)).unwrap();

        assert_eq!(summary.completed_days, 2);
        assert_eq!(summary.average_effort, 7.0);
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = JsonFileStorage::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());
    }

    #[tokio::test]
    async fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = HabitTrackerServer::new(temp_file.path().to_path_buf()).await;
        assert!(server.is_ok());
    }
}
