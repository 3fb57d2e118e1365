//! Basic integration tests
use chrono::{Duration, NaiveDate};
use habit_streaks::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 12).unwrap()
}

fn done(storage: &JsonFileStorage, habit: &str, date: NaiveDate) -> LogHabitResponse {
    log_habit(
        storage,
        LogHabitParams { habit: habit.to_string(), effort: None },
        date,
    )
    .expect("mark done failed")
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[test]
    fn test_gym_scenario() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = JsonFileStorage::new(dir.path().join("habits.json")).unwrap();

        let created = create_habit(&storage, CreateHabitParams { name: "Gym".to_string() }).unwrap();
        assert_eq!(created.outcome, CreateOutcome::Created);

        // First completion: day-one milestone
        let first = done(&storage, "Gym", today());
        let habit = first.habit.as_ref().unwrap();
        assert_eq!((habit.streak, habit.longest_streak), (1, 1));
        assert_eq!(first.milestone, Some(Milestone::FirstDay));
        assert!(first.notification.is_some());

        // Same day again: nothing changes
        let repeat = done(&storage, "Gym", today());
        assert_eq!(repeat.outcome, LogOutcome::AlreadyDoneToday);
        assert!(repeat.notification.is_none());
        assert_eq!(storage.load_habits().unwrap()[0].effort_log.len(), 1);

        // Tomorrow continues the streak
        let second = done(&storage, "gym", today() + Duration::days(1));
        assert_eq!(second.habit.as_ref().unwrap().streak, 2);
        assert!(second.milestone.is_none());

        // Skip two days: back to one, best streak kept
        let restart = done(&storage, "GYM", today() + Duration::days(4));
        let habit = restart.habit.as_ref().unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.longest_streak, 2);
        assert_eq!(restart.milestone, Some(Milestone::FirstDay));

        let stored = &storage.load_habits().unwrap()[0];
        assert_eq!(stored.last_done, Some(today() + Duration::days(4)));
        assert_eq!(stored.effort_log.len(), 3);
    }

    #[test]
    fn test_delete_then_mark_done() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = JsonFileStorage::new(dir.path().join("habits.json")).unwrap();
        create_habit(&storage, CreateHabitParams { name: "Walk".to_string() }).unwrap();

        let deleted = delete_habit(&storage, DeleteHabitParams { habit: "walk".to_string() }).unwrap();
        assert_eq!(deleted.removed, 1);

        let response = done(&storage, "walk", today());
        assert_eq!(response.outcome, LogOutcome::UnknownHabit);
        assert!(storage.load_habits().unwrap().is_empty());
    }

    #[test]
    fn test_document_persists_between_servers() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("habits.json");

        let first = tokio_test::block_on(HabitTrackerServer::new(path.clone()))
            .expect("Failed to create first server");
        create_habit(first.storage(), CreateHabitParams { name: "Read".to_string() }).unwrap();
        done(first.storage(), "read", today());

        let second = tokio_test::block_on(HabitTrackerServer::new(path.clone()))
            .expect("Failed to create second server");
        let habits = second.storage().load_habits().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].streak, 1);

        let document: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(document[0]["id"], "read");
        assert_eq!(document[0]["last_done"], today().to_string());
        assert_eq!(document[0]["effort_log"][0], json!({"date": today().to_string(), "effort": 5}));
    }

    #[test]
    fn test_home_view_reports_week() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = JsonFileStorage::new(dir.path().join("habits.json")).unwrap();
        for name in ["Gym", "Read"] {
            create_habit(&storage, CreateHabitParams { name: name.to_string() }).unwrap();
        }
        log_habit(&storage, LogHabitParams { habit: "gym".to_string(), effort: Some(6) }, today() - Duration::days(1)).unwrap();
        log_habit(&storage, LogHabitParams { habit: "read".to_string(), effort: Some(8) }, today()).unwrap();

        let view = home_view(&storage, today(), None).unwrap();

        assert_eq!(view.habits.len(), 2);
        assert!(view.notification.is_none());
        let summary = view.weekly_summary.unwrap();
        assert_eq!(summary.completed_days, 2);
        assert_eq!(summary.average_effort, 7.0);
        assert_eq!(weekly_summary(&storage, today() + Duration::days(7)).unwrap(), None);
    }

    #[tokio::test]
    async fn test_mcp_session() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let server = HabitTrackerServer::new(dir.path().join("habits.json"))
            .await
            .expect("Failed to create server");
        let mut session = McpServer::new(server);

        let request = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "habit_create", "arguments": {"name": "Stretch"}}
        });
        let response = session.handle_line(&request.to_string()).await.unwrap();

        assert_eq!(response.id, json!(7));
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["habit_id"], "stretch");
    }
}
