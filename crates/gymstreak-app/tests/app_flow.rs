//! Commands, queries and the daily job wired over an in-memory SQLite database.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use gymstreak_domain::shared::{DomainError, FixedClock, UserId};
use gymstreak_domain::user::UserRepository;
use gymstreak_infrastructure::{AppConfig, Database};
use gymstreak_lib::application::commands::check_in_commands::LogCheckInCommand;
use gymstreak_lib::application::commands::schedule_commands::{
    CreateScheduleCommand, DeactivateScheduleCommand,
};
use gymstreak_lib::application::commands::user_commands::RegisterUserCommand;
use gymstreak_lib::application::commands::CommandHandler;
use gymstreak_lib::{bootstrap, bootstrap_with_database, AppState};

async fn app_at(today: NaiveDate) -> AppState {
    let db = Database::new_in_memory()
        .await
        .expect("Open in-memory database");
    bootstrap_with_database(db, Arc::new(FixedClock::new(today)), &AppConfig::default())
        .await
        .expect("Bootstrap application")
}

async fn register(state: &AppState, username: &str) -> String {
    state
        .command_handlers
        .register_user
        .handle(RegisterUserCommand {
            username: username.to_string(),
        })
        .await
        .expect("Register user")
        .user_id
}

fn check_in(user_id: &str, date: NaiveDate, status: &str) -> LogCheckInCommand {
    LogCheckInCommand {
        user_id: user_id.to_string(),
        date: Some(date),
        status: status.to_string(),
        workout_type: None,
        duration_minutes: None,
        notes: None,
    }
}

#[tokio::test]
async fn scheduled_rest_day_counts_toward_streak() {
    // Day zero is today's rest slot; the two days before wrap to upper, lower
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let start = today - Duration::days(2);
    let state = app_at(today).await;
    let user_id = register(&state, "rotator").await;

    state
        .command_handlers
        .create_schedule
        .handle(CreateScheduleCommand {
            user_id: user_id.clone(),
            schedule_type: "rotating".to_string(),
            weekly_days: None,
            rotation_pattern: Some("rest,upper,lower".to_string()),
            rest_days_allowed: 1,
        })
        .await
        .expect("Create schedule");

    let log = &state.command_handlers.log_check_in;
    let first = log.handle(check_in(&user_id, start, "went")).await.unwrap();
    assert_eq!(first.streak.current_streak, 1);
    let second = log
        .handle(check_in(&user_id, start + Duration::days(1), "went"))
        .await
        .unwrap();
    assert_eq!(second.streak.current_streak, 3);

    let streak = state.queries.streak.get_streak(&user_id).await.unwrap();
    assert_eq!(streak.day_type, "rest");
    assert!(streak.rest_day_inferred);
    assert_eq!(streak.current_streak, 3);
    assert_eq!(streak.total_checkins, 2);

    let plan = state
        .queries
        .streak
        .get_week_plan(&user_id, Some(start))
        .await
        .unwrap();
    let tokens: Vec<_> = plan
        .iter()
        .map(|d| d.rotation_token.clone().unwrap_or_default())
        .collect();
    assert_eq!(
        tokens,
        vec!["upper", "lower", "rest", "upper", "lower", "rest", "upper"]
    );
}

#[tokio::test]
async fn daily_job_advances_and_persists_streaks() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let start = today - Duration::days(2);
    let state = app_at(today).await;
    let user_id = register(&state, "nightly").await;

    state
        .command_handlers
        .create_schedule
        .handle(CreateScheduleCommand {
            user_id: user_id.clone(),
            schedule_type: "rotating".to_string(),
            weekly_days: None,
            rotation_pattern: Some("rest,upper,lower".to_string()),
            rest_days_allowed: 1,
        })
        .await
        .unwrap();
    for offset in 0..2 {
        state
            .command_handlers
            .log_check_in
            .handle(check_in(&user_id, start + Duration::days(offset), "went"))
            .await
            .unwrap();
    }

    let (advanced, refreshed) = state.services.scheduler.run_once().await.unwrap();
    assert_eq!(advanced.date, today);
    assert_eq!(advanced.advanced, 1);
    assert_eq!(refreshed.refreshed, 1);

    let (again, _) = state.services.scheduler.run_once().await.unwrap();
    assert_eq!(again.advanced, 0);

    let schedule = state
        .queries
        .streak
        .get_schedule(&user_id)
        .await
        .unwrap()
        .expect("Schedule should exist");
    assert_eq!(schedule.current_rotation_day, 0);
    assert_eq!(schedule.last_rotation_advance.as_deref(), Some("2024-06-15"));

    let stored = state
        .repositories
        .user
        .find_by_id(&UserId::from_string(&user_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.current_streak(), 3);
    assert_eq!(stored.total_checkins(), 2);
}

#[tokio::test]
async fn duplicate_check_in_and_deactivation() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let state = app_at(today).await;
    let user_id = register(&state, "lifter").await;
    let log = &state.command_handlers.log_check_in;

    log.handle(check_in(&user_id, today, "rest")).await.unwrap();
    let duplicate = log.handle(check_in(&user_id, today, "went")).await;
    assert!(matches!(duplicate, Err(DomainError::DuplicateCheckIn(_))));

    let missing = state
        .command_handlers
        .deactivate_schedule
        .handle(DeactivateScheduleCommand {
            user_id: user_id.clone(),
        })
        .await;
    assert!(matches!(missing, Err(DomainError::ScheduleNotFound(_))));
}

#[tokio::test]
async fn bootstrap_creates_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::default()
        .with_database_path(dir.path().join("data").join("gymstreak.db"))
        .with_log_dir(dir.path().join("logs"));

    let state = bootstrap(&config).await.expect("Bootstrap with file database");
    let user_id = register(&state, "on-disk").await;

    assert!(config.database_path.exists());
    assert!(!state.services.scheduler.is_running().await);
    assert_eq!(
        state.queries.streak.get_streak(&user_id).await.unwrap().total_checkins,
        0
    );
}
