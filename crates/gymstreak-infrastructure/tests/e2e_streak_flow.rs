//! Streak engine driven end to end through the SQLite repositories.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};

use gymstreak_domain::check_in::{CheckIn, CheckInRepository, CheckInStatus};
use gymstreak_domain::schedule::{
    DayType, RotationPattern, Schedule, ScheduleRepository, ScheduleRule, WeeklyDays,
};
use gymstreak_domain::shared::{DomainError, FixedClock, UserId};
use gymstreak_domain::streak::{StreakEngine, StreakStats};
use gymstreak_domain::user::UserRepository;
use gymstreak_infrastructure::persistence::repositories::{
    SqliteCheckInRepository, SqliteScheduleRepository, SqliteUserRepository,
};

mod test_helpers;

// A Saturday
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

struct Harness {
    users: Arc<SqliteUserRepository>,
    schedules: Arc<SqliteScheduleRepository>,
    check_ins: Arc<SqliteCheckInRepository>,
    engine: StreakEngine,
}

async fn harness() -> (Harness, Arc<sqlx::SqlitePool>) {
    let pool = test_helpers::setup_in_memory_db().await;
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let schedules = Arc::new(SqliteScheduleRepository::new(pool.clone()));
    let check_ins = Arc::new(SqliteCheckInRepository::new(pool.clone()));

    let engine = StreakEngine::new(
        users.clone(),
        schedules.clone(),
        check_ins.clone(),
        Arc::new(FixedClock::new(today())),
    );

    (
        Harness {
            users,
            schedules,
            check_ins,
            engine,
        },
        pool,
    )
}

async fn log(h: &Harness, user_id: &UserId, days_ago: i64, status: CheckInStatus) {
    let check_in = CheckIn::new(
        user_id.clone(),
        today() - Duration::days(days_ago),
        status,
        None,
    )
    .unwrap();
    h.check_ins.insert(&check_in).await.expect("Insert check-in");
}

#[tokio::test]
async fn e2e_weekend_rest_day_keeps_streak_alive() {
    let (h, pool) = harness().await;
    let user = test_helpers::seed_user(&pool, "weekday-lifter").await;

    // Workout Monday to Friday, rest on weekends
    let schedule = Schedule::new(
        user.id().clone(),
        ScheduleRule::Weekly(WeeklyDays::from_flags([
            false, true, true, true, true, true, false,
        ])),
        2,
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
    )
    .unwrap();
    h.schedules.save(&schedule).await.unwrap();

    for days_ago in 1..=5 {
        log(&h, user.id(), days_ago, CheckInStatus::Went).await;
    }

    let report = h.engine.evaluate(user.id(), today()).await.unwrap();

    assert_eq!(report.day_type, DayType::Rest);
    assert!(report.rest_day_inferred);
    assert_eq!(
        report.stats,
        StreakStats {
            current_streak: 6,
            longest_streak: 6,
            total_checkins: 5,
        }
    );

    // Persist and read back, as the application layer does
    h.users
        .update_streak_fields(user.id(), &report.stats)
        .await
        .unwrap();
    let stored = h.users.find_by_id(user.id()).await.unwrap().unwrap();
    assert_eq!(stored.streak_stats(), report.stats);

    // The virtual rest day is never written
    assert!(h
        .check_ins
        .find_by_user_and_date(user.id(), today())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn e2e_rotation_advance_and_streak() {
    let (h, pool) = harness().await;
    let user = test_helpers::seed_user(&pool, "rotator").await;

    // Anchored two days ago: today is index 2, "rest"
    let mut schedule = Schedule::new(
        user.id().clone(),
        ScheduleRule::Rotating(RotationPattern::parse("upper,lower,rest").unwrap()),
        1,
        Utc.with_ymd_and_hms(2024, 6, 13, 18, 0, 0).unwrap(),
    )
    .unwrap();
    assert!(schedule.advance_rotation(today()));
    h.schedules.save(&schedule).await.unwrap();

    log(&h, user.id(), 2, CheckInStatus::Went).await;
    log(&h, user.id(), 1, CheckInStatus::Went).await;

    let stored = h.schedules.find_by_user_id(user.id()).await.unwrap().unwrap();
    assert_eq!(stored.current_rotation_day(), 2);

    let stats = h.engine.compute_streak(user.id()).await.unwrap();
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.total_checkins, 2);

    // Logging the rest day explicitly replaces the virtual entry
    log(&h, user.id(), 0, CheckInStatus::Rest).await;
    let stats = h.engine.compute_streak(user.id()).await.unwrap();
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.total_checkins, 3);
}

#[tokio::test]
async fn e2e_missing_user_and_no_schedule() {
    let (h, pool) = harness().await;

    let result = h.engine.compute_streak(&UserId::new()).await;
    assert!(matches!(result, Err(DomainError::UserNotFound(_))));

    let user = test_helpers::seed_user(&pool, "freestyle").await;
    log(&h, user.id(), 0, CheckInStatus::Went).await;
    log(&h, user.id(), 2, CheckInStatus::Went).await;
    log(&h, user.id(), 3, CheckInStatus::Went).await;

    let stats = h.engine.compute_streak(user.id()).await.unwrap();
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.total_checkins, 3);
}
