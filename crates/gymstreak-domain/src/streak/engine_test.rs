#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::check_in::{CheckIn, CheckInStatus, MockCheckInRepository};
    use crate::schedule::{
        DayType, MockScheduleRepository, RotationPattern, Schedule, ScheduleRule, WeeklyDays,
    };
    use crate::shared::{DomainError, FixedClock, UserId};
    use crate::user::{MockUserRepository, User};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    struct Fixture {
        user_id: UserId,
        users: MockUserRepository,
        schedules: MockScheduleRepository,
        check_ins: MockCheckInRepository,
    }

    impl Fixture {
        fn new(schedule: Option<Schedule>, days_ago: &[i64]) -> Self {
            let user = User::new("lifter".to_string()).unwrap();
            let user_id = user.id().clone();

            let mut users = MockUserRepository::new();
            users
                .expect_find_by_id()
                .returning(move |_| Ok(Some(user.clone())));

            let history: Vec<CheckIn> = days_ago
                .iter()
                .map(|d| {
                    CheckIn::new(
                        user_id.clone(),
                        today() - Duration::days(*d),
                        CheckInStatus::Went,
                        None,
                    )
                    .unwrap()
                })
                .collect();

            let mut check_ins = MockCheckInRepository::new();
            check_ins
                .expect_list_by_user_id()
                .returning(move |_| Ok(history.clone()));

            let mut schedules = MockScheduleRepository::new();
            schedules
                .expect_find_by_user_id()
                .returning(move |_| Ok(schedule.clone()));

            Self {
                user_id,
                users,
                schedules,
                check_ins,
            }
        }

        fn engine(self) -> (UserId, StreakEngine) {
            let engine = StreakEngine::new(
                Arc::new(self.users),
                Arc::new(self.schedules),
                Arc::new(self.check_ins),
                Arc::new(FixedClock::new(today())),
            );
            (self.user_id, engine)
        }
    }

    fn rest_every_day(user_id: &UserId) -> Schedule {
        Schedule::new(
            user_id.clone(),
            ScheduleRule::Weekly(WeeklyDays::from_flags([false; 7])),
            7,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn workout_every_day(user_id: &UserId) -> Schedule {
        Schedule::new(
            user_id.clone(),
            ScheduleRule::Weekly(WeeklyDays::from_flags([true; 7])),
            0,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_user_is_fatal() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let engine = StreakEngine::new(
            Arc::new(users),
            Arc::new(MockScheduleRepository::new()),
            Arc::new(MockCheckInRepository::new()),
            Arc::new(FixedClock::new(today())),
        );

        let result = engine.compute_streak(&UserId::new()).await;
        assert!(matches!(result, Err(DomainError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_scheduled_rest_day_without_history() {
        let owner = UserId::new();
        let (user_id, engine) = Fixture::new(Some(rest_every_day(&owner)), &[]).engine();

        let stats = engine.compute_streak(&user_id).await.unwrap();

        assert_eq!(
            stats,
            StreakStats {
                current_streak: 1,
                longest_streak: 1,
                total_checkins: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_rotation_rest_day_extends_streak() {
        // Pattern anchored so today lands on "rest"
        let anchor = Utc.with_ymd_and_hms(2024, 6, 13, 7, 0, 0).unwrap();
        let schedule = Schedule::new(
            UserId::new(),
            ScheduleRule::Rotating(RotationPattern::parse("upper,lower,rest").unwrap()),
            1,
            anchor,
        )
        .unwrap();
        let (user_id, engine) = Fixture::new(Some(schedule), &[1, 2]).engine();

        let report = engine.evaluate(&user_id, today()).await.unwrap();

        assert_eq!(report.day_type, DayType::Rest);
        assert!(report.rest_day_inferred);
        assert!(!report.logged_today);
        assert_eq!(report.stats.current_streak, 3);
        assert_eq!(report.stats.total_checkins, 2);
        assert_eq!(report.last_check_in_date, Some(today() - Duration::days(1)));
    }

    #[tokio::test]
    async fn test_three_consecutive_days_without_schedule() {
        let (user_id, engine) = Fixture::new(None, &[0, 1, 2]).engine();

        let stats = engine.compute_streak(&user_id).await.unwrap();

        assert_eq!(stats.current_streak, 3);
        assert!(stats.longest_streak >= 3);
        assert_eq!(stats.total_checkins, 3);
    }

    #[tokio::test]
    async fn test_one_day_gap() {
        let (user_id, engine) = Fixture::new(None, &[0, 2, 3]).engine();

        let stats = engine.compute_streak(&user_id).await.unwrap();

        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 2);
    }

    #[tokio::test]
    async fn test_unsorted_repository_output_is_sorted() {
        let (user_id, engine) = Fixture::new(None, &[2, 0, 3, 1]).engine();

        let stats = engine.compute_streak(&user_id).await.unwrap();

        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.longest_streak, 4);
    }

    #[tokio::test]
    async fn test_logged_rest_day_is_not_duplicated() {
        let owner = UserId::new();
        let (user_id, engine) = Fixture::new(Some(rest_every_day(&owner)), &[0, 1]).engine();

        let report = engine.evaluate(&user_id, today()).await.unwrap();

        assert!(!report.rest_day_inferred);
        assert!(report.logged_today);
        assert_eq!(report.stats.current_streak, 2);
        assert_eq!(report.stats.total_checkins, 2);
    }

    #[tokio::test]
    async fn test_unlogged_workout_day_breaks_streak() {
        let owner = UserId::new();
        let (user_id, engine) =
            Fixture::new(Some(workout_every_day(&owner)), &[1, 2, 3]).engine();

        let report = engine.evaluate(&user_id, today()).await.unwrap();

        assert_eq!(report.day_type, DayType::Workout);
        assert_eq!(report.stats.current_streak, 0);
        assert_eq!(report.stats.longest_streak, 3);
    }

    #[tokio::test]
    async fn test_inactive_rest_schedule_never_infers() {
        let owner = UserId::new();
        let mut schedule = rest_every_day(&owner);
        schedule.deactivate();
        let (user_id, engine) = Fixture::new(Some(schedule), &[]).engine();

        let report = engine.evaluate(&user_id, today()).await.unwrap();

        assert_eq!(report.day_type, DayType::Unscheduled);
        assert_eq!(report.stats, StreakStats::default());
    }

    #[tokio::test]
    async fn test_as_of_an_earlier_day() {
        let (user_id, engine) = Fixture::new(None, &[1, 2, 3]).engine();

        let stats = engine
            .compute_streak_as_of(&user_id, today() - Duration::days(1))
            .await
            .unwrap();

        assert_eq!(stats.current_streak, 3);
    }

    #[test]
    fn test_build_history_places_virtual_entry_in_order() {
        let user_id = UserId::new();
        let future = CheckIn::new(
            user_id.clone(),
            today() + Duration::days(1),
            CheckInStatus::Went,
            None,
        )
        .unwrap();
        let past = CheckIn::new(
            user_id,
            today() - Duration::days(1),
            CheckInStatus::Went,
            None,
        )
        .unwrap();

        let history = StreakEngine::build_history(vec![past, future], DayType::Rest, today());
        let dates: Vec<NaiveDate> = history.iter().map(HistoryEntry::date).collect();

        assert_eq!(
            dates,
            vec![
                today() + Duration::days(1),
                today(),
                today() - Duration::days(1)
            ]
        );
        assert!(!history[1].is_persisted());
    }
}
