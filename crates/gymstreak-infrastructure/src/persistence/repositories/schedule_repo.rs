use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use crate::persistence::RepositoryErrorMapper;
use gymstreak_domain::schedule::{
    RotationPattern, Schedule, ScheduleRepository, ScheduleRule, ScheduleType, WeeklyDays,
};
use gymstreak_domain::shared::{DomainError, ScheduleId, UserId};

#[derive(FromRow)]
struct ScheduleRow {
    id: String,
    user_id: String,
    schedule_type: String,
    sunday: bool,
    monday: bool,
    tuesday: bool,
    wednesday: bool,
    thursday: bool,
    friday: bool,
    saturday: bool,
    rotation_pattern: Option<String>,
    current_rotation_day: i64,
    last_rotation_advance: Option<NaiveDate>,
    rest_days_allowed: i64,
    is_active: bool,
    anchor_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ScheduleRow {
    fn try_into_schedule(self) -> Result<Schedule, DomainError> {
        let rule = match ScheduleType::from_str(&self.schedule_type)? {
            ScheduleType::Weekly => ScheduleRule::Weekly(WeeklyDays::from_flags([
                self.sunday,
                self.monday,
                self.tuesday,
                self.wednesday,
                self.thursday,
                self.friday,
                self.saturday,
            ])),
            ScheduleType::Rotating => {
                let raw = self.rotation_pattern.as_deref().ok_or_else(|| {
                    DomainError::DataIntegrity(format!(
                        "Rotating schedule {} has no rotation pattern",
                        self.id
                    ))
                })?;
                let pattern = RotationPattern::parse(raw).map_err(|e| {
                    DomainError::DataIntegrity(format!(
                        "Stored rotation pattern for schedule {} is invalid: {}",
                        self.id, e
                    ))
                })?;
                ScheduleRule::Rotating(pattern)
            }
            ScheduleType::Custom => ScheduleRule::Custom,
        };

        let rest_days_allowed = u8::try_from(self.rest_days_allowed).map_err(|_| {
            DomainError::DataIntegrity(format!(
                "Invalid rest_days_allowed {} for schedule {}",
                self.rest_days_allowed, self.id
            ))
        })?;

        Ok(Schedule::restore(
            ScheduleId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            rule,
            self.current_rotation_day.max(0) as u32,
            self.last_rotation_advance,
            rest_days_allowed,
            self.is_active,
            self.anchor_date.unwrap_or_else(|| self.created_at.date_naive()),
            self.created_at,
            self.updated_at,
        ))
    }
}

pub struct SqliteScheduleRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteScheduleRepository {
    const SELECT_QUERY: &'static str = r#"
        SELECT
            id, user_id, schedule_type,
            sunday, monday, tuesday, wednesday, thursday, friday, saturday,
            rotation_pattern, current_rotation_day, last_rotation_advance,
            rest_days_allowed, is_active, anchor_date, created_at, updated_at
        FROM schedules
    "#;

    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Schedule>, DomainError> {
        let query = format!("{} WHERE user_id = ?1", Self::SELECT_QUERY);

        let row: Option<ScheduleRow> = sqlx::query_as(&query)
            .bind(user_id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find schedule by user ID"))?;

        row.map(ScheduleRow::try_into_schedule).transpose()
    }

    async fn save(&self, schedule: &Schedule) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO schedules (
                id, user_id, schedule_type,
                sunday, monday, tuesday, wednesday, thursday, friday, saturday,
                rotation_pattern, current_rotation_day, last_rotation_advance,
                rest_days_allowed, is_active, anchor_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            ON CONFLICT(user_id) DO UPDATE SET
                id = ?1,
                schedule_type = ?3,
                sunday = ?4,
                monday = ?5,
                tuesday = ?6,
                wednesday = ?7,
                thursday = ?8,
                friday = ?9,
                saturday = ?10,
                rotation_pattern = ?11,
                current_rotation_day = ?12,
                last_rotation_advance = ?13,
                rest_days_allowed = ?14,
                is_active = ?15,
                anchor_date = ?16,
                created_at = ?17,
                updated_at = ?18
        "#;

        let flags = schedule
            .weekly_days()
            .map(WeeklyDays::flags)
            .unwrap_or([false; 7]);

        sqlx::query(query)
            .bind(schedule.id().as_str())
            .bind(schedule.user_id().as_str())
            .bind(schedule.schedule_type().as_str())
            .bind(flags[0])
            .bind(flags[1])
            .bind(flags[2])
            .bind(flags[3])
            .bind(flags[4])
            .bind(flags[5])
            .bind(flags[6])
            .bind(schedule.rotation_pattern().map(|p| p.to_string()))
            .bind(schedule.current_rotation_day() as i64)
            .bind(schedule.last_rotation_advance())
            .bind(schedule.rest_days_allowed() as i64)
            .bind(schedule.is_active())
            .bind(schedule.anchor_date())
            .bind(schedule.created_at())
            .bind(schedule.updated_at())
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Save schedule"))?;

        Ok(())
    }

    async fn find_all_active(&self) -> Result<Vec<Schedule>, DomainError> {
        let query = format!("{} WHERE is_active = 1 ORDER BY created_at ASC", Self::SELECT_QUERY);

        let rows: Vec<ScheduleRow> = sqlx::query_as(&query)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find active schedules"))?;

        rows.into_iter().map(ScheduleRow::try_into_schedule).collect()
    }

    async fn delete_by_user_id(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM schedules WHERE user_id = ?1")
            .bind(user_id.as_str())
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Delete schedule"))?;

        Ok(result.rows_affected() > 0)
    }
}
