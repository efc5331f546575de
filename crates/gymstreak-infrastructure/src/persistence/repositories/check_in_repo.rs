use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

use crate::persistence::RepositoryErrorMapper;
use gymstreak_domain::check_in::{CheckIn, CheckInRepository, CheckInStatus, WorkoutDetails};
use gymstreak_domain::shared::{CheckInId, DomainError, UserId};

#[derive(FromRow)]
struct CheckInRow {
    id: String,
    user_id: String,
    date: NaiveDate,
    status: String,
    workout_type: Option<String>,
    duration_minutes: Option<i64>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl CheckInRow {
    fn try_into_check_in(self) -> Result<CheckIn, DomainError> {
        let status = CheckInStatus::from_str(&self.status).map_err(|e| {
            DomainError::DataIntegrity(format!("Check-in {} has bad status: {}", self.id, e))
        })?;

        let workout = WorkoutDetails {
            workout_type: self.workout_type,
            duration_minutes: self.duration_minutes.and_then(|m| u32::try_from(m).ok()),
            notes: self.notes,
        };
        let workout = (!workout.is_empty()).then_some(workout);

        Ok(CheckIn::restore(
            CheckInId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.date,
            status,
            workout,
            self.created_at,
        ))
    }
}

pub struct SqliteCheckInRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteCheckInRepository {
    const SELECT_QUERY: &'static str = r#"
        SELECT
            id, user_id, date, status,
            workout_type, duration_minutes, notes, created_at
        FROM check_ins
    "#;

    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckInRepository for SqliteCheckInRepository {
    async fn insert(&self, check_in: &CheckIn) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO check_ins (
                id, user_id, date, status,
                workout_type, duration_minutes, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#;

        let workout = check_in.workout();

        sqlx::query(query)
            .bind(check_in.id().as_str())
            .bind(check_in.user_id().as_str())
            .bind(check_in.date())
            .bind(check_in.status().as_str())
            .bind(workout.and_then(|w| w.workout_type.clone()))
            .bind(workout.and_then(|w| w.duration_minutes).map(i64::from))
            .bind(workout.and_then(|w| w.notes.clone()))
            .bind(check_in.created_at())
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                if RepositoryErrorMapper::is_unique_violation(&e) {
                    warn!(
                        user_id = check_in.user_id().as_str(),
                        date = %check_in.date(),
                        "Rejected second check-in for the same day"
                    );
                    DomainError::DuplicateCheckIn(format!(
                        "user {} already checked in on {}",
                        check_in.user_id(),
                        check_in.date()
                    ))
                } else {
                    RepositoryErrorMapper::map_sqlx_error(e, "Insert check-in")
                }
            })?;

        Ok(())
    }

    async fn list_by_user_id(&self, user_id: &UserId) -> Result<Vec<CheckIn>, DomainError> {
        let query = format!("{} WHERE user_id = ?1", Self::SELECT_QUERY);

        let rows: Vec<CheckInRow> = sqlx::query_as(&query)
            .bind(user_id.as_str())
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "List check-ins"))?;

        rows.into_iter().map(CheckInRow::try_into_check_in).collect()
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<CheckIn>, DomainError> {
        let query = format!("{} WHERE user_id = ?1 AND date = ?2", Self::SELECT_QUERY);

        let row: Option<CheckInRow> = sqlx::query_as(&query)
            .bind(user_id.as_str())
            .bind(date)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find check-in by date"))?;

        row.map(CheckInRow::try_into_check_in).transpose()
    }
}
