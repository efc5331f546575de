use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::RepositoryErrorMapper;
use gymstreak_domain::shared::{DomainError, UserId};
use gymstreak_domain::streak::StreakStats;
use gymstreak_domain::user::{User, UserRepository};

#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    current_streak: i64,
    longest_streak: i64,
    total_checkins: i64,
    streak_updated_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User::restore(
            UserId::from_string(&self.id),
            self.username,
            self.current_streak.max(0) as u32,
            self.longest_streak.max(0) as u32,
            self.total_checkins.max(0) as u32,
            self.streak_updated_at,
            self.created_at,
        )
    }
}

pub struct SqliteUserRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUserRepository {
    const SELECT_QUERY: &'static str = r#"
        SELECT
            id,
            username,
            current_streak,
            longest_streak,
            total_checkins,
            streak_updated_at,
            created_at
        FROM users
    "#;

    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO users (
                id,
                username,
                current_streak,
                longest_streak,
                total_checkins,
                streak_updated_at,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                username = ?2,
                current_streak = ?3,
                longest_streak = ?4,
                total_checkins = ?5,
                streak_updated_at = ?6
        "#;

        sqlx::query(query)
            .bind(user.id().as_str())
            .bind(user.username())
            .bind(user.current_streak() as i64)
            .bind(user.longest_streak() as i64)
            .bind(user.total_checkins() as i64)
            .bind(user.streak_updated_at())
            .bind(user.created_at())
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Save user"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ?1", Self::SELECT_QUERY);

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find user by ID"))?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("{} ORDER BY created_at ASC", Self::SELECT_QUERY);

        let rows: Vec<UserRow> = sqlx::query_as(&query)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find all users"))?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn update_streak_fields(
        &self,
        id: &UserId,
        stats: &StreakStats,
    ) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET current_streak = ?2,
                longest_streak = ?3,
                total_checkins = ?4,
                streak_updated_at = ?5
            WHERE id = ?1
        "#;

        let result = sqlx::query(query)
            .bind(id.as_str())
            .bind(stats.current_streak as i64)
            .bind(stats.longest_streak as i64)
            .bind(stats.total_checkins as i64)
            .bind(Utc::now())
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Update streak fields"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id.to_string()));
        }

        Ok(())
    }
}
