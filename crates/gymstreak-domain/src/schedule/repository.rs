use async_trait::async_trait;

use super::aggregate::Schedule;
use crate::shared::{DomainError, UserId};

/// Schedule store. At most one schedule exists per user; the store enforces it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Find the schedule belonging to a user
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Schedule>, DomainError>;

    /// Insert or replace the user's schedule (keyed on user)
    async fn save(&self, schedule: &Schedule) -> Result<(), DomainError>;

    /// All active schedules, used by the daily rotation job
    async fn find_all_active(&self) -> Result<Vec<Schedule>, DomainError>;

    /// Remove a user's schedule; returns whether one existed
    async fn delete_by_user_id(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
