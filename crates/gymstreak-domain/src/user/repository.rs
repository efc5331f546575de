use async_trait::async_trait;

use super::aggregate::User;
use crate::shared::{DomainError, UserId};
use crate::streak::StreakStats;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Persist the derived streak fields only
    async fn update_streak_fields(
        &self,
        id: &UserId,
        stats: &StreakStats,
    ) -> Result<(), DomainError>;
}
