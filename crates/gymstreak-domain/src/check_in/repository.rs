use async_trait::async_trait;
use chrono::NaiveDate;

use super::aggregate::CheckIn;
use crate::shared::{DomainError, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Insert a new check-in.
    ///
    /// Implementations must reject a second row for the same (user, date) at
    /// the storage level and report it as `DomainError::DuplicateCheckIn`.
    async fn insert(&self, check_in: &CheckIn) -> Result<(), DomainError>;

    /// All check-ins for a user, in no particular order
    async fn list_by_user_id(&self, user_id: &UserId) -> Result<Vec<CheckIn>, DomainError>;

    /// The check-in a user logged on a given date, if any
    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<CheckIn>, DomainError>;
}
