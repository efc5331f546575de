use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{CheckInStatus, WorkoutDetails};
use crate::shared::{CheckInId, DomainError, UserId};

/// A logged day of activity. Append-only: one per user per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIn {
    id: CheckInId,
    user_id: UserId,
    date: NaiveDate,
    status: CheckInStatus,
    workout: Option<WorkoutDetails>,
    created_at: DateTime<Utc>,
}

impl CheckIn {
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        status: CheckInStatus,
        workout: Option<WorkoutDetails>,
    ) -> Result<Self, DomainError> {
        let workout = match workout {
            Some(details) if details.is_empty() => None,
            Some(details) => {
                details.validate()?;
                Some(details)
            }
            None => None,
        };

        Ok(Self {
            id: CheckInId::new(),
            user_id,
            date,
            status,
            workout,
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        id: CheckInId,
        user_id: UserId,
        date: NaiveDate,
        status: CheckInStatus,
        workout: Option<WorkoutDetails>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            status,
            workout,
            created_at,
        }
    }

    pub fn id(&self) -> &CheckInId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> CheckInStatus {
        self.status
    }

    pub fn workout(&self) -> Option<&WorkoutDetails> {
        self.workout.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
