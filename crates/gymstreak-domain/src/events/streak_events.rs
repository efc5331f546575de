use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::check_in::CheckInStatus;
use crate::events::DomainEvent;
use crate::schedule::ScheduleType;
use crate::shared::{CheckInId, ScheduleId, UserId};
use crate::streak::StreakStats;

macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// A user logged a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInLogged {
    pub user_id: UserId,
    pub check_in_id: CheckInId,
    pub date: NaiveDate,
    pub status: CheckInStatus,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(CheckInLogged);

/// A user's schedule was created or replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfigured {
    pub user_id: UserId,
    pub schedule_id: ScheduleId,
    pub schedule_type: ScheduleType,
    pub replaced_existing: bool,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(ScheduleConfigured);

/// The daily job moved a rotation cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationAdvanced {
    pub user_id: UserId,
    pub schedule_id: ScheduleId,
    pub date: NaiveDate,
    pub current_rotation_day: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(RotationAdvanced);

/// Fresh streak values were persisted onto a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakRecalculated {
    pub user_id: UserId,
    pub previous: StreakStats,
    pub current: StreakStats,
    pub occurred_at: DateTime<Utc>,
}

impl StreakRecalculated {
    pub fn is_new_record(&self) -> bool {
        self.current.longest_streak > self.previous.longest_streak
    }
}

impl_domain_event!(StreakRecalculated);
