use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DATE_FORMAT;
use gymstreak_domain::schedule::{rotation_index, DayType, Schedule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDto {
    pub id: String,
    pub user_id: String,
    pub schedule_type: String,
    /// Sunday first
    pub weekly_days: Option<[bool; 7]>,
    pub rotation_pattern: Option<String>,
    pub current_rotation_day: u32,
    pub last_rotation_advance: Option<String>,
    pub rest_days_allowed: u8,
    pub is_active: bool,
    /// Day zero of a rotation
    pub anchor_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Schedule> for ScheduleDto {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id().as_str().to_string(),
            user_id: schedule.user_id().as_str().to_string(),
            schedule_type: schedule.schedule_type().as_str().to_string(),
            weekly_days: schedule.weekly_days().map(|days| days.flags()),
            rotation_pattern: schedule.rotation_pattern().map(|p| p.to_string()),
            current_rotation_day: schedule.current_rotation_day(),
            last_rotation_advance: schedule
                .last_rotation_advance()
                .map(|d| d.format(DATE_FORMAT).to_string()),
            rest_days_allowed: schedule.rest_days_allowed(),
            is_active: schedule.is_active(),
            anchor_date: schedule.anchor_date().format(DATE_FORMAT).to_string(),
            created_at: schedule.created_at().to_rfc3339(),
            updated_at: schedule.updated_at().to_rfc3339(),
        }
    }
}

/// One calendar day of a user's plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlanDto {
    pub date: String,
    pub weekday: String,
    pub day_type: String,
    /// Rotation slot for the day, rotating schedules only
    pub rotation_token: Option<String>,
    pub is_today: bool,
}

impl DayPlanDto {
    pub fn new(
        schedule: Option<&Schedule>,
        date: NaiveDate,
        day_type: DayType,
        today: NaiveDate,
    ) -> Self {
        let rotation_token = schedule
            .filter(|s| s.is_active())
            .and_then(|s| {
                let index = rotation_index(s, date)?;
                s.rotation_pattern()?.get(index)
            })
            .map(|token| token.as_str().to_string());

        Self {
            date: date.format(DATE_FORMAT).to_string(),
            weekday: date.weekday().to_string(),
            day_type: day_type.as_str().to_string(),
            rotation_token,
            is_today: date == today,
        }
    }
}
