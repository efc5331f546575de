use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::resolver;
use super::value_objects::{RotationPattern, ScheduleType, WeeklyDays};
use crate::shared::{DomainError, ScheduleId, UserId};

/// How a schedule classifies days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleRule {
    Weekly(WeeklyDays),
    Rotating(RotationPattern),
    Custom,
}

impl ScheduleRule {
    pub fn schedule_type(&self) -> ScheduleType {
        match self {
            ScheduleRule::Weekly(_) => ScheduleType::Weekly,
            ScheduleRule::Rotating(_) => ScheduleType::Rotating,
            ScheduleRule::Custom => ScheduleType::Custom,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    id: ScheduleId,
    user_id: UserId,
    rule: ScheduleRule,
    current_rotation_day: u32,
    last_rotation_advance: Option<NaiveDate>,
    rest_days_allowed: u8,
    is_active: bool,
    anchor_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Schedule {
    pub const MAX_REST_DAYS: u8 = 7;

    /// New schedule whose rotation starts on the UTC date of `created_at`
    pub fn new(
        user_id: UserId,
        rule: ScheduleRule,
        rest_days_allowed: u8,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::new_anchored(
            user_id,
            rule,
            rest_days_allowed,
            created_at,
            created_at.date_naive(),
        )
    }

    /// New schedule whose rotation starts on `anchor_date`, the caller's
    /// local calendar day at creation.
    pub fn new_anchored(
        user_id: UserId,
        rule: ScheduleRule,
        rest_days_allowed: u8,
        created_at: DateTime<Utc>,
        anchor_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        Self::validate_rest_days(rest_days_allowed)?;

        Ok(Self {
            id: ScheduleId::new(),
            user_id,
            rule,
            current_rotation_day: 0,
            last_rotation_advance: None,
            rest_days_allowed,
            is_active: true,
            anchor_date,
            created_at,
            updated_at: created_at,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ScheduleId,
        user_id: UserId,
        rule: ScheduleRule,
        current_rotation_day: u32,
        last_rotation_advance: Option<NaiveDate>,
        rest_days_allowed: u8,
        is_active: bool,
        anchor_date: NaiveDate,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            rule,
            current_rotation_day,
            last_rotation_advance,
            rest_days_allowed,
            is_active,
            anchor_date,
            created_at,
            updated_at,
        }
    }

    fn validate_rest_days(rest_days_allowed: u8) -> Result<(), DomainError> {
        if rest_days_allowed > Self::MAX_REST_DAYS {
            return Err(DomainError::Validation(format!(
                "Rest days allowed must be between 0 and {}",
                Self::MAX_REST_DAYS
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn rule(&self) -> &ScheduleRule {
        &self.rule
    }

    pub fn schedule_type(&self) -> ScheduleType {
        self.rule.schedule_type()
    }

    pub fn weekly_days(&self) -> Option<&WeeklyDays> {
        match &self.rule {
            ScheduleRule::Weekly(days) => Some(days),
            _ => None,
        }
    }

    pub fn rotation_pattern(&self) -> Option<&RotationPattern> {
        match &self.rule {
            ScheduleRule::Rotating(pattern) => Some(pattern),
            _ => None,
        }
    }

    pub fn current_rotation_day(&self) -> u32 {
        self.current_rotation_day
    }

    pub fn last_rotation_advance(&self) -> Option<NaiveDate> {
        self.last_rotation_advance
    }

    pub fn rest_days_allowed(&self) -> u8 {
        self.rest_days_allowed
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Calendar day the rotation counts from (day zero)
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    /// Replace the schedule's configuration in place, keeping its identity.
    ///
    /// The rotation restarts with `anchor_date` as the new day zero.
    pub fn reconfigure(
        &mut self,
        rule: ScheduleRule,
        rest_days_allowed: u8,
        configured_at: DateTime<Utc>,
        anchor_date: NaiveDate,
    ) -> Result<(), DomainError> {
        Self::validate_rest_days(rest_days_allowed)?;
        self.rule = rule;
        self.rest_days_allowed = rest_days_allowed;
        self.current_rotation_day = 0;
        self.last_rotation_advance = None;
        self.is_active = true;
        self.anchor_date = anchor_date;
        self.created_at = configured_at;
        self.updated_at = configured_at;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Move the display cursor to `today`'s rotation slot.
    ///
    /// The cursor is derived from the date rather than incremented, so
    /// calling this more than once for the same day changes nothing.
    /// Returns whether the schedule was modified.
    pub fn advance_rotation(&mut self, today: NaiveDate) -> bool {
        if !self.is_active || self.last_rotation_advance == Some(today) {
            return false;
        }

        let Some(index) = resolver::rotation_index(self, today) else {
            return false;
        };

        self.current_rotation_day = index as u32;
        self.last_rotation_advance = Some(today);
        self.updated_at = Utc::now();
        true
    }
}
