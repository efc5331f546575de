use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInStatus {
    Went,
    Missed,
    Rest,
}

impl CheckInStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckInStatus::Went => "went",
            CheckInStatus::Missed => "missed",
            CheckInStatus::Rest => "rest",
        }
    }
}

impl FromStr for CheckInStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "went" => Ok(CheckInStatus::Went),
            "missed" => Ok(CheckInStatus::Missed),
            "rest" => Ok(CheckInStatus::Rest),
            other => Err(DomainError::Validation(format!(
                "Unknown check-in status: {other}"
            ))),
        }
    }
}

impl fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional details attached to a check-in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDetails {
    pub workout_type: Option<String>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

impl WorkoutDetails {
    pub const MAX_DURATION_MINUTES: u32 = 24 * 60;
    pub const MAX_NOTES_LEN: usize = 1000;

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(minutes) = self.duration_minutes {
            if minutes == 0 || minutes > Self::MAX_DURATION_MINUTES {
                return Err(DomainError::Validation(format!(
                    "Workout duration must be between 1 and {} minutes",
                    Self::MAX_DURATION_MINUTES
                )));
            }
        }

        if let Some(notes) = &self.notes {
            if notes.chars().count() > Self::MAX_NOTES_LEN {
                return Err(DomainError::Validation(format!(
                    "Notes cannot exceed {} characters",
                    Self::MAX_NOTES_LEN
                )));
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.workout_type.is_none() && self.duration_minutes.is_none() && self.notes.is_none()
    }
}
