use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Classification of a calendar day under a user's schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Workout,
    Rest,
    Unscheduled,
}

impl DayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Workout => "workout",
            DayType::Rest => "rest",
            DayType::Unscheduled => "unscheduled",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Weekly,
    Rotating,
    Custom,
}

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Weekly => "weekly",
            ScheduleType::Rotating => "rotating",
            ScheduleType::Custom => "custom",
        }
    }
}

impl FromStr for ScheduleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(ScheduleType::Weekly),
            "rotating" => Ok(ScheduleType::Rotating),
            "custom" => Ok(ScheduleType::Custom),
            other => Err(DomainError::Validation(format!(
                "Unknown schedule type: {other}"
            ))),
        }
    }
}

/// One slot of a rotation pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationToken {
    Upper,
    Lower,
    Rest,
    Cardio,
    Strength,
    Workout,
}

impl RotationToken {
    pub const ALL: [RotationToken; 6] = [
        RotationToken::Upper,
        RotationToken::Lower,
        RotationToken::Rest,
        RotationToken::Cardio,
        RotationToken::Strength,
        RotationToken::Workout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationToken::Upper => "upper",
            RotationToken::Lower => "lower",
            RotationToken::Rest => "rest",
            RotationToken::Cardio => "cardio",
            RotationToken::Strength => "strength",
            RotationToken::Workout => "workout",
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, RotationToken::Rest)
    }

    pub fn day_type(&self) -> DayType {
        if self.is_rest() {
            DayType::Rest
        } else {
            DayType::Workout
        }
    }
}

impl FromStr for RotationToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        RotationToken::ALL
            .into_iter()
            .find(|token| token.as_str() == normalized)
            .ok_or_else(|| DomainError::InvalidRotationToken(format!("'{}'", s.trim())))
    }
}

impl fmt::Display for RotationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty, validated rotation sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RotationToken>")]
pub struct RotationPattern(Vec<RotationToken>);

impl RotationPattern {
    pub fn new(tokens: Vec<RotationToken>) -> Result<Self, DomainError> {
        if tokens.is_empty() {
            return Err(DomainError::Validation(
                "Rotation pattern cannot be empty".to_string(),
            ));
        }
        Ok(Self(tokens))
    }

    /// Parse the comma-separated wire form, e.g. `"upper,lower,rest"`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let tokens = raw
            .split(',')
            .map(RotationToken::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tokens)
    }

    pub fn tokens(&self) -> &[RotationToken] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rest_days(&self) -> usize {
        self.0.iter().filter(|t| t.is_rest()).count()
    }

    pub fn get(&self, index: usize) -> Option<RotationToken> {
        self.0.get(index).copied()
    }
}

impl TryFrom<Vec<RotationToken>> for RotationPattern {
    type Error = DomainError;

    fn try_from(tokens: Vec<RotationToken>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

impl fmt::Display for RotationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(RotationToken::as_str)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// Per-weekday workout flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDays {
    pub sunday: bool,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
}

impl WeeklyDays {
    /// Build from flags indexed Sunday=0 … Saturday=6
    pub fn from_flags(flags: [bool; 7]) -> Self {
        Self {
            sunday: flags[0],
            monday: flags[1],
            tuesday: flags[2],
            wednesday: flags[3],
            thursday: flags[4],
            friday: flags[5],
            saturday: flags[6],
        }
    }

    pub fn flags(&self) -> [bool; 7] {
        [
            self.sunday,
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
        ]
    }

    pub fn is_workout(&self, weekday: Weekday) -> bool {
        self.flags()[weekday.num_days_from_sunday() as usize]
    }

    pub fn workout_days(&self) -> usize {
        self.flags().iter().filter(|f| **f).count()
    }
}
