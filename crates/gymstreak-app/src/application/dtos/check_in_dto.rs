use serde::{Deserialize, Serialize};

use super::DATE_FORMAT;
use gymstreak_domain::check_in::CheckIn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInDto {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub status: String,
    pub workout_type: Option<String>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<&CheckIn> for CheckInDto {
    fn from(check_in: &CheckIn) -> Self {
        let workout = check_in.workout();

        Self {
            id: check_in.id().as_str().to_string(),
            user_id: check_in.user_id().as_str().to_string(),
            date: check_in.date().format(DATE_FORMAT).to_string(),
            status: check_in.status().as_str().to_string(),
            workout_type: workout.and_then(|w| w.workout_type.clone()),
            duration_minutes: workout.and_then(|w| w.duration_minutes),
            notes: workout.and_then(|w| w.notes.clone()),
            created_at: check_in.created_at().to_rfc3339(),
        }
    }
}
