use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::check_in::CheckIn;

/// One item of a user's activity history as seen by the streak scan.
///
/// `Virtual` stands for a scheduled rest day the user did not log. It exists
/// only in memory for the duration of a computation.
#[derive(Debug, Clone)]
pub enum HistoryEntry {
    Real(CheckIn),
    Virtual(NaiveDate),
}

impl HistoryEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            HistoryEntry::Real(check_in) => check_in.date(),
            HistoryEntry::Virtual(date) => *date,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, HistoryEntry::Real(_))
    }
}

/// Output of a streak computation, persisted onto the user by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_checkins: u32,
}
