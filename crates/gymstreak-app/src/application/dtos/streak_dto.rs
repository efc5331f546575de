use serde::{Deserialize, Serialize};

use super::DATE_FORMAT;
use gymstreak_domain::shared::UserId;
use gymstreak_domain::streak::StreakReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakDto {
    pub user_id: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_checkins: u32,
    pub today: String,     // YYYY-MM-DD
    pub day_type: String,  // workout / rest / unscheduled
    pub logged_today: bool,
    pub rest_day_inferred: bool,
    pub last_check_in_date: Option<String>,
}

impl StreakDto {
    pub fn from_report(user_id: &UserId, report: &StreakReport) -> Self {
        Self {
            user_id: user_id.as_str().to_string(),
            current_streak: report.stats.current_streak,
            longest_streak: report.stats.longest_streak,
            total_checkins: report.stats.total_checkins,
            today: report.today.format(DATE_FORMAT).to_string(),
            day_type: report.day_type.as_str().to_string(),
            logged_today: report.logged_today,
            rest_day_inferred: report.rest_day_inferred,
            last_check_in_date: report
                .last_check_in_date
                .map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }
}

/// Outcome of refreshing every user's stored streak
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummaryDto {
    pub total_users: usize,
    pub refreshed: usize,
    pub failed: usize,
}
