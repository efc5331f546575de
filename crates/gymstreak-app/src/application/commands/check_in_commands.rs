use chrono::NaiveDate;

use crate::application::commands::command_handler::Command;
use crate::application::dtos::{CheckInDto, StreakDto};

/// Log check-in command
#[derive(Debug, Clone)]
pub struct LogCheckInCommand {
    pub user_id: String,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    /// went / missed / rest
    pub status: String,
    pub workout_type: Option<String>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

impl Command for LogCheckInCommand {}

/// Log check-in command result
#[derive(Debug, Clone)]
pub struct LogCheckInResult {
    pub check_in: CheckInDto,
    pub streak: StreakDto,
}
