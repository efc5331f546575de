use chrono::NaiveDate;

use crate::application::commands::command_handler::Command;
use crate::application::dtos::ScheduleDto;

/// Create (or replace) schedule command
#[derive(Debug, Clone)]
pub struct CreateScheduleCommand {
    pub user_id: String,
    /// weekly / rotating / custom
    pub schedule_type: String,
    /// Sunday first; required for weekly schedules
    pub weekly_days: Option<[bool; 7]>,
    /// Comma-separated tokens; required for rotating schedules
    pub rotation_pattern: Option<String>,
    pub rest_days_allowed: u8,
}

impl Command for CreateScheduleCommand {}

/// Create schedule command result
#[derive(Debug, Clone)]
pub struct CreateScheduleResult {
    pub schedule: ScheduleDto,
    pub replaced_existing: bool,
}

/// Deactivate schedule command
#[derive(Debug, Clone)]
pub struct DeactivateScheduleCommand {
    pub user_id: String,
}

impl Command for DeactivateScheduleCommand {}

/// Deactivate schedule command result
#[derive(Debug, Clone)]
pub struct DeactivateScheduleResult {
    pub schedule_id: String,
    pub was_active: bool,
}

/// Advance rotation cursors for every active schedule
#[derive(Debug, Clone, Default)]
pub struct AdvanceRotationCommand {
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

impl Command for AdvanceRotationCommand {}

/// Advance rotation command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceRotationResult {
    pub date: NaiveDate,
    pub advanced: usize,
    pub unchanged: usize,
    pub failed: usize,
}
