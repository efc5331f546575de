use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

use super::calculator::StreakCalculator;
use super::history::{HistoryEntry, StreakStats};
use crate::check_in::{CheckIn, CheckInRepository};
use crate::schedule::{resolve_day_type, DayType, ScheduleRepository};
use crate::shared::{Clock, DomainError, UserId};
use crate::user::UserRepository;

/// Everything one streak evaluation learned about a user's day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakReport {
    pub stats: StreakStats,
    pub today: NaiveDate,
    pub day_type: DayType,
    pub logged_today: bool,
    pub rest_day_inferred: bool,
    pub last_check_in_date: Option<NaiveDate>,
}

/// Computes a user's streak from their schedule and check-in history.
///
/// Reads a snapshot through the injected ports and never writes; persisting
/// the result onto the user is the caller's job.
pub struct StreakEngine {
    user_repo: Arc<dyn UserRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
}

impl StreakEngine {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            schedule_repo,
            check_in_repo,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Streak statistics as of the clock's today
    pub async fn compute_streak(&self, user_id: &UserId) -> Result<StreakStats, DomainError> {
        self.compute_streak_as_of(user_id, self.clock.today()).await
    }

    pub async fn compute_streak_as_of(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<StreakStats, DomainError> {
        Ok(self.evaluate(user_id, today).await?.stats)
    }

    pub async fn evaluate(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<StreakReport, DomainError> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(user_id.to_string()));
        }

        let check_ins = self.check_in_repo.list_by_user_id(user_id).await?;
        let schedule = self.schedule_repo.find_by_user_id(user_id).await?;
        let day_type = resolve_day_type(schedule.as_ref(), today);

        let history = Self::build_history(check_ins, day_type, today);
        let logged_today = history
            .iter()
            .any(|e| e.is_persisted() && e.date() == today);
        let rest_day_inferred = history.iter().any(|e| !e.is_persisted());
        let last_check_in_date = history
            .iter()
            .find(|e| e.is_persisted())
            .map(HistoryEntry::date);

        if rest_day_inferred {
            debug!(
                "[streak] inferred rest day user_id={} date={}",
                user_id, today
            );
        }

        let stats = StreakCalculator::calculate(&history, today)?;

        Ok(StreakReport {
            stats,
            today,
            day_type,
            logged_today,
            rest_day_inferred,
            last_check_in_date,
        })
    }

    /// Newest-first history, with a virtual entry for an unlogged scheduled
    /// rest day today.
    pub fn build_history(
        check_ins: Vec<CheckIn>,
        day_type: DayType,
        today: NaiveDate,
    ) -> Vec<HistoryEntry> {
        let logged_today = check_ins.iter().any(|c| c.date() == today);
        let mut history = Vec::with_capacity(check_ins.len() + 1);

        if day_type == DayType::Rest && !logged_today {
            history.push(HistoryEntry::Virtual(today));
        }
        history.extend(check_ins.into_iter().map(HistoryEntry::Real));
        // Stable: the virtual entry stays ahead of anything else dated today
        history.sort_by(|a, b| b.date().cmp(&a.date()));
        history
    }
}
