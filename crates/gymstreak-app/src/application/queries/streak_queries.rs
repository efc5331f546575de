use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::application::dtos::{DayPlanDto, ScheduleDto, StreakDto};
use gymstreak_domain::schedule::{resolve_day_type, resolve_range, Schedule, ScheduleRepository};
use gymstreak_domain::shared::{Clock, DomainError, UserId};
use gymstreak_domain::streak::StreakEngine;
use gymstreak_domain::user::UserRepository;

const WEEK_DAYS: u32 = 7;

/// Read side: nothing here writes to storage
pub struct StreakQueries {
    engine: Arc<StreakEngine>,
    user_repo: Arc<dyn UserRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    clock: Arc<dyn Clock>,
}

impl StreakQueries {
    pub fn new(
        engine: Arc<StreakEngine>,
        user_repo: Arc<dyn UserRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine,
            user_repo,
            schedule_repo,
            clock,
        }
    }

    /// Live streak as of today, computed without persisting
    pub async fn get_streak(&self, user_id: &str) -> Result<StreakDto, DomainError> {
        let user_id = UserId::from_string(user_id);
        let report = self.engine.evaluate(&user_id, self.clock.today()).await?;
        let dto = StreakDto::from_report(&user_id, &report);

        info!(
            "[streak] get_streak user_id={} current={} longest={} total={}",
            dto.user_id, dto.current_streak, dto.longest_streak, dto.total_checkins
        );

        Ok(dto)
    }

    pub async fn get_day_type(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<DayPlanDto, DomainError> {
        let schedule = self.load_schedule(user_id).await?;
        let day_type = resolve_day_type(schedule.as_ref(), date);

        Ok(DayPlanDto::new(
            schedule.as_ref(),
            date,
            day_type,
            self.clock.today(),
        ))
    }

    /// Seven consecutive days starting at `start` (today when omitted)
    pub async fn get_week_plan(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
    ) -> Result<Vec<DayPlanDto>, DomainError> {
        let schedule = self.load_schedule(user_id).await?;
        let today = self.clock.today();
        let start = start.unwrap_or(today);

        Ok(resolve_range(schedule.as_ref(), start, WEEK_DAYS)
            .into_iter()
            .map(|(date, day_type)| DayPlanDto::new(schedule.as_ref(), date, day_type, today))
            .collect())
    }

    pub async fn get_schedule(&self, user_id: &str) -> Result<Option<ScheduleDto>, DomainError> {
        Ok(self
            .load_schedule(user_id)
            .await?
            .as_ref()
            .map(ScheduleDto::from))
    }

    async fn load_schedule(&self, user_id: &str) -> Result<Option<Schedule>, DomainError> {
        let user_id = UserId::from_string(user_id);
        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(user_id.to_string()));
        }
        self.schedule_repo.find_by_user_id(&user_id).await
    }
}
