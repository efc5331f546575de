use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::schedule_commands::*;
use crate::application::dtos::ScheduleDto;
use gymstreak_domain::events::streak_events::{RotationAdvanced, ScheduleConfigured};
use gymstreak_domain::events::EventBus;
use gymstreak_domain::schedule::{
    RotationPattern, Schedule, ScheduleRepository, ScheduleRule, ScheduleType, WeeklyDays,
};
use gymstreak_domain::shared::{Clock, DomainError, UserId};
use gymstreak_domain::user::UserRepository;

fn build_rule(cmd: &CreateScheduleCommand) -> Result<ScheduleRule, DomainError> {
    match ScheduleType::from_str(&cmd.schedule_type)? {
        ScheduleType::Weekly => {
            let flags = cmd.weekly_days.ok_or_else(|| {
                DomainError::Validation("Weekly schedules need weekly_days".to_string())
            })?;
            Ok(ScheduleRule::Weekly(WeeklyDays::from_flags(flags)))
        }
        ScheduleType::Rotating => {
            let raw = cmd.rotation_pattern.as_deref().ok_or_else(|| {
                DomainError::Validation("Rotating schedules need a rotation_pattern".to_string())
            })?;
            Ok(ScheduleRule::Rotating(RotationPattern::parse(raw)?))
        }
        ScheduleType::Custom => Ok(ScheduleRule::Custom),
    }
}

/// Creates the user's schedule, replacing any existing one.
///
/// The rotation starts on the clock's local today, so day zero matches the
/// dates the resolver is later asked about.
pub struct CreateScheduleCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    clock: Arc<dyn Clock>,
    event_bus: Arc<dyn EventBus>,
}

impl CreateScheduleCommandHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        clock: Arc<dyn Clock>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            user_repo,
            schedule_repo,
            clock,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateScheduleCommand> for CreateScheduleCommandHandler {
    type Result = CreateScheduleResult;

    async fn handle(&self, cmd: CreateScheduleCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(cmd.user_id));
        }

        let rule = build_rule(&cmd)?;
        let now = Utc::now();
        let anchor_date = self.clock.today();

        let (schedule, replaced_existing) =
            match self.schedule_repo.find_by_user_id(&user_id).await? {
                Some(mut existing) => {
                    existing.reconfigure(rule, cmd.rest_days_allowed, now, anchor_date)?;
                    (existing, true)
                }
                None => (
                    Schedule::new_anchored(
                        user_id.clone(),
                        rule,
                        cmd.rest_days_allowed,
                        now,
                        anchor_date,
                    )?,
                    false,
                ),
            };

        self.schedule_repo.save(&schedule).await?;

        info!(
            "[schedule] configured user_id={} type={} replaced={}",
            user_id,
            schedule.schedule_type().as_str(),
            replaced_existing
        );

        let event = ScheduleConfigured {
            user_id,
            schedule_id: schedule.id().clone(),
            schedule_type: schedule.schedule_type(),
            replaced_existing,
            occurred_at: now,
        };
        if let Err(e) = self.event_bus.publish(Box::new(event)).await {
            warn!("[schedule] failed to publish ScheduleConfigured: {}", e);
        }

        Ok(CreateScheduleResult {
            schedule: ScheduleDto::from(&schedule),
            replaced_existing,
        })
    }
}

pub struct DeactivateScheduleCommandHandler {
    schedule_repo: Arc<dyn ScheduleRepository>,
}

impl DeactivateScheduleCommandHandler {
    pub fn new(schedule_repo: Arc<dyn ScheduleRepository>) -> Self {
        Self { schedule_repo }
    }
}

#[async_trait]
impl CommandHandler<DeactivateScheduleCommand> for DeactivateScheduleCommandHandler {
    type Result = DeactivateScheduleResult;

    async fn handle(&self, cmd: DeactivateScheduleCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        let mut schedule = self
            .schedule_repo
            .find_by_user_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::ScheduleNotFound(cmd.user_id.clone()))?;

        let was_active = schedule.is_active();
        if was_active {
            schedule.deactivate();
            self.schedule_repo.save(&schedule).await?;
            info!("[schedule] deactivated user_id={}", user_id);
        }

        Ok(DeactivateScheduleResult {
            schedule_id: schedule.id().as_str().to_string(),
            was_active,
        })
    }
}

/// Moves every active rotating schedule's cursor to the given day
pub struct AdvanceRotationCommandHandler {
    schedule_repo: Arc<dyn ScheduleRepository>,
    clock: Arc<dyn Clock>,
    event_bus: Arc<dyn EventBus>,
}

impl AdvanceRotationCommandHandler {
    pub fn new(
        schedule_repo: Arc<dyn ScheduleRepository>,
        clock: Arc<dyn Clock>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            schedule_repo,
            clock,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<AdvanceRotationCommand> for AdvanceRotationCommandHandler {
    type Result = AdvanceRotationResult;

    async fn handle(&self, cmd: AdvanceRotationCommand) -> Result<Self::Result, DomainError> {
        let date = cmd.date.unwrap_or_else(|| self.clock.today());
        let schedules = self.schedule_repo.find_all_active().await?;

        let mut result = AdvanceRotationResult {
            date,
            advanced: 0,
            unchanged: 0,
            failed: 0,
        };

        for mut schedule in schedules {
            if !schedule.advance_rotation(date) {
                result.unchanged += 1;
                continue;
            }

            if let Err(e) = self.schedule_repo.save(&schedule).await {
                warn!(
                    "[schedule] failed to save rotation user_id={}: {}",
                    schedule.user_id(),
                    e
                );
                result.failed += 1;
                continue;
            }
            result.advanced += 1;

            let event = RotationAdvanced {
                user_id: schedule.user_id().clone(),
                schedule_id: schedule.id().clone(),
                date,
                current_rotation_day: schedule.current_rotation_day(),
                occurred_at: Utc::now(),
            };
            if let Err(e) = self.event_bus.publish(Box::new(event)).await {
                warn!("[schedule] failed to publish RotationAdvanced: {}", e);
            }
        }

        info!(
            "[schedule] rotation advanced date={} advanced={} unchanged={} failed={}",
            date, result.advanced, result.unchanged, result.failed
        );

        Ok(result)
    }
}
