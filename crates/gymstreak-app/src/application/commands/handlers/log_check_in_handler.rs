use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::commands::check_in_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::dtos::CheckInDto;
use crate::application::services::StreakService;
use gymstreak_domain::check_in::{CheckIn, CheckInRepository, CheckInStatus, WorkoutDetails};
use gymstreak_domain::events::streak_events::CheckInLogged;
use gymstreak_domain::events::EventBus;
use gymstreak_domain::shared::{Clock, DomainError, UserId};
use gymstreak_domain::user::UserRepository;

/// Records a day's check-in and refreshes the user's stored streak
pub struct LogCheckInCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    streak_service: Arc<StreakService>,
    clock: Arc<dyn Clock>,
    event_bus: Arc<dyn EventBus>,
}

impl LogCheckInCommandHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
        streak_service: Arc<StreakService>,
        clock: Arc<dyn Clock>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            user_repo,
            check_in_repo,
            streak_service,
            clock,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<LogCheckInCommand> for LogCheckInCommandHandler {
    type Result = LogCheckInResult;

    async fn handle(&self, cmd: LogCheckInCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(cmd.user_id));
        }

        let today = self.clock.today();
        let date = cmd.date.unwrap_or(today);
        if date > today {
            return Err(DomainError::Validation(format!(
                "Cannot check in for a future date: {date}"
            )));
        }

        let status = CheckInStatus::from_str(&cmd.status)?;
        let workout = WorkoutDetails {
            workout_type: cmd.workout_type,
            duration_minutes: cmd.duration_minutes,
            notes: cmd.notes,
        };
        let check_in = CheckIn::new(user_id.clone(), date, status, Some(workout))?;

        if let Err(e) = self.check_in_repo.insert(&check_in).await {
            if matches!(e, DomainError::DuplicateCheckIn(_)) {
                warn!("[check-in] duplicate user_id={} date={}", user_id, date);
            }
            return Err(e);
        }

        info!(
            "[check-in] logged user_id={} date={} status={}",
            user_id, date, status
        );

        // The check-in is stored; the streak follows it even if delivery fails
        let streak = self.streak_service.refresh(&user_id).await?;

        let event = CheckInLogged {
            user_id: user_id.clone(),
            check_in_id: check_in.id().clone(),
            date,
            status,
            occurred_at: Utc::now(),
        };
        if let Err(e) = self.event_bus.publish(Box::new(event)).await {
            warn!("[check-in] failed to publish CheckInLogged: {}", e);
        }

        Ok(LogCheckInResult {
            check_in: CheckInDto::from(&check_in),
            streak,
        })
    }
}
