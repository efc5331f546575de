use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{error, info, warn};

use super::StreakService;
use crate::application::commands::handlers::AdvanceRotationCommandHandler;
use crate::application::commands::schedule_commands::{
    AdvanceRotationCommand, AdvanceRotationResult,
};
use crate::application::commands::CommandHandler;
use crate::application::dtos::RefreshSummaryDto;
use crate::application::ResultExt;
use gymstreak_domain::shared::DomainError;

/// Next occurrence of `hour:minute` strictly after `now`, in `now`'s offset
pub fn next_run_after(
    now: DateTime<FixedOffset>,
    hour: u32,
    minute: u32,
) -> Result<DateTime<FixedOffset>, DomainError> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        DomainError::Validation(format!("Invalid run time {}:{:02}", hour, minute))
    })?;

    let mut next = now
        .date_naive()
        .and_time(time)
        .and_local_timezone(now.timezone())
        .single()
        .ok_or_else(|| {
            DomainError::Infrastructure(format!("Ambiguous run time {}:{:02}", hour, minute))
        })?;

    if next <= now {
        next += ChronoDuration::days(1);
    }
    Ok(next)
}

/// Daily job: advance rotation cursors, then refresh every stored streak
pub struct RotationScheduler {
    advance_handler: Arc<AdvanceRotationCommandHandler>,
    streak_service: Arc<StreakService>,
    offset: FixedOffset,
    hour: u32,
    minute: u32,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RotationScheduler {
    pub fn new(
        advance_handler: Arc<AdvanceRotationCommandHandler>,
        streak_service: Arc<StreakService>,
        offset: FixedOffset,
        hour: u32,
        minute: u32,
    ) -> Self {
        Self {
            advance_handler,
            streak_service,
            offset,
            hour,
            minute,
            handle: Mutex::new(None),
        }
    }

    /// One pass of the daily job
    pub async fn run_once(
        &self,
    ) -> Result<(AdvanceRotationResult, RefreshSummaryDto), DomainError> {
        run_daily_job(&self.advance_handler, &self.streak_service).await
    }

    /// Spawn the timer loop. A second call while running is ignored.
    pub async fn start(&self) {
        let mut slot = self.handle.lock().await;
        if slot.is_some() {
            warn!("Rotation scheduler already running");
            return;
        }

        let advance_handler = Arc::clone(&self.advance_handler);
        let streak_service = Arc::clone(&self.streak_service);
        let (offset, hour, minute) = (self.offset, self.hour, self.minute);

        let handle = tokio::spawn(async move {
            loop {
                let now = Utc::now().with_timezone(&offset);
                let wait = match next_run_after(now, hour, minute)
                    .and_then(|next| (next - now).to_std().to_infra_err())
                {
                    Ok(wait) => wait,
                    Err(e) => {
                        error!("Failed to compute next rotation run: {}", e);
                        Duration::from_secs(60)
                    }
                };

                info!(
                    "Next rotation run in {} seconds ({:02}:{:02} at {})",
                    wait.as_secs(),
                    hour,
                    minute,
                    offset
                );
                tokio::time::sleep(wait).await;

                if let Err(e) = run_daily_job(&advance_handler, &streak_service).await {
                    error!("Daily rotation job failed: {}", e.format_with_code());
                }
            }
        });

        *slot = Some(handle);
        info!("Rotation scheduler started");
    }

    pub async fn stop(&self) {
        if let Some(handle) = self.handle.lock().await.take() {
            handle.abort();
            info!("Rotation scheduler stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.lock().await.is_some()
    }
}

async fn run_daily_job(
    advance_handler: &AdvanceRotationCommandHandler,
    streak_service: &StreakService,
) -> Result<(AdvanceRotationResult, RefreshSummaryDto), DomainError> {
    let advanced = advance_handler
        .handle(AdvanceRotationCommand::default())
        .await?;
    let refreshed = streak_service.refresh_all().await?;

    info!(
        date = %advanced.date,
        advanced = advanced.advanced,
        refreshed = refreshed.refreshed,
        "Daily rotation job finished"
    );

    Ok((advanced, refreshed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(offset: &FixedOffset, h: u32, m: u32) -> DateTime<FixedOffset> {
        offset.with_ymd_and_hms(2024, 6, 15, h, m, 0).unwrap()
    }

    #[test]
    fn test_next_run_later_today() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let next = next_run_after(at(&offset, 0, 1), 0, 5).unwrap();

        assert_eq!(next, at(&offset, 0, 5));
    }

    #[test]
    fn test_next_run_rolls_to_tomorrow() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let next = next_run_after(at(&offset, 0, 5), 0, 5).unwrap();

        assert_eq!(next, at(&offset, 0, 5) + ChronoDuration::days(1));
    }

    #[test]
    fn test_next_run_rejects_out_of_range_time() {
        let offset = FixedOffset::east_opt(0).unwrap();

        assert!(matches!(
            next_run_after(at(&offset, 10, 0), 30, 0),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            next_run_after(at(&offset, 10, 0), 23, 60),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(
            next_run_after(at(&offset, 10, 0), 23, 59).unwrap(),
            at(&offset, 23, 59)
        );
    }
}
