use chrono::Utc;
use futures::stream::{self, StreamExt};
use log::{info, warn};
use std::sync::Arc;

use crate::application::dtos::{RefreshSummaryDto, StreakDto};
use gymstreak_domain::events::streak_events::StreakRecalculated;
use gymstreak_domain::events::EventBus;
use gymstreak_domain::shared::{DomainError, UserId};
use gymstreak_domain::streak::StreakEngine;
use gymstreak_domain::user::UserRepository;

const REFRESH_CONCURRENCY: usize = 4;

/// Recomputes streaks and writes them back onto users
pub struct StreakService {
    engine: Arc<StreakEngine>,
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl StreakService {
    pub fn new(
        engine: Arc<StreakEngine>,
        user_repo: Arc<dyn UserRepository>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            engine,
            user_repo,
            event_bus,
        }
    }

    /// Compute the user's streak as of today and persist it
    pub async fn refresh(&self, user_id: &UserId) -> Result<StreakDto, DomainError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;
        let previous = user.streak_stats();

        let report = self.engine.evaluate(user_id, self.engine.today()).await?;
        self.user_repo
            .update_streak_fields(user_id, &report.stats)
            .await?;

        info!(
            "[streak] refreshed user_id={} current={} longest={} total={} day_type={}",
            user_id,
            report.stats.current_streak,
            report.stats.longest_streak,
            report.stats.total_checkins,
            report.day_type
        );

        if previous != report.stats {
            let event = StreakRecalculated {
                user_id: user_id.clone(),
                previous,
                current: report.stats,
                occurred_at: Utc::now(),
            };
            if event.is_new_record() {
                info!(
                    "[streak] new longest streak user_id={} longest={}",
                    user_id, report.stats.longest_streak
                );
            }
            if let Err(e) = self.event_bus.publish(Box::new(event)).await {
                warn!("[streak] failed to publish StreakRecalculated: {}", e);
            }
        }

        Ok(StreakDto::from_report(user_id, &report))
    }

    /// Refresh every user; one user's failure does not stop the rest
    pub async fn refresh_all(&self) -> Result<RefreshSummaryDto, DomainError> {
        let users = self.user_repo.find_all().await?;
        let total_users = users.len();

        let outcomes: Vec<Result<StreakDto, DomainError>> = stream::iter(users)
            .map(|user| async move { self.refresh(user.id()).await })
            .buffer_unordered(REFRESH_CONCURRENCY)
            .collect()
            .await;

        let mut summary = RefreshSummaryDto {
            total_users,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(_) => summary.refreshed += 1,
                Err(e) => {
                    warn!("[streak] refresh failed: {}", e.format_with_code());
                    summary.failed += 1;
                }
            }
        }

        info!(
            "[streak] refresh_all total={} refreshed={} failed={}",
            summary.total_users, summary.refreshed, summary.failed
        );

        Ok(summary)
    }
}
