use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};
use crate::streak::StreakStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    current_streak: u32,
    longest_streak: u32,
    total_checkins: u32,
    streak_updated_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl User {
    pub const MAX_USERNAME_LEN: usize = 64;

    pub fn new(username: String) -> Result<Self, DomainError> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(DomainError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }
        if username.chars().count() > Self::MAX_USERNAME_LEN {
            return Err(DomainError::Validation(format!(
                "Username cannot exceed {} characters",
                Self::MAX_USERNAME_LEN
            )));
        }

        Ok(Self {
            id: UserId::new(),
            username,
            current_streak: 0,
            longest_streak: 0,
            total_checkins: 0,
            streak_updated_at: None,
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        id: UserId,
        username: String,
        current_streak: u32,
        longest_streak: u32,
        total_checkins: u32,
        streak_updated_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            current_streak,
            longest_streak,
            total_checkins,
            streak_updated_at,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn total_checkins(&self) -> u32 {
        self.total_checkins
    }

    pub fn streak_updated_at(&self) -> Option<DateTime<Utc>> {
        self.streak_updated_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn streak_stats(&self) -> StreakStats {
        StreakStats {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            total_checkins: self.total_checkins,
        }
    }

    /// Overwrite the derived streak fields with freshly computed values
    pub fn apply_streak(&mut self, stats: &StreakStats) {
        self.current_streak = stats.current_streak;
        self.longest_streak = stats.longest_streak;
        self.total_checkins = stats.total_checkins;
        self.streak_updated_at = Some(Utc::now());
    }
}
