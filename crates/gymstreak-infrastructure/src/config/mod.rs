use std::path::PathBuf;
use thiserror::Error;

use gymstreak_domain::shared::DomainError;

pub const ENV_DATABASE_PATH: &str = "GYMSTREAK_DATABASE_PATH";
pub const ENV_LOG_DIR: &str = "GYMSTREAK_LOG_DIR";
pub const ENV_UTC_OFFSET_MINUTES: &str = "GYMSTREAK_UTC_OFFSET_MINUTES";
pub const ENV_ROTATION_ADVANCE_TIME: &str = "GYMSTREAK_ROTATION_ADVANCE_TIME";

const APP_DIR_NAME: &str = "gymstreak";
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid integer: {value}")]
    NotAnInteger { var: &'static str, value: String },

    #[error("UTC offset must be within ±840 minutes, got {0}")]
    OffsetOutOfRange(i32),

    #[error("Rotation advance time must be HH:MM, got {0}")]
    InvalidTime(String),
}

impl From<ConfigError> for DomainError {
    fn from(e: ConfigError) -> Self {
        DomainError::Validation(e.to_string())
    }
}

/// Process-wide settings for the daemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    /// Offset from UTC that defines the calendar day boundary
    pub utc_offset_minutes: i32,
    pub rotation_advance_hour: u32,
    pub rotation_advance_minute: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        Self {
            database_path: data_dir.join("gymstreak.db"),
            log_dir: data_dir.join("logs"),
            utc_offset_minutes: 0,
            rotation_advance_hour: 0,
            rotation_advance_minute: 5,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `GYMSTREAK_*` environment variables
    pub fn from_env() -> Result<Self, DomainError> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_UTC_OFFSET_MINUTES) {
            let minutes = raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::NotAnInteger {
                    var: ENV_UTC_OFFSET_MINUTES,
                    value: raw.clone(),
                })?;
            config = config.with_utc_offset_minutes(minutes)?;
        }
        if let Some(raw) = lookup(ENV_ROTATION_ADVANCE_TIME) {
            let (hour, minute) = parse_hh_mm(&raw)?;
            config = config.with_rotation_advance_time(hour, minute)?;
        }

        Ok(config)
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Result<Self, ConfigError> {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(ConfigError::OffsetOutOfRange(minutes));
        }
        self.utc_offset_minutes = minutes;
        Ok(self)
    }

    pub fn with_rotation_advance_time(mut self, hour: u32, minute: u32) -> Result<Self, ConfigError> {
        if hour > 23 || minute > 59 {
            return Err(ConfigError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        self.rotation_advance_hour = hour;
        self.rotation_advance_minute = minute;
        Ok(self)
    }

    pub fn database_path_str(&self) -> String {
        self.database_path.to_string_lossy().into_owned()
    }
}

fn parse_hh_mm(raw: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidTime(raw.to_string());
    let (hour, minute) = raw.trim().split_once(':').ok_or_else(invalid)?;
    let hour = hour.parse::<u32>().map_err(|_| invalid())?;
    let minute = minute.parse::<u32>().map_err(|_| invalid())?;
    Ok((hour, minute))
}
