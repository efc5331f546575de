mod rotation_scheduler;
mod streak_service;

pub use rotation_scheduler::{next_run_after, RotationScheduler};
pub use streak_service::StreakService;
