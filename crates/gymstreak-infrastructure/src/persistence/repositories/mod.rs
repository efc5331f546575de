mod check_in_repo;
mod schedule_repo;
mod user_repo;

pub use check_in_repo::SqliteCheckInRepository;
pub use schedule_repo::SqliteScheduleRepository;
pub use user_repo::SqliteUserRepository;
