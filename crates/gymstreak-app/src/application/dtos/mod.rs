mod check_in_dto;
mod schedule_dto;
mod streak_dto;

pub use check_in_dto::CheckInDto;
pub use schedule_dto::{DayPlanDto, ScheduleDto};
pub use streak_dto::{RefreshSummaryDto, StreakDto};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
