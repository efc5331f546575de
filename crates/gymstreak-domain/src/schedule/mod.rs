mod aggregate;
mod repository;
pub mod resolver;
mod value_objects;


pub use aggregate::{Schedule, ScheduleRule};
pub use repository::ScheduleRepository;
#[cfg(test)]
pub use repository::MockScheduleRepository;
pub use resolver::{resolve_day_type, resolve_range, rotation_index};
pub use value_objects::{DayType, RotationPattern, RotationToken, ScheduleType, WeeklyDays};
