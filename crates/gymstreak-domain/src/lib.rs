// Domain layer - schedule resolution and streak math
// No dependencies on infrastructure or application layers

pub mod check_in;
pub mod events;
pub mod schedule;
pub mod shared;
pub mod streak;
pub mod user;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{CheckInId, DomainError, ScheduleId, UserId};
