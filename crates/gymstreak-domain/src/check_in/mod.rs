mod aggregate;
mod repository;
mod value_objects;

#[cfg(test)]
mod value_objects_test;

pub use aggregate::CheckIn;
pub use repository::CheckInRepository;
#[cfg(test)]
pub use repository::MockCheckInRepository;
pub use value_objects::{CheckInStatus, WorkoutDetails};
