mod aggregate;
mod repository;

pub use aggregate::User;
pub use repository::UserRepository;
#[cfg(test)]
pub use repository::MockUserRepository;
