// Application layer - use cases over the domain, wired to infrastructure

pub mod application;
pub mod presentation;

pub use presentation::bootstrap::{bootstrap, bootstrap_with_database};
pub use presentation::state::AppState;
