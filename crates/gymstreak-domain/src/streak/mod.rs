mod calculator;
mod engine;
mod history;

#[cfg(test)]
mod engine_test;

pub use calculator::StreakCalculator;
pub use engine::{StreakEngine, StreakReport};
pub use history::{HistoryEntry, StreakStats};
