use chrono::NaiveDate;
use log::warn;

use super::history::{HistoryEntry, StreakStats};
use crate::shared::DomainError;

/// Adjacency-based streak arithmetic over an in-memory history.
pub struct StreakCalculator;

impl StreakCalculator {
    /// Compute streak statistics as of `today`.
    ///
    /// `history` must be ordered by date, newest first. A pair of neighbours
    /// where the later element is dated after the earlier one is rejected with
    /// `MalformedDateOrdering` rather than folded into the count.
    pub fn calculate(
        history: &[HistoryEntry],
        today: NaiveDate,
    ) -> Result<StreakStats, DomainError> {
        if history.is_empty() {
            return Ok(StreakStats::default());
        }

        let gaps = Self::day_gaps(history)?;

        Ok(StreakStats {
            current_streak: Self::current_streak(history, &gaps, today),
            longest_streak: Self::longest_streak(&gaps),
            total_checkins: history.iter().filter(|e| e.is_persisted()).count() as u32,
        })
    }

    // gaps[i] is the day distance between history[i] and history[i + 1]
    fn day_gaps(history: &[HistoryEntry]) -> Result<Vec<i64>, DomainError> {
        history
            .windows(2)
            .map(|pair| {
                let (prev, curr) = (pair[0].date(), pair[1].date());
                let gap = (prev - curr).num_days();
                if gap < 0 {
                    warn!(
                        "[streak] history out of order prev={} curr={} gap={}",
                        prev, curr, gap
                    );
                    return Err(DomainError::MalformedDateOrdering(format!(
                        "{curr} follows {prev} in a newest-first history"
                    )));
                }
                Ok(gap)
            })
            .collect()
    }

    fn current_streak(history: &[HistoryEntry], gaps: &[i64], today: NaiveDate) -> u32 {
        let Some(start) = history.iter().position(|e| e.date() == today) else {
            return 0;
        };

        let mut streak = 1u32;
        for gap in &gaps[start..] {
            match *gap {
                0 => continue,
                1 => streak += 1,
                _ => break,
            }
        }
        streak
    }

    fn longest_streak(gaps: &[i64]) -> u32 {
        let mut running = 1u32;
        let mut longest = 1u32;

        for gap in gaps {
            match *gap {
                0 => continue,
                1 => running += 1,
                _ => running = 1,
            }
            longest = longest.max(running);
        }
        longest
    }
}
