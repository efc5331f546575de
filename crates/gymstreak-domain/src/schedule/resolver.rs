//! Pure mapping from (schedule, calendar date) to a [`DayType`].
//!
//! Nothing here touches storage. Resolving the same inputs twice always
//! yields the same answer; the rotation cursor on [`Schedule`] is only moved
//! by [`Schedule::advance_rotation`].

use chrono::{Datelike, Duration, NaiveDate};

use super::aggregate::{Schedule, ScheduleRule};
use super::value_objects::DayType;

/// Classify `date` under `schedule`.
///
/// A missing or inactive schedule resolves to [`DayType::Unscheduled`], as do
/// custom schedules, whose semantics are not defined yet.
pub fn resolve_day_type(schedule: Option<&Schedule>, date: NaiveDate) -> DayType {
    let Some(schedule) = schedule else {
        return DayType::Unscheduled;
    };

    if !schedule.is_active() {
        return DayType::Unscheduled;
    }

    match schedule.rule() {
        ScheduleRule::Weekly(days) => {
            if days.is_workout(date.weekday()) {
                DayType::Workout
            } else {
                DayType::Rest
            }
        }
        ScheduleRule::Rotating(pattern) => {
            floored_index(days_since_start(schedule, date), pattern.len())
                .and_then(|index| pattern.get(index))
                .map(|token| token.day_type())
                .unwrap_or(DayType::Unscheduled)
        }
        ScheduleRule::Custom => DayType::Unscheduled,
    }
}

/// Resolve `days` consecutive dates starting at `start`.
pub fn resolve_range(
    schedule: Option<&Schedule>,
    start: NaiveDate,
    days: u32,
) -> Vec<(NaiveDate, DayType)> {
    (0..days as i64)
        .map(|offset| start + Duration::days(offset))
        .map(|date| (date, resolve_day_type(schedule, date)))
        .collect()
}

/// Position in the rotation pattern for `date`, or `None` for non-rotating
/// schedules.
pub fn rotation_index(schedule: &Schedule, date: NaiveDate) -> Option<usize> {
    schedule
        .rotation_pattern()
        .and_then(|pattern| floored_index(days_since_start(schedule, date), pattern.len()))
}

/// Whole calendar days from the schedule's anchor day; negative before it.
pub fn days_since_start(schedule: &Schedule, date: NaiveDate) -> i64 {
    (date - schedule.anchor_date()).num_days()
}

// Floored modulo: always in [0, len) even for negative offsets. None for len 0.
fn floored_index(days: i64, len: usize) -> Option<usize> {
    days.checked_rem_euclid(len as i64).map(|index| index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floored_index_wraps_negative_offsets() {
        assert_eq!(floored_index(-1, 3), Some(2));
        assert_eq!(floored_index(-3, 3), Some(0));
        assert_eq!(floored_index(-4, 3), Some(2));
        assert_eq!(floored_index(4, 3), Some(1));
        assert_eq!(floored_index(4, 0), None);
    }
}
