#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::shared::{DomainError, UserId};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_status_parses_wire_vocabulary() {
        assert_eq!(CheckInStatus::from_str("went").unwrap(), CheckInStatus::Went);
        assert_eq!(CheckInStatus::from_str(" Missed ").unwrap(), CheckInStatus::Missed);
        assert_eq!(CheckInStatus::from_str("REST").unwrap(), CheckInStatus::Rest);
        assert!(CheckInStatus::from_str("skipped").is_err());
    }

    #[test]
    fn test_status_display_matches_wire_form() {
        assert_eq!(CheckInStatus::Went.to_string(), "went");
        assert_eq!(CheckInStatus::Rest.as_str(), "rest");
    }

    #[test]
    fn test_check_in_without_details() {
        let user_id = UserId::new();
        let check_in = CheckIn::new(user_id.clone(), today(), CheckInStatus::Went, None).unwrap();

        assert_eq!(check_in.user_id(), &user_id);
        assert_eq!(check_in.date(), today());
        assert_eq!(check_in.status(), CheckInStatus::Went);
        assert!(check_in.workout().is_none());
    }

    #[test]
    fn test_empty_details_are_dropped() {
        let check_in = CheckIn::new(
            UserId::new(),
            today(),
            CheckInStatus::Went,
            Some(WorkoutDetails::default()),
        )
        .unwrap();

        assert!(check_in.workout().is_none());
    }

    #[test]
    fn test_details_are_kept() {
        let details = WorkoutDetails {
            workout_type: Some("upper".to_string()),
            duration_minutes: Some(45),
            notes: Some("bench PR".to_string()),
        };
        let check_in =
            CheckIn::new(UserId::new(), today(), CheckInStatus::Went, Some(details.clone()))
                .unwrap();

        assert_eq!(check_in.workout(), Some(&details));
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let details = WorkoutDetails {
            duration_minutes: Some(0),
            ..Default::default()
        };

        let result = CheckIn::new(UserId::new(), today(), CheckInStatus::Went, Some(details));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_overlong_notes_are_rejected() {
        let details = WorkoutDetails {
            notes: Some("x".repeat(WorkoutDetails::MAX_NOTES_LEN + 1)),
            ..Default::default()
        };

        assert!(details.validate().is_err());
    }
}
