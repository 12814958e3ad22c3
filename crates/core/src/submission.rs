//! Submission lifecycle, lateness and grading rules.

use chrono::Duration;

use crate::error::CoreError;
use crate::status::SubmissionStatus;
use crate::types::Timestamp;

pub const MIN_GRADE: i32 = 0;
pub const MAX_GRADE: i32 = 100;

/// Action applied to an existing submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// The student replaced the submitted content.
    Revised,
    /// An instructor assigned (or re-assigned) a grade.
    Graded,
    /// The student deleted the submission.
    Withdrawn,
}

impl SubmissionStatus {
    /// Apply `event`, rejecting transitions the lifecycle does not allow.
    pub fn transition(self, event: SubmissionEvent) -> Result<SubmissionStatus, CoreError> {
        match (self, event) {
            (SubmissionStatus::Submitted, SubmissionEvent::Revised) => {
                Ok(SubmissionStatus::Submitted)
            }
            (SubmissionStatus::Graded, SubmissionEvent::Revised) => Err(CoreError::InvalidState(
                "Graded submissions can no longer be revised".to_string(),
            )),
            (_, SubmissionEvent::Graded) => Ok(SubmissionStatus::Graded),
            (SubmissionStatus::Submitted, SubmissionEvent::Withdrawn) => {
                Ok(SubmissionStatus::Submitted)
            }
            (SubmissionStatus::Graded, SubmissionEvent::Withdrawn) => Err(CoreError::InvalidState(
                "Graded submissions can no longer be deleted".to_string(),
            )),
        }
    }
}

/// Due date for an assignment opened at `opened_at`.
pub fn due_at(opened_at: Timestamp, max_duration_days: i32) -> Timestamp {
    opened_at + Duration::days(i64::from(max_duration_days))
}

/// A submission is late when it arrives strictly after the due date.
pub fn is_late(submitted_at: Timestamp, due: Timestamp) -> bool {
    submitted_at > due
}

pub fn validate_grade(grade: i32) -> Result<(), CoreError> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(CoreError::Validation(format!(
            "grade must be between {MIN_GRADE} and {MAX_GRADE}"
        )));
    }
    Ok(())
}

pub fn validate_max_duration_days(days: i32) -> Result<(), CoreError> {
    if days <= 0 {
        return Err(CoreError::Validation(
            "max_duration_days must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn revising_is_allowed_until_graded() {
        assert_eq!(
            SubmissionStatus::Submitted
                .transition(SubmissionEvent::Revised)
                .unwrap(),
            SubmissionStatus::Submitted
        );
        assert_matches!(
            SubmissionStatus::Graded.transition(SubmissionEvent::Revised),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn grade_is_kept_once_assigned() {
        assert!(SubmissionStatus::Submitted
            .transition(SubmissionEvent::Withdrawn)
            .is_ok());
        assert_matches!(
            SubmissionStatus::Graded.transition(SubmissionEvent::Withdrawn),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn regrading_keeps_graded() {
        assert_eq!(
            SubmissionStatus::Graded
                .transition(SubmissionEvent::Graded)
                .unwrap(),
            SubmissionStatus::Graded
        );
    }

    #[test]
    fn due_date_adds_whole_days() {
        let opened = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(
            due_at(opened, 7),
            Utc.with_ymd_and_hms(2026, 3, 8, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn lateness_is_strict() {
        let due = Utc.with_ymd_and_hms(2026, 3, 8, 0, 0, 0).unwrap();
        assert!(!is_late(due, due));
        assert!(is_late(due + Duration::seconds(1), due));
        assert!(!is_late(due - Duration::days(1), due));
    }

    #[test]
    fn grade_bounds() {
        assert!(validate_grade(0).is_ok());
        assert!(validate_grade(100).is_ok());
        assert_matches!(validate_grade(101), Err(CoreError::Validation(_)));
        assert_matches!(validate_grade(-1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(validate_max_duration_days(1).is_ok());
        assert_matches!(validate_max_duration_days(0), Err(CoreError::Validation(_)));
    }
}
