//! Progress ledger rules.
//!
//! A student may only touch syllabus *k* of a course once every syllabus with
//! a smaller `sort_order` is completed. Status changes go through
//! [`ProgressStatus::transition`] so every writer (content access, assignment
//! submission) agrees on the outcome.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::status::ProgressStatus;
use crate::types::DbId;

/// Message returned when an earlier syllabus is still incomplete.
pub const ERR_PRIOR_INCOMPLETE: &str = "Complete all previous syllabuses to open this one";

/// Message returned when a percentage is requested for an empty course.
pub const ERR_NO_SYLLABUSES: &str = "No syllabuses found for this course";

/// Something that happened to a student's progress on one syllabus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The student opened the syllabus content.
    Accessed { has_assignments: bool },
    /// The student submitted an assignment belonging to the syllabus.
    AssignmentSubmitted,
}

impl ProgressStatus {
    /// Status after `event`, given the current ledger row (if any).
    ///
    /// Completion is terminal: no event moves a completed row back to
    /// in-progress.
    pub fn transition(current: Option<ProgressStatus>, event: ProgressEvent) -> ProgressStatus {
        match (current, event) {
            (Some(ProgressStatus::Completed), _) => ProgressStatus::Completed,
            (_, ProgressEvent::AssignmentSubmitted) => ProgressStatus::Completed,
            (
                _,
                ProgressEvent::Accessed {
                    has_assignments: false,
                },
            ) => ProgressStatus::Completed,
            (
                _,
                ProgressEvent::Accessed {
                    has_assignments: true,
                },
            ) => ProgressStatus::InProgress,
        }
    }
}

/// A syllabus reduced to what the ordering rule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllabusSlot {
    pub syllabus_id: DbId,
    pub sort_order: i32,
}

/// Fail with [`CoreError::InvalidState`] unless every syllabus before
/// `target_order` is in `completed`.
pub fn ensure_prior_completed(
    course_syllabuses: &[SyllabusSlot],
    target_order: i32,
    completed: &HashSet<DbId>,
) -> Result<(), CoreError> {
    let blocked = course_syllabuses
        .iter()
        .filter(|slot| slot.sort_order < target_order)
        .any(|slot| !completed.contains(&slot.syllabus_id));

    if blocked {
        return Err(CoreError::InvalidState(ERR_PRIOR_INCOMPLETE.to_string()));
    }
    Ok(())
}

/// `floor(100 * completed / total)`, or an error for a course with no syllabuses.
pub fn percent_complete(completed: i64, total: i64) -> Result<i32, CoreError> {
    if total <= 0 {
        return Err(CoreError::InvalidState(ERR_NO_SYLLABUSES.to_string()));
    }
    let completed = completed.clamp(0, total);
    Ok((completed * 100 / total) as i32)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn slots(n: i32) -> Vec<SyllabusSlot> {
        (1..=n)
            .map(|order| SyllabusSlot {
                syllabus_id: i64::from(order) * 10,
                sort_order: order,
            })
            .collect()
    }

    #[test]
    fn first_syllabus_is_always_open() {
        let course = slots(3);
        assert!(ensure_prior_completed(&course, 1, &HashSet::new()).is_ok());
    }

    #[test]
    fn later_syllabus_blocked_until_predecessors_complete() {
        let course = slots(3);
        assert_matches!(ensure_prior_completed(&course, 2, &HashSet::new()), Err(CoreError::InvalidState(_)));

        let done: HashSet<DbId> = [10].into_iter().collect();
        assert!(ensure_prior_completed(&course, 2, &done).is_ok());
        assert_matches!(ensure_prior_completed(&course, 3, &done), Err(CoreError::InvalidState(_)));
    }

    #[test]
    fn gap_in_completion_blocks() {
        let course = slots(3);
        let done: HashSet<DbId> = [20].into_iter().collect();
        assert_matches!(ensure_prior_completed(&course, 3, &done), Err(CoreError::InvalidState(_)));
    }

    #[test]
    fn access_without_assignments_completes() {
        let status = ProgressStatus::transition(
            None,
            ProgressEvent::Accessed {
                has_assignments: false,
            },
        );
        assert_eq!(status, ProgressStatus::Completed);
    }

    #[test]
    fn access_with_assignments_is_in_progress() {
        let status = ProgressStatus::transition(
            None,
            ProgressEvent::Accessed {
                has_assignments: true,
            },
        );
        assert_eq!(status, ProgressStatus::InProgress);
    }

    #[test]
    fn submission_completes_in_progress_row() {
        let status = ProgressStatus::transition(
            Some(ProgressStatus::InProgress),
            ProgressEvent::AssignmentSubmitted,
        );
        assert_eq!(status, ProgressStatus::Completed);
    }

    #[test]
    fn completed_never_regresses() {
        for event in [
            ProgressEvent::Accessed {
                has_assignments: true,
            },
            ProgressEvent::Accessed {
                has_assignments: false,
            },
            ProgressEvent::AssignmentSubmitted,
        ] {
            assert_eq!(
                ProgressStatus::transition(Some(ProgressStatus::Completed), event),
                ProgressStatus::Completed
            );
        }
    }

    #[test]
    fn percent_is_floored() {
        assert_eq!(percent_complete(1, 3).unwrap(), 33);
        assert_eq!(percent_complete(2, 3).unwrap(), 66);
        assert_eq!(percent_complete(3, 3).unwrap(), 100);
        assert_eq!(percent_complete(0, 4).unwrap(), 0);
    }

    #[test]
    fn percent_of_empty_course_is_an_error() {
        assert_matches!(percent_complete(0, 0), Err(CoreError::InvalidState(_)));
    }
}
