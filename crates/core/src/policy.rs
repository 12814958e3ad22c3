//! Ownership policies checked before every mutation.
//!
//! Each resource kind implements [`CanModify`]; handlers and services call
//! [`ensure_can_modify`] uniformly instead of comparing ids inline.

use crate::error::CoreError;
use crate::roles::Actor;
use crate::types::DbId;

/// Decides whether an actor may mutate a resource.
pub trait CanModify {
    fn can_modify(&self, actor: &Actor) -> bool;
}

/// Course content (syllabuses, materials, assignments, grading): the primary
/// author or any co-instructor.
#[derive(Debug, Clone)]
pub struct CourseOwnership {
    pub author_id: DbId,
    pub instructor_ids: Vec<DbId>,
}

impl CourseOwnership {
    pub fn is_member(&self, user_id: DbId) -> bool {
        self.author_id == user_id || self.instructor_ids.contains(&user_id)
    }
}

impl CanModify for CourseOwnership {
    fn can_modify(&self, actor: &Actor) -> bool {
        actor.is_author() && self.is_member(actor.user_id)
    }
}

/// Course-level settings (details, activation, instructor list): the primary
/// author only.
#[derive(Debug, Clone, Copy)]
pub struct CourseAuthorship {
    pub author_id: DbId,
}

impl CanModify for CourseAuthorship {
    fn can_modify(&self, actor: &Actor) -> bool {
        actor.is_author() && self.author_id == actor.user_id
    }
}

/// A student's own submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionOwnership {
    pub user_id: DbId,
}

impl CanModify for SubmissionOwnership {
    fn can_modify(&self, actor: &Actor) -> bool {
        self.user_id == actor.user_id
    }
}

/// Fail with [`CoreError::Forbidden`] unless `actor` may modify `resource`.
pub fn ensure_can_modify<R: CanModify + ?Sized>(
    resource: &R,
    actor: &Actor,
    what: &str,
) -> Result<(), CoreError> {
    if resource.can_modify(actor) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You are not allowed to modify this {what}"
        )))
    }
}
