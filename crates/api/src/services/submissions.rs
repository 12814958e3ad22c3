//! Opening assignments, submitting work, revisions and grading.

use chrono::Utc;
use coursehub_core::error::CoreError;
use coursehub_core::policy::{ensure_can_modify, SubmissionOwnership};
use coursehub_core::progress::ProgressEvent;
use coursehub_core::roles::Actor;
use coursehub_core::status::{ProgressStatus, SubmissionStatus};
use coursehub_core::submission::{due_at, is_late, validate_grade, SubmissionEvent};
use coursehub_core::types::DbId;
use coursehub_db::models::assignment::UserAssignment;
use coursehub_db::models::submission::Submission;
use coursehub_db::repositories::{
    AssignmentRepo, CourseRepo, ProgressRepo, SubmissionRepo, SyllabusRepo, UserAssignmentRepo,
    UserRepo,
};
use coursehub_events::{event_types, EventBus, PlatformEvent};
use serde::Serialize;
use sqlx::PgPool;

use super::content::assignment_context;
use super::progress::ensure_prerequisites;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct OpenedAssignment {
    #[serde(flatten)]
    pub record: UserAssignment,
    /// `false` when the assignment had already been opened.
    pub created: bool,
}

/// Start the per-user clock for an assignment.
///
/// Opening twice is idempotent: the first open's due date stands.
pub async fn open_assignment(
    pool: &PgPool,
    user_id: DbId,
    assignment_id: DbId,
) -> AppResult<OpenedAssignment> {
    let assignment = AssignmentRepo::find_by_id(pool, assignment_id)
        .await?
        .ok_or(AppError::not_found("Assignment", assignment_id))?;

    let due = due_at(Utc::now(), assignment.max_duration_days);
    let (record, created) = UserAssignmentRepo::open(pool, assignment_id, user_id, due).await?;

    if created {
        tracing::info!(user_id, assignment_id, due_at = %record.due_at, "Assignment opened");
    }
    Ok(OpenedAssignment { record, created })
}

pub async fn get_open_record(
    pool: &PgPool,
    user_id: DbId,
    assignment_id: DbId,
) -> AppResult<UserAssignment> {
    UserAssignmentRepo::find(pool, user_id, assignment_id)
        .await?
        .ok_or(AppError::not_found("UserAssignment", assignment_id))
}

/// Submit work for an opened assignment.
///
/// At most one submission per user and assignment. Lateness is measured
/// against the due date fixed when the assignment was opened. The
/// submission and the completion of the assignment's syllabus commit
/// together; later revisions, grading and deletion leave progress as is.
pub async fn submit(
    pool: &PgPool,
    event_bus: &EventBus,
    user_id: DbId,
    assignment_id: DbId,
    content_url: &str,
) -> AppResult<Submission> {
    if content_url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content_url must not be empty".into(),
        )));
    }

    let mut tx = pool.begin().await?;

    let assignment = AssignmentRepo::find_by_id(&mut *tx, assignment_id)
        .await?
        .ok_or(AppError::not_found("Assignment", assignment_id))?;

    if SubmissionRepo::find_for_user(&mut *tx, user_id, assignment_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A submission for this assignment already exists".into(),
        )));
    }

    let opened = UserAssignmentRepo::find(&mut *tx, user_id, assignment_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidState(
                "Open the assignment before submitting".into(),
            ))
        })?;

    let syllabus = SyllabusRepo::find_by_id(&mut *tx, assignment.syllabus_id)
        .await?
        .ok_or(AppError::not_found("Syllabus", assignment.syllabus_id))?;
    let course = CourseRepo::find_by_id(&mut *tx, syllabus.course_id)
        .await?
        .ok_or(AppError::not_found("Course", syllabus.course_id))?;

    ensure_prerequisites(&mut *tx, user_id, course.id, syllabus.sort_order).await?;

    let late = is_late(Utc::now(), opened.due_at);
    let submission =
        SubmissionRepo::create(&mut *tx, assignment_id, user_id, content_url, late).await?;

    let current = ProgressRepo::find(&mut *tx, user_id, course.id, syllabus.id)
        .await?
        .and_then(|row| ProgressStatus::from_id(row.status_id));
    let status = ProgressStatus::transition(current, ProgressEvent::AssignmentSubmitted);
    ProgressRepo::upsert(&mut *tx, user_id, course.id, syllabus.id, status).await?;

    let student = UserRepo::find_by_id(&mut *tx, user_id)
        .await?
        .ok_or(AppError::not_found("User", user_id))?;

    tx.commit().await?;

    tracing::info!(
        submission_id = submission.id,
        user_id,
        assignment_id,
        is_late = late,
        "Submission created"
    );

    event_bus.publish(
        PlatformEvent::new(event_types::SUBMISSION_CREATED)
            .with_source("submission", submission.id)
            .with_actor(user_id)
            .with_payload(serde_json::json!({
                "course_id": course.id,
                "course_title": course.title,
                "assignment_title": assignment.title,
                "student_name": student.name,
                "is_late": late,
            })),
    );

    Ok(submission)
}

async fn load_submission(pool: &PgPool, submission_id: DbId) -> AppResult<Submission> {
    SubmissionRepo::find_by_id(pool, submission_id)
        .await?
        .ok_or(AppError::not_found("Submission", submission_id))
}

fn current_status(submission: &Submission) -> AppResult<SubmissionStatus> {
    SubmissionStatus::from_id(submission.status_id).ok_or_else(|| {
        AppError::InternalError(format!(
            "Unknown submission status id {}",
            submission.status_id
        ))
    })
}

/// Replace the content of the caller's own, not yet graded submission.
///
/// The revision is a new submission time, so lateness is measured again
/// against the caller's due date.
pub async fn revise(
    pool: &PgPool,
    actor: &Actor,
    submission_id: DbId,
    content_url: &str,
) -> AppResult<Submission> {
    if content_url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content_url must not be empty".into(),
        )));
    }
    let submission = load_submission(pool, submission_id).await?;
    ensure_own_submission(actor, &submission)?;

    let from = current_status(&submission)?;
    from.transition(SubmissionEvent::Revised)?;

    let opened = UserAssignmentRepo::find(pool, submission.user_id, submission.assignment_id)
        .await?
        .ok_or(AppError::not_found("UserAssignment", submission.assignment_id))?;
    let now = Utc::now();
    let late = is_late(now, opened.due_at);

    // Guarded on the status read above; a concurrent grade wins.
    let revised = SubmissionRepo::revise(pool, submission_id, content_url, now, late, from.id())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidState(
                "Graded submissions can no longer be revised".into(),
            ))
        })?;
    tracing::info!(submission_id, user_id = actor.user_id, is_late = late, "Submission revised");
    Ok(revised)
}

/// Withdraw the caller's own submission. Graded work stays.
pub async fn delete(pool: &PgPool, actor: &Actor, submission_id: DbId) -> AppResult<()> {
    let submission = load_submission(pool, submission_id).await?;
    ensure_own_submission(actor, &submission)?;

    let from = current_status(&submission)?;
    from.transition(SubmissionEvent::Withdrawn)?;

    if !SubmissionRepo::delete(pool, submission_id, from.id()).await? {
        return Err(AppError::Core(CoreError::InvalidState(
            "Graded submissions can no longer be deleted".into(),
        )));
    }
    tracing::info!(submission_id, user_id = actor.user_id, "Submission deleted");
    Ok(())
}

fn ensure_own_submission(actor: &Actor, submission: &Submission) -> AppResult<()> {
    ensure_can_modify(
        &SubmissionOwnership {
            user_id: submission.user_id,
        },
        actor,
        "submission",
    )?;
    Ok(())
}

/// Grade (or regrade) a submission. Course owners only.
pub async fn grade(
    pool: &PgPool,
    actor: &Actor,
    submission_id: DbId,
    grade: i32,
) -> AppResult<Submission> {
    validate_grade(grade)?;
    let submission = load_submission(pool, submission_id).await?;
    let (_, _, ctx) = assignment_context(pool, submission.assignment_id).await?;
    ctx.ensure_owner(actor)?;

    let next = current_status(&submission)?.transition(SubmissionEvent::Graded)?;
    let graded = SubmissionRepo::grade(pool, submission_id, grade, next.id())
        .await?
        .ok_or(AppError::not_found("Submission", submission_id))?;
    tracing::info!(submission_id, grade, grader_id = actor.user_id, "Submission graded");
    Ok(graded)
}

pub async fn list_for_assignment(
    pool: &PgPool,
    actor: &Actor,
    assignment_id: DbId,
) -> AppResult<Vec<Submission>> {
    let (_, _, ctx) = assignment_context(pool, assignment_id).await?;
    ctx.ensure_owner(actor)?;
    Ok(SubmissionRepo::list_by_assignment(pool, assignment_id).await?)
}
