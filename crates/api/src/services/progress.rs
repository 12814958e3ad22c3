//! The progress ledger: recording syllabus access and computing completion.

use std::collections::HashSet;

use coursehub_core::progress::{ensure_prior_completed, percent_complete, ProgressEvent};
use coursehub_core::roles::Actor;
use coursehub_core::status::ProgressStatus;
use coursehub_core::types::DbId;
use coursehub_db::models::progress::{CourseProgress, StudentProgress, UserProgress};
use coursehub_db::repositories::{AssignmentRepo, CourseRepo, ProgressRepo, SyllabusRepo};
use sqlx::{PgConnection, PgPool};

use super::access::{outline_slots, CourseContext};
use crate::error::{AppError, AppResult};

/// Record that `user_id` opened a syllabus.
///
/// Every earlier syllabus of the course must already be completed for the
/// user; otherwise nothing is written. A syllabus without assignments is
/// completed on access; one with assignments stays in progress until a
/// submission completes it. A completed row never goes back to in progress.
pub async fn record_access(
    pool: &PgPool,
    user_id: DbId,
    syllabus_id: DbId,
) -> AppResult<UserProgress> {
    let mut tx = pool.begin().await?;

    let syllabus = SyllabusRepo::find_by_id(&mut *tx, syllabus_id)
        .await?
        .ok_or(AppError::not_found("Syllabus", syllabus_id))?;
    let course_id = syllabus.course_id;
    CourseRepo::find_by_id(&mut *tx, course_id)
        .await?
        .ok_or(AppError::not_found("Course", course_id))?;

    ensure_prerequisites(&mut *tx, user_id, course_id, syllabus.sort_order).await?;

    let has_assignments = AssignmentRepo::count_by_syllabus(&mut *tx, syllabus_id).await? > 0;
    let current = ProgressRepo::find(&mut *tx, user_id, course_id, syllabus_id)
        .await?
        .and_then(|row| ProgressStatus::from_id(row.status_id));
    let status =
        ProgressStatus::transition(current, ProgressEvent::Accessed { has_assignments });

    let row = ProgressRepo::upsert(&mut *tx, user_id, course_id, syllabus_id, status).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        course_id,
        syllabus_id,
        status = status.as_str(),
        "Syllabus access recorded"
    );
    Ok(row)
}

/// Fail with `InvalidState` unless every syllabus of `course_id` ordered
/// before `sort_order` is completed for the user.
pub(crate) async fn ensure_prerequisites(
    conn: &mut PgConnection,
    user_id: DbId,
    course_id: DbId,
    sort_order: i32,
) -> AppResult<()> {
    let outline = outline_slots(&mut *conn, course_id).await?;
    let completed: HashSet<DbId> =
        ProgressRepo::completed_syllabus_ids(&mut *conn, user_id, course_id)
            .await?
            .into_iter()
            .collect();
    ensure_prior_completed(&outline, sort_order, &completed)?;
    Ok(())
}

/// `floor(100 * completed / total)` for one user and course.
///
/// A course without syllabuses has no defined percentage and yields
/// `InvalidState`.
pub async fn course_progress(
    pool: &PgPool,
    user_id: DbId,
    course_id: DbId,
) -> AppResult<CourseProgress> {
    CourseContext::load(pool, course_id).await?;

    let total = SyllabusRepo::count_by_course(pool, course_id).await?;
    let completed = ProgressRepo::completed_syllabus_ids(pool, user_id, course_id)
        .await?
        .len() as i64;
    let percent = percent_complete(completed, total)?;

    Ok(CourseProgress {
        course_id,
        completed_syllabuses: completed,
        total_syllabuses: total,
        percent_complete: percent,
    })
}

/// Progress of every enrolled student, for the course's owners.
///
/// Students of a course with no syllabuses are reported at 0%.
pub async fn students_progress(
    pool: &PgPool,
    actor: &Actor,
    course_id: DbId,
) -> AppResult<Vec<StudentProgress>> {
    let ctx = CourseContext::load(pool, course_id).await?;
    ctx.ensure_owner(actor)?;

    let total = SyllabusRepo::count_by_course(pool, course_id).await?;
    let rows = ProgressRepo::students_progress(pool, course_id).await?;

    rows.into_iter()
        .map(|row| -> AppResult<StudentProgress> {
            let percent = if total == 0 {
                0
            } else {
                percent_complete(row.completed_syllabuses, total)?
            };
            Ok(StudentProgress {
                user_id: row.user_id,
                user_name: row.user_name,
                percent_complete: percent,
                last_accessed_at: row.last_accessed_at,
            })
        })
        .collect()
}
