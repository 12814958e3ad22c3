//! Course lifecycle, co-instructors and the course detail page.

use std::collections::HashSet;

use coursehub_core::course::{
    validate_category, validate_difficulty, validate_price, validate_title,
};
use coursehub_core::error::CoreError;
use coursehub_core::roles::{Actor, ROLE_AUTHOR_ID};
use coursehub_core::status::CourseStatus;
use coursehub_core::types::DbId;
use coursehub_core::unlock::lock_states;
use coursehub_db::models::course::{
    AddInstructors, Course, CourseDetail, CourseInstructor, CreateCourse, SyllabusOutline,
    UpdateCourse,
};
use coursehub_db::repositories::{
    CourseInstructorRepo, CourseRepo, EnrollmentRepo, ProgressRepo, SyllabusRepo, UserRepo,
};
use sqlx::PgPool;

use super::access::{slot, CourseContext};
use crate::error::{AppError, AppResult};

/// Create a draft course owned by `author_id`. The caller has the author role.
pub async fn create_course(
    pool: &PgPool,
    author_id: DbId,
    input: &CreateCourse,
) -> AppResult<Course> {
    validate_title(&input.title)?;
    validate_price(input.price)?;
    validate_category(&input.category)?;
    validate_difficulty(&input.difficulty)?;

    let course = CourseRepo::create(pool, author_id, input).await?;
    tracing::info!(course_id = course.id, author_id, "Course created");
    Ok(course)
}

pub async fn update_course(
    pool: &PgPool,
    actor: &Actor,
    course_id: DbId,
    input: &UpdateCourse,
) -> AppResult<Course> {
    let ctx = CourseContext::load(pool, course_id).await?;
    ctx.ensure_owner(actor)?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }
    if let Some(category) = &input.category {
        validate_category(category)?;
    }
    if let Some(difficulty) = &input.difficulty {
        validate_difficulty(difficulty)?;
    }

    let course = CourseRepo::update(pool, course_id, input)
        .await?
        .ok_or(AppError::not_found("Course", course_id))?;
    tracing::info!(course_id, user_id = actor.user_id, "Course updated");
    Ok(course)
}

/// Soft delete. Enrollments and progress rows are kept.
pub async fn delete_course(pool: &PgPool, actor: &Actor, course_id: DbId) -> AppResult<()> {
    let ctx = CourseContext::load(pool, course_id).await?;
    ctx.ensure_author(actor)?;

    if !CourseRepo::soft_delete(pool, course_id).await? {
        return Err(AppError::not_found("Course", course_id));
    }
    tracing::info!(course_id, user_id = actor.user_id, "Course deleted");
    Ok(())
}

/// Activate or deactivate a course. Drafts become active on first activation.
pub async fn set_course_status(
    pool: &PgPool,
    actor: &Actor,
    course_id: DbId,
    status: CourseStatus,
) -> AppResult<Course> {
    let ctx = CourseContext::load(pool, course_id).await?;
    ctx.ensure_author(actor)?;

    let course = CourseRepo::set_status(pool, course_id, status.id())
        .await?
        .ok_or(AppError::not_found("Course", course_id))?;
    tracing::info!(course_id, status = status.as_str(), "Course status changed");
    Ok(course)
}

/// Add co-instructors. Every id must be an existing author; ids already on
/// the course (and the primary author) are skipped.
pub async fn add_instructors(
    pool: &PgPool,
    actor: &Actor,
    course_id: DbId,
    input: &AddInstructors,
) -> AppResult<Vec<CourseInstructor>> {
    let ctx = CourseContext::load(pool, course_id).await?;
    ctx.ensure_author(actor)?;

    let requested: Vec<DbId> = input
        .user_ids
        .iter()
        .copied()
        .filter(|id| *id != ctx.course.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let authors = UserRepo::filter_ids_by_role(pool, &requested, ROLE_AUTHOR_ID).await?;
    if authors.len() != requested.len() {
        let mut rejected: Vec<DbId> = requested
            .iter()
            .copied()
            .filter(|id| !authors.contains(id))
            .collect();
        rejected.sort_unstable();
        return Err(AppError::Core(CoreError::Validation(format!(
            "users {rejected:?} do not exist or are not authors"
        ))));
    }

    let added = CourseInstructorRepo::add_many(pool, course_id, &authors).await?;
    tracing::info!(course_id, added, "Instructors added");

    Ok(CourseInstructorRepo::list(pool, course_id).await?)
}

/// The course page: course fields plus its ordered outline.
///
/// Inactive and draft courses are only visible to their members. Lock flags
/// appear on the outline only when the viewer is enrolled.
pub async fn course_detail(
    pool: &PgPool,
    course_id: DbId,
    viewer: Option<DbId>,
) -> AppResult<CourseDetail> {
    let ctx = CourseContext::load(pool, course_id).await?;
    let is_member = viewer.is_some_and(|id| ctx.is_member(id));
    if !ctx.is_active() && !is_member {
        return Err(AppError::not_found("Course", course_id));
    }

    let is_enrolled = match viewer {
        Some(user_id) => EnrollmentRepo::exists(pool, user_id, course_id).await?,
        None => false,
    };

    let syllabuses = SyllabusRepo::list_by_course(pool, course_id).await?;

    let locks = match (viewer, is_enrolled) {
        (Some(user_id), true) => {
            let completed: HashSet<DbId> =
                ProgressRepo::completed_syllabus_ids(pool, user_id, course_id)
                    .await?
                    .into_iter()
                    .collect();
            let slots: Vec<_> = syllabuses.iter().map(slot).collect();
            Some(lock_states(&slots, &completed))
        }
        _ => None,
    };

    let outline = syllabuses
        .into_iter()
        .map(|s| {
            let is_locked = locks.as_ref().and_then(|locks| {
                locks
                    .iter()
                    .find(|lock| lock.syllabus_id == s.id)
                    .map(|lock| lock.is_locked)
            });
            SyllabusOutline {
                id: s.id,
                sort_order: s.sort_order,
                title: s.title,
                description: s.description,
                is_locked,
            }
        })
        .collect();

    Ok(CourseDetail {
        course: ctx.course,
        is_enrolled,
        syllabuses: outline,
    })
}
