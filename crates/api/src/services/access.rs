//! Loading a course together with the data its ownership policies need.

use std::collections::HashSet;

use coursehub_core::error::CoreError;
use coursehub_core::policy::{ensure_can_modify, CourseAuthorship, CourseOwnership};
use coursehub_core::progress::{ensure_prior_completed, SyllabusSlot};
use coursehub_core::roles::Actor;
use coursehub_core::status::CourseStatus;
use coursehub_core::types::DbId;
use coursehub_db::models::course::Course;
use coursehub_db::models::syllabus::Syllabus;
use coursehub_db::repositories::{
    CourseInstructorRepo, CourseRepo, EnrollmentRepo, ProgressRepo, SyllabusRepo,
};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// A non-deleted course and its instructor list.
#[derive(Debug, Clone)]
pub struct CourseContext {
    pub course: Course,
    pub ownership: CourseOwnership,
}

impl CourseContext {
    pub async fn load(pool: &PgPool, course_id: DbId) -> AppResult<Self> {
        let course = CourseRepo::find_by_id(pool, course_id)
            .await?
            .ok_or(AppError::not_found("Course", course_id))?;
        let instructor_ids = CourseInstructorRepo::instructor_ids(pool, course_id).await?;

        Ok(Self {
            ownership: CourseOwnership {
                author_id: course.author_id,
                instructor_ids,
            },
            course,
        })
    }

    pub fn id(&self) -> DbId {
        self.course.id
    }

    pub fn is_active(&self) -> bool {
        self.course.status_id == CourseStatus::Active.id()
    }

    pub fn is_member(&self, user_id: DbId) -> bool {
        self.ownership.is_member(user_id)
    }

    /// Primary author or co-instructor.
    pub fn ensure_owner(&self, actor: &Actor) -> AppResult<()> {
        ensure_can_modify(&self.ownership, actor, "course")?;
        Ok(())
    }

    /// Primary author only.
    pub fn ensure_author(&self, actor: &Actor) -> AppResult<()> {
        let authorship = CourseAuthorship {
            author_id: self.course.author_id,
        };
        ensure_can_modify(&authorship, actor, "course")?;
        Ok(())
    }
}

/// Load a syllabus and the course it belongs to.
pub async fn syllabus_context(
    pool: &PgPool,
    syllabus_id: DbId,
) -> AppResult<(Syllabus, CourseContext)> {
    let syllabus = SyllabusRepo::find_by_id(pool, syllabus_id)
        .await?
        .ok_or(AppError::not_found("Syllabus", syllabus_id))?;
    let course = CourseContext::load(pool, syllabus.course_id).await?;
    Ok((syllabus, course))
}

/// Readers of syllabus content are course members, or enrolled students
/// who have completed every earlier syllabus.
pub async fn ensure_can_read_syllabus(
    pool: &PgPool,
    actor: &Actor,
    syllabus: &Syllabus,
    course: &CourseContext,
) -> AppResult<()> {
    if course.is_member(actor.user_id) {
        return Ok(());
    }

    if !EnrollmentRepo::exists(pool, actor.user_id, course.id()).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not enrolled in this course".into(),
        )));
    }

    let outline = outline_slots(pool, course.id()).await?;
    let completed: HashSet<DbId> =
        ProgressRepo::completed_syllabus_ids(pool, actor.user_id, course.id())
            .await?
            .into_iter()
            .collect();
    ensure_prior_completed(&outline, syllabus.sort_order, &completed)?;
    Ok(())
}

/// The course's syllabuses as `(id, order)` pairs, ascending.
pub async fn outline_slots<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    course_id: DbId,
) -> AppResult<Vec<SyllabusSlot>> {
    let syllabuses = SyllabusRepo::list_by_course(executor, course_id).await?;
    Ok(syllabuses.iter().map(slot).collect())
}

pub fn slot(syllabus: &Syllabus) -> SyllabusSlot {
    SyllabusSlot {
        syllabus_id: syllabus.id,
        sort_order: syllabus.sort_order,
    }
}
