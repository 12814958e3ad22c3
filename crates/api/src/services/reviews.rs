//! Course reviews and the derived course rating.

use coursehub_core::error::CoreError;
use coursehub_core::review::{average_rating, validate_rate};
use coursehub_core::types::DbId;
use coursehub_db::models::review::{CourseReview, CreateCourseReview};
use coursehub_db::repositories::{CourseRepo, EnrollmentRepo, ReviewRepo};
use sqlx::PgPool;

use super::access::CourseContext;
use super::progress::course_progress;
use crate::error::{AppError, AppResult};

/// Review a course the caller is enrolled in and has fully completed.
///
/// The course rating is recomputed in the same transaction as the insert.
pub async fn create_review(
    pool: &PgPool,
    user_id: DbId,
    course_id: DbId,
    input: &CreateCourseReview,
) -> AppResult<CourseReview> {
    validate_rate(input.rate)?;
    CourseContext::load(pool, course_id).await?;

    if !EnrollmentRepo::exists(pool, user_id, course_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only enrolled students can review this course".into(),
        )));
    }

    let progress = course_progress(pool, user_id, course_id).await?;
    if progress.percent_complete < 100 {
        return Err(AppError::Core(CoreError::InvalidState(
            "Complete the course before reviewing it".into(),
        )));
    }

    if ReviewRepo::exists(pool, user_id, course_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already reviewed this course".into(),
        )));
    }

    let mut tx = pool.begin().await?;
    // Serialise reviews of one course so each recompute sees the others.
    if !CourseRepo::lock(&mut *tx, course_id).await? {
        return Err(AppError::not_found("Course", course_id));
    }
    let review = ReviewRepo::create(&mut *tx, course_id, user_id, input).await?;
    let (sum, count) = ReviewRepo::rating_totals(&mut *tx, course_id).await?;
    let rating = average_rating(sum, count);
    CourseRepo::set_rating(&mut *tx, course_id, rating).await?;
    tx.commit().await?;

    tracing::info!(
        review_id = review.id,
        course_id,
        user_id,
        rate = review.rate,
        rating,
        "Course reviewed"
    );
    Ok(review)
}
