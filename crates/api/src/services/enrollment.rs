//! Paid enrollment: the balance debit and the enrollment row commit together.

use coursehub_core::error::CoreError;
use coursehub_core::status::CourseStatus;
use coursehub_core::types::{DbId, Money};
use coursehub_core::wallet::ensure_sufficient_balance;
use coursehub_db::models::enrollment::Enrollment;
use coursehub_db::repositories::{CourseRepo, EnrollmentRepo, UserRepo};
use coursehub_events::{event_types, EventBus, PlatformEvent};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct EnrollmentReceipt {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub amount_paid: Money,
    pub balance: Money,
}

/// Enroll `user_id` in an active course, paying its price from the balance.
///
/// The user row is locked before the balance check, so two concurrent
/// enrollments by the same user cannot both pass it. Any failure rolls back
/// both the debit and the enrollment. Course instructors are notified after
/// commit.
pub async fn enroll(
    pool: &PgPool,
    event_bus: &EventBus,
    user_id: DbId,
    course_id: DbId,
) -> AppResult<EnrollmentReceipt> {
    if EnrollmentRepo::exists(pool, user_id, course_id).await? {
        return Err(already_enrolled());
    }

    let mut tx = pool.begin().await?;

    let course = CourseRepo::find_by_id(&mut *tx, course_id)
        .await?
        .filter(|c| c.status_id == CourseStatus::Active.id())
        .ok_or(AppError::not_found("Course", course_id))?;

    let balance = UserRepo::lock_balance(&mut *tx, user_id)
        .await?
        .ok_or(AppError::not_found("User", user_id))?;

    // Re-check under the user lock; the fast path above ran without it.
    if EnrollmentRepo::exists(&mut *tx, user_id, course_id).await? {
        return Err(already_enrolled());
    }

    ensure_sufficient_balance(balance, course.price)?;

    let new_balance = UserRepo::adjust_balance(&mut *tx, user_id, -course.price).await?;
    let enrollment = EnrollmentRepo::create(&mut *tx, user_id, course_id).await?;
    let student = UserRepo::find_by_id(&mut *tx, user_id)
        .await?
        .ok_or(AppError::not_found("User", user_id))?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        course_id,
        price = course.price,
        balance = new_balance,
        "User enrolled"
    );

    event_bus.publish(
        PlatformEvent::new(event_types::ENROLLMENT_CREATED)
            .with_source("enrollment", enrollment.id)
            .with_actor(user_id)
            .with_payload(serde_json::json!({
                "course_id": course.id,
                "course_title": course.title,
                "student_name": student.name,
            })),
    );

    Ok(EnrollmentReceipt {
        enrollment,
        amount_paid: course.price,
        balance: new_balance,
    })
}

fn already_enrolled() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Already enrolled in this course".into(),
    ))
}
