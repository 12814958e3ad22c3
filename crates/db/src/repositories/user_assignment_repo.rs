//! Repository for `user_assignments` (opened assignments).

use coursehub_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::assignment::UserAssignment;

const COLUMNS: &str = "id, assignment_id, user_id, due_at, created_at";

pub struct UserAssignmentRepo;

impl UserAssignmentRepo {
    /// Open an assignment for a user.
    ///
    /// Idempotent: if the user already opened it, the existing row is
    /// returned unchanged and the flag is `false`.
    pub async fn open(
        pool: &PgPool,
        assignment_id: DbId,
        user_id: DbId,
        due_at: Timestamp,
    ) -> Result<(UserAssignment, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO user_assignments (assignment_id, user_id, due_at)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_user_assignments DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, UserAssignment>(&query)
            .bind(assignment_id)
            .bind(user_id)
            .bind(due_at)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(row) => Ok((row, true)),
            None => {
                let existing = Self::find(pool, user_id, assignment_id)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((existing, false))
            }
        }
    }

    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        assignment_id: DbId,
    ) -> Result<Option<UserAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_assignments WHERE user_id = $1 AND assignment_id = $2"
        );
        sqlx::query_as::<_, UserAssignment>(&query)
            .bind(user_id)
            .bind(assignment_id)
            .fetch_optional(executor)
            .await
    }
}
