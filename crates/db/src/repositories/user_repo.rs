//! Repository for the `users` table.

use coursehub_core::types::{DbId, Money};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::user::{CreateUser, User};

/// Column list for `users u JOIN roles r`.
const COLUMNS: &str = "u.id, u.name, u.email, u.password_hash, u.role_id, r.name AS role, \
                       u.balance, u.created_at, u.updated_at";

/// Provides account and balance operations.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with a zero balance, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "WITH u AS (
                INSERT INTO users (name, email, password_hash, role_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM u JOIN roles r ON r.id = u.role_id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.email = $1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Return the ids among `ids` that belong to users with the given role.
    pub async fn filter_ids_by_role(
        pool: &PgPool,
        ids: &[DbId],
        role_id: i16,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM users WHERE id = ANY($1) AND role_id = $2 ORDER BY id")
                .bind(ids)
                .bind(role_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Lock the user row and return the current balance.
    ///
    /// Serialises concurrent debits and credits for the same user until the
    /// surrounding transaction ends.
    pub async fn lock_balance(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Money>, sqlx::Error> {
        let row: Option<(Money,)> =
            sqlx::query_as("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;
        Ok(row.map(|(balance,)| balance))
    }

    /// Add `delta` (negative for a debit) to the balance, returning the new balance.
    pub async fn adjust_balance(
        conn: &mut PgConnection,
        id: DbId,
        delta: Money,
    ) -> Result<Money, sqlx::Error> {
        let (balance,): (Money,) =
            sqlx::query_as("UPDATE users SET balance = balance + $2 WHERE id = $1 RETURNING balance")
                .bind(id)
                .bind(delta)
                .fetch_one(conn)
                .await?;
        Ok(balance)
    }
}
