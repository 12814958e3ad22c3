//! Repository for the append-only `topup_history` ledger.

use coursehub_core::status::TopupStatus;
use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::topup::{CreateTopup, Topup};

const COLUMNS: &str = "id, user_id, amount, payment_method, status_id, created_at";

pub struct TopupRepo;

impl TopupRepo {
    /// Append a ledger row. Must run in the transaction that credits the balance.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        input: &CreateTopup,
        status: TopupStatus,
    ) -> Result<Topup, sqlx::Error> {
        let query = format!(
            "INSERT INTO topup_history (user_id, amount, payment_method, status_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topup>(&query)
            .bind(user_id)
            .bind(input.amount)
            .bind(&input.payment_method)
            .bind(status.id())
            .fetch_one(conn)
            .await
    }

    /// A user's top-ups, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Topup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM topup_history WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Topup>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
