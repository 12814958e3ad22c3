//! Dense, 1-based ordered collections stored in a `sort_order` column.
//!
//! [`OrderedCollection`] is the only way rows of an [`OrderedTable`] are
//! created or deleted. Append and remove each run in a single transaction
//! that first locks the parent row, so concurrent writers on the same parent
//! are serialised and positions stay `{1..=n}`. No operation sets
//! `sort_order` directly.

use std::future::Future;
use std::marker::PhantomData;

use coursehub_core::ordering::next_position;
use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

/// A table whose rows carry a dense `sort_order` scoped to a parent row.
pub trait OrderedTable {
    /// Child table name.
    const TABLE: &'static str;
    /// Parent table name, locked for the duration of every mutation.
    const PARENT_TABLE: &'static str;
    /// Foreign-key column in [`Self::TABLE`] referencing the parent.
    const PARENT_COLUMN: &'static str;

    type Row: Send + Unpin;
    type Input: Sync;

    /// Insert one row at `sort_order` under `parent_id`.
    fn insert<'c>(
        conn: &'c mut PgConnection,
        parent_id: DbId,
        input: &'c Self::Input,
        sort_order: i32,
    ) -> impl Future<Output = Result<Self::Row, sqlx::Error>> + Send + 'c;
}

/// Outcome of [`OrderedCollection::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedItem {
    pub parent_id: DbId,
    /// Position the removed row occupied.
    pub sort_order: i32,
    /// Number of later siblings shifted down by one.
    pub compacted: u64,
}

/// Append/remove operations over an [`OrderedTable`].
pub struct OrderedCollection<T>(PhantomData<T>);

impl<T: OrderedTable> OrderedCollection<T> {
    /// Append `input` as the last child of `parent_id`.
    ///
    /// Returns `None` when the parent does not exist.
    pub async fn append(
        pool: &PgPool,
        parent_id: DbId,
        input: &T::Input,
    ) -> Result<Option<T::Row>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !lock_parent::<T>(&mut *tx, parent_id).await? {
            return Ok(None);
        }

        let query = format!(
            "SELECT MAX(sort_order) FROM {} WHERE {} = $1",
            T::TABLE,
            T::PARENT_COLUMN
        );
        let (current_max,): (Option<i32>,) = sqlx::query_as(&query)
            .bind(parent_id)
            .fetch_one(&mut *tx)
            .await?;

        let sort_order = next_position(current_max);
        let row = T::insert(&mut *tx, parent_id, input, sort_order).await?;

        tx.commit().await?;
        tracing::debug!(table = T::TABLE, parent_id, sort_order, "Appended ordered item");
        Ok(Some(row))
    }

    /// Delete the row `id` and close the gap it leaves.
    ///
    /// Returns `None` when the row does not exist. A failure at any step rolls
    /// back both the delete and the compaction.
    pub async fn remove(pool: &PgPool, id: DbId) -> Result<Option<RemovedItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            T::PARENT_COLUMN,
            T::TABLE
        );
        let parent: Option<(DbId,)> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((parent_id,)) = parent else {
            return Ok(None);
        };

        lock_parent::<T>(&mut *tx, parent_id).await?;

        // Re-read under the lock: a concurrent remove may have won.
        let query = format!("DELETE FROM {} WHERE id = $1 RETURNING sort_order", T::TABLE);
        let deleted: Option<(i32,)> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((sort_order,)) = deleted else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE {} SET sort_order = sort_order - 1 WHERE {} = $1 AND sort_order > $2",
            T::TABLE,
            T::PARENT_COLUMN
        );
        let compacted = sqlx::query(&query)
            .bind(parent_id)
            .bind(sort_order)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        tracing::debug!(table = T::TABLE, parent_id, sort_order, compacted, "Removed ordered item");
        Ok(Some(RemovedItem {
            parent_id,
            sort_order,
            compacted,
        }))
    }

    /// Current positions under `parent_id`, ascending.
    pub async fn positions(pool: &PgPool, parent_id: DbId) -> Result<Vec<i32>, sqlx::Error> {
        let query = format!(
            "SELECT sort_order FROM {} WHERE {} = $1 ORDER BY sort_order",
            T::TABLE,
            T::PARENT_COLUMN
        );
        let rows: Vec<(i32,)> = sqlx::query_as(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(p,)| p).collect())
    }
}

/// Take a row lock on the parent. Returns `false` if the parent is missing.
async fn lock_parent<T: OrderedTable>(
    conn: &mut PgConnection,
    parent_id: DbId,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "SELECT id FROM {} WHERE id = $1 FOR NO KEY UPDATE",
        T::PARENT_TABLE
    );
    let locked: Option<(DbId,)> = sqlx::query_as(&query)
        .bind(parent_id)
        .fetch_optional(conn)
        .await?;
    Ok(locked.is_some())
}
