//! Wallet top-up ledger model.

use coursehub_core::status::StatusId;
use coursehub_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the append-only `topup_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topup {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: Money,
    pub payment_method: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopup {
    pub amount: Money,
    pub payment_method: String,
}
