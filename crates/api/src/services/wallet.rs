//! Balance top-ups.

use coursehub_core::error::CoreError;
use coursehub_core::status::TopupStatus;
use coursehub_core::types::{DbId, Money};
use coursehub_core::wallet::validate_topup_amount;
use coursehub_db::models::topup::{CreateTopup, Topup};
use coursehub_db::repositories::{TopupRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct TopupReceipt {
    pub topup: Topup,
    pub balance: Money,
}

/// Append a completed top-up to the ledger and credit the balance in one
/// transaction.
pub async fn top_up(
    pool: &PgPool,
    user_id: DbId,
    input: &CreateTopup,
) -> AppResult<TopupReceipt> {
    validate_topup_amount(input.amount)?;
    if input.payment_method.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "payment_method must not be empty".into(),
        )));
    }

    let mut tx = pool.begin().await?;

    UserRepo::lock_balance(&mut *tx, user_id)
        .await?
        .ok_or(AppError::not_found("User", user_id))?;
    let topup = TopupRepo::create(&mut *tx, user_id, input, TopupStatus::Completed).await?;
    let balance = UserRepo::adjust_balance(&mut *tx, user_id, input.amount).await?;

    tx.commit().await?;

    tracing::info!(user_id, amount = input.amount, balance, "Balance topped up");
    Ok(TopupReceipt { topup, balance })
}
